//! Scalar field and dense linear algebra used by the simplex engines.
//!
//! All simplex arithmetic goes through the [`Scalar`] trait, implemented
//! for `f64` and for exact [`BigRational`](num_rational::BigRational)
//! values.  Basis matrices are small and dense, and are factored by one of
//! the methods in [`factor`].

mod error_types;
mod floats;
mod math_traits;
mod vecmath;

pub(crate) mod factor;

pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
