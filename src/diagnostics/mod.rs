//! Diagnostics of computed solutions.
//!
//! [`Problem::check_kkt`] measures how well a solution satisfies the
//! Karush-Kuhn-Tucker optimality conditions.  [`Problem::sensitivity`]
//! computes objective coefficient ranges of an optimal basic solution.

mod kkt;
mod sensitivity;

pub use kkt::*;
pub use sensitivity::*;

use crate::problem::ProblemError;
use thiserror::Error;

/// Error type returned by the diagnostics routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticsError {
    /// The basic solution is not optimal
    #[error("basic solution is not optimal")]
    NotOptimal,
    /// The current basis could not be factored
    #[error("basis factorization failed: {0}")]
    Basis(#[from] ProblemError),
}
