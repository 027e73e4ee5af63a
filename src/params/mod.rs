//! Control parameters.
//!
//! Each problem owns one [`ControlParams`] store holding the 32 parameters
//! identified by [`ParamKey`].  Every key has a fixed [`ParamKind`], a
//! default and a domain, recorded in a single slot table; reads and writes
//! are validated there.  Enumerated parameters have typed views such as
//! [`MsgLevel`] or [`BranchRule`].

mod error;
mod keys;
mod store;
mod table;
mod values;

pub use error::*;
pub use keys::*;
pub use store::*;
pub use values::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "serde")] {
        mod json;
    }
}
