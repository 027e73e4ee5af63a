//! Reference solver backends.
//!
//! Each backend implements the native call contract of one solver
//! family: it takes a [`Problem`](crate::problem::Problem) and a native
//! control record, writes its solution back into the problem and returns
//! a native return code.

pub(crate) mod control;
pub(crate) mod interior;
pub(crate) mod intopt;
pub(crate) mod lp;
pub(crate) mod presolve;
pub(crate) mod progress;
pub(crate) mod scaling;
pub(crate) mod simplex;
