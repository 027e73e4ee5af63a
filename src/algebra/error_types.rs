use thiserror::Error;

/// Error type returned by basis factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactorError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// The basis matrix is singular or too ill-conditioned to factor
    #[error("Basis matrix is singular (rank deficiency at step {0})")]
    Singular(usize),
}
