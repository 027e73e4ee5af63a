use crate::algebra::FactorError;
use thiserror::Error;

/// Error type returned by problem building and factorization routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Row index out of range
    #[error("row index {0} out of range")]
    BadRow(usize),
    /// Column index out of range
    #[error("column index {0} out of range")]
    BadCol(usize),
    /// Duplicate index in a sparse vector
    #[error("duplicate index {0} in sparse vector")]
    DuplicateIndex(usize),
    /// Non-finite matrix or objective coefficient
    #[error("coefficient {0} is not finite")]
    BadValue(f64),
    /// The basis does not have exactly one basic variable per row
    #[error("invalid basis: {basic} basic variables for {rows} rows")]
    BadBasis { basic: usize, rows: usize },
    /// The basis matrix could not be factored
    #[error("basis matrix could not be factored")]
    Factor(#[from] FactorError),
}
