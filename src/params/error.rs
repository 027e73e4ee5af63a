use super::{ParamKey, ParamKind, ParamValue};
use thiserror::Error;

/// Error type returned by the parameter accessors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    /// The code or name does not identify a control parameter
    #[error("invalid control parameter key {0}")]
    InvalidKey(String),
    /// The value kind does not match the kind of the parameter
    #[error("control parameter {key} holds a {expected} value, not a {found} value")]
    TypeMismatch {
        key: ParamKey,
        expected: ParamKind,
        found: ParamKind,
    },
    /// The parameter is maintained by the solvers and cannot be set
    #[error("control parameter {0} is read-only")]
    ReadOnly(ParamKey),
    /// The value lies outside the domain of the parameter
    #[error("value {value} is out of range for control parameter {key}")]
    InvalidValue { key: ParamKey, value: ParamValue },
}
