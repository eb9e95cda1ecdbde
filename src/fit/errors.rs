//! Errors for fit-parameter construction, mutation, and bulk updates.
//!
//! Every check runs before the parameter (or collection) is touched, so an
//! `Err` always leaves the caller's data unchanged.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Result alias for fit-parameter operations.
pub type FitParamResult<T> = Result<T, FitParamError>;

/// Error raised by [`FitParameter`](crate::fit::FitParameter) and the bulk
/// helpers in [`collection`](crate::fit::collection).
#[derive(Debug, Clone, PartialEq)]
pub enum FitParamError {
    // ---- Parameter fields ----
    /// Parameter names must be non-empty.
    EmptyName,

    /// Errors must be ≥ 0; use `fix()` to fix a parameter temporarily.
    NegativeError { name: String, error: f64 },

    /// Errors must be finite.
    NonFiniteError { name: String, error: f64 },

    /// Values must be finite.
    NonFiniteValue { name: String, value: f64 },

    // ---- Collections ----
    /// Bulk update length disagrees with the selected parameters.
    LengthMismatch { expected: usize, found: usize },

    /// Two parameters share a name.
    DuplicateName { name: String, first: usize, second: usize },
}

impl std::error::Error for FitParamError {}

impl std::fmt::Display for FitParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter fields ----
            FitParamError::EmptyName => write!(f, "Fit parameter name must be non-empty"),
            FitParamError::NegativeError { name, error } => {
                write!(f, "Fit parameter '{name}': error must be >= 0, got {error}")
            }
            FitParamError::NonFiniteError { name, error } => {
                write!(f, "Fit parameter '{name}': error must be finite, got {error}")
            }
            FitParamError::NonFiniteValue { name, value } => {
                write!(f, "Fit parameter '{name}': value must be finite, got {value}")
            }

            // ---- Collections ----
            FitParamError::LengthMismatch { expected, found } => {
                write!(f, "Expected {expected} parameter values, found {found}")
            }
            FitParamError::DuplicateName { name, first, second } => {
                write!(f, "Duplicate fit parameter name '{name}' at indices {first} and {second}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<FitParamError> for PyErr {
    fn from(err: FitParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
