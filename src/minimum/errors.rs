//! Errors for function minima and report formatting.
//!
//! [`MinimumError`] covers contract violations on a `FunctionMinimum`
//! (shape mismatches, missing covariance, a constructor given a covariance
//! that is not positive definite). A rejected covariance passed to
//! `update_covariance` is not an error; it returns `Ok(false)`.
//!
//! [`FormatError`] covers invalid printf-style number formats.
use crate::covariance::errors::CovarianceError;
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Result alias for `FunctionMinimum` operations.
pub type MinimumResult<T> = Result<T, MinimumError>;

/// Result alias for number-format parsing.
pub type FormatResult<T> = Result<T, FormatError>;

/// Error raised by `FunctionMinimum`.
#[derive(Debug, Clone, PartialEq)]
pub enum MinimumError {
    // ---- Shapes ----
    /// Input length disagrees with the parameter count.
    InvalidShape { input: &'static str, expected: usize, found: usize },

    // ---- Covariance state ----
    /// Covariance passed to a constructor is not positive definite, or an
    /// error vector holds a non-positive entry.
    InvalidCovariance,

    /// Operation needs a covariance and none is stored.
    MissingCovariance,

    // ---- Internal ----
    /// Packed storage failed a structural check.
    Internal(CovarianceError),
}

impl std::error::Error for MinimumError {}

impl std::fmt::Display for MinimumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shapes ----
            MinimumError::InvalidShape { input, expected, found } => {
                write!(f, "Invalid {input} length: expected {expected}, found {found}")
            }

            // ---- Covariance state ----
            MinimumError::InvalidCovariance => {
                write!(f, "Covariance is not positive definite")
            }
            MinimumError::MissingCovariance => {
                write!(f, "No covariance matrix available")
            }

            // ---- Internal ----
            MinimumError::Internal(err) => write!(f, "{err}"),
        }
    }
}

impl From<CovarianceError> for MinimumError {
    fn from(err: CovarianceError) -> Self {
        MinimumError::Internal(err)
    }
}

/// Error raised when parsing or building a `NumberFormat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// String is not of the form `%[width][.precision](f|e|g)`.
    InvalidSpec { spec: String },

    /// Precision exceeds the number of meaningful `f64` digits.
    InvalidPrecision { precision: usize, max: usize },
}

impl std::error::Error for FormatError {}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::InvalidSpec { spec } => {
                write!(f, "Invalid number format '{spec}': expected %[width][.precision](f|e|g)")
            }
            FormatError::InvalidPrecision { precision, max } => {
                write!(f, "Format precision {precision} exceeds maximum of {max}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<MinimumError> for PyErr {
    fn from(err: MinimumError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<FormatError> for PyErr {
    fn from(err: FormatError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
