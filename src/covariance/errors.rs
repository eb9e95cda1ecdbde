//! Errors for packed covariance storage and the Cholesky primitive.
//!
//! This module defines [`CovarianceError`], raised only for structural
//! problems with packed storage (lengths that cannot describe a symmetric
//! matrix, mismatched dimensions). A covariance that is merely not positive
//! definite is **not** an error here; the Cholesky routines report it as an
//! ordinary `None`/non-zero status so callers can test it cheaply.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Result alias for packed-covariance operations.
pub type CovarianceResult<T> = Result<T, CovarianceError>;

/// Structural error raised by packed-covariance helpers.
#[derive(Debug, Clone, PartialEq)]
pub enum CovarianceError {
    // ---- Packed layout ----
    /// Packed length is not a triangular number `n(n+1)/2`.
    NonTriangularLength { len: usize },

    /// Packed length disagrees with the requested dimension.
    PackedLengthMismatch { dim: usize, expected: usize, found: usize },

    // ---- Dense conversion ----
    /// Dense matrix passed for packing is not square.
    NonSquareMatrix { rows: usize, cols: usize },
}

impl std::error::Error for CovarianceError {}

impl std::fmt::Display for CovarianceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Packed layout ----
            CovarianceError::NonTriangularLength { len } => {
                write!(f, "Internal error: packed length {len} is not of the form n(n+1)/2")
            }
            CovarianceError::PackedLengthMismatch { dim, expected, found } => {
                write!(
                    f,
                    "Packed length mismatch for dimension {dim}: expected {expected}, found {found}"
                )
            }

            // ---- Dense conversion ----
            CovarianceError::NonSquareMatrix { rows, cols } => {
                write!(f, "Matrix must be square to pack, found {rows}x{cols}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<CovarianceError> for PyErr {
    fn from(err: CovarianceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
