//! minimum: function minima, covariance validation, and sampling.
//!
//! Purpose
//! -------
//! Represent the result of a minimization: the point, the function value
//! there, and optionally the parameter covariance. The covariance is checked
//! for positive definiteness on entry, and its Cholesky factor drives
//! correlated Gaussian sampling around the minimum.
//!
//! Key behaviors
//! -------------
//! - [`FunctionMinimum`] with `update_parameters`, `update_covariance`,
//!   `errors`, `set_random_parameters`, and `random_parameters`.
//! - Two covariance input shapes: one-sigma errors (diagonal) or a packed
//!   symmetric matrix.
//! - A text report rendered with a printf-style [`NumberFormat`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Covariance and factor are present together or not at all.
//! - A covariance that is not positive definite is an ordinary outcome
//!   (`Ok(false)`); only shape mismatches and missing covariance are errors.
//! - Validation happens before any state is replaced.
//!
//! Conventions
//! -----------
//! - Points are `ndarray::Array1<f64>` ([`Parameters`](crate::types::Parameters)).
//! - Covariances use the packed upper layout from
//!   [`covariance`](crate::covariance).
//! - Sampling returns `½‖g‖²` for the standard normals `g` it consumed.
//!
//! Downstream usage
//! ----------------
//! - A minimizer builds a minimum from its best point and value, then
//!   attaches the covariance estimated at that point.
//! - Importance-sampling code calls `random_parameters` repeatedly and uses
//!   the returned weight.
//!
//! Testing notes
//! -------------
//! - Unit tests cover both input shapes, rejection without mutation,
//!   scripted sampling, and the report layout. The integration test checks
//!   the empirical covariance of 10⁵ draws.

pub mod errors;
pub mod format;
pub mod function_minimum;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{FormatError, FormatResult, MinimumError, MinimumResult};
pub use self::format::{DEFAULT_PRECISION, FormatStyle, MAX_PRECISION, NumberFormat};
pub use self::function_minimum::FunctionMinimum;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{MinimumError, MinimumResult};
    pub use super::format::NumberFormat;
    pub use super::function_minimum::FunctionMinimum;
}
