//! fit: fit parameters and bulk projections over parameter collections.
//!
//! Purpose
//! -------
//! Describe the parameters of a likelihood fit: a name, a current value, and
//! an error whose sign encodes whether the parameter floats, is fixed for
//! now, or is fixed for good. Collections of parameters are projected into
//! the flat vectors a minimizer works with.
//!
//! Key behaviors
//! -------------
//! - [`FitParameter`] with the status machine `fix()` / `release()` /
//!   `set_error()` and the signed [`FitParameter::error`] accessor.
//! - [`ParameterStatus`], the tagged form of the same status.
//! - Order-preserving projections: [`fit_parameter_values`],
//!   [`fit_parameter_errors`], [`fit_parameter_names`],
//!   [`count_floating_fit_parameters`], [`find_fit_parameter_by_name`].
//! - Write-back with [`set_fit_parameter_values`] and an opt-in
//!   [`check_unique_names`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Names are non-empty and values finite; errors are finite and ≥ 0 when
//!   supplied.
//! - Temporarily fixed parameters always remember a strictly positive
//!   error.
//! - Collections do not enforce unique names; lookups return the first
//!   match.
//!
//! Conventions
//! -----------
//! - `error() > 0` floating, `== 0` permanently fixed, `< 0` temporarily
//!   fixed.
//! - Error projections report magnitudes.
//!
//! Downstream usage
//! ----------------
//! - Build a `FunctionMinimum` from `fit_parameter_values(&params, true)`
//!   and seed an errors-only covariance with
//!   `fit_parameter_errors(&params, true)`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the status table, construction checks, and each
//!   projection on mixed and empty collections.

pub mod collection;
pub mod errors;
pub mod parameter;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::collection::{
    FitParameters, check_unique_names, count_floating_fit_parameters, find_fit_parameter_by_name,
    fit_parameter_errors, fit_parameter_names, fit_parameter_values, set_fit_parameter_values,
};
pub use self::errors::{FitParamError, FitParamResult};
pub use self::parameter::{FitParameter, ParameterStatus};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::collection::{
        FitParameters, count_floating_fit_parameters, find_fit_parameter_by_name,
        fit_parameter_errors, fit_parameter_names, fit_parameter_values,
    };
    pub use super::errors::{FitParamError, FitParamResult};
    pub use super::parameter::{FitParameter, ParameterStatus};
}
