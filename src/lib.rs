//! rust_likely: fit parameters and function minima for likelihood fits,
//! with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge for the
//! `_rust_likely` extension module. The crate keeps the bookkeeping that
//! surrounds a minimizer: which parameters float, where the minimum is, how
//! uncertain it is, and how to sample around it.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: [`covariance`] (packed storage and
//!   Cholesky), [`random`] (injected random sources), [`fit`]
//!   (`FitParameter` and bulk projections), and [`minimum`]
//!   (`FunctionMinimum`).
//! - Behind the `python-bindings` feature, define `#[pyclass]` wrappers and
//!   the `#[pymodule]` initializer, registering the `rust_likely.fitting`
//!   submodule.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numerical work lives in the inner modules; the binding layer only
//!   converts inputs, dispatches, and maps errors.
//! - Everything is single-threaded. Python wrappers that hold a random
//!   handle are `unsendable`.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray::Array1<f64>` ([`types::Parameters`]); packed
//!   covariances share the same type ([`types::PackedCovariance`]).
//! - Rust errors become Python `ValueError`s at the boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use the module preludes, e.g.
//!   `use rust_likely::minimum::prelude::*;`.
//! - The Python package imports `_rust_likely` and exposes
//!   `rust_likely.fitting.FitParameter` and
//!   `rust_likely.fitting.FunctionMinimum`.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; `tests/` holds the end-to-end
//!   pipeline from fit parameters to sampled points.

pub mod covariance;
pub mod fit;
pub mod minimum;
pub mod random;
pub mod types;
#[cfg(feature = "python-bindings")]
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    fit::{FitParameter, ParameterStatus},
    minimum::{FunctionMinimum, NumberFormat},
    random::{Random, share},
    utils::{extract_parameters, parameters_to_py},
};

/// FitParameter: Python-facing wrapper for [`fit::FitParameter`].
///
/// Purpose
/// -------
/// Let Python code build and toggle fit parameters with the same status
/// rules as the Rust type.
///
/// Parameters
/// ----------
/// Constructed from Python via `FitParameter(name, value, error=0.0)`:
/// - `name`: non-empty string.
/// - `value`: finite float.
/// - `error`: float ≥ 0; `0` means permanently fixed.
///
/// Fields
/// ------
/// - `inner`: [`fit::FitParameter`]
#[cfg(feature = "python-bindings")]
#[pyclass(name = "FitParameter", module = "rust_likely.fitting")]
#[derive(Clone)]
pub struct PyFitParameter {
    inner: FitParameter,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFitParameter {
    #[new]
    #[pyo3(text_signature = "(name, value, /, error=0.0)", signature = (name, value, error = 0.0))]
    pub fn new(name: String, value: f64, error: f64) -> PyResult<Self> {
        Ok(PyFitParameter { inner: FitParameter::new(name, value, error)? })
    }

    #[getter]
    pub fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    #[setter]
    pub fn set_value(&mut self, value: f64) -> PyResult<()> {
        Ok(self.inner.set_value(value)?)
    }

    /// Signed error: > 0 floating, 0 permanently fixed, < 0 temporarily fixed.
    #[getter]
    pub fn error(&self) -> f64 {
        self.inner.error()
    }

    #[getter]
    pub fn is_floating(&self) -> bool {
        self.inner.is_floating()
    }

    /// One of `"floating"`, `"temporarily_fixed"`, `"permanently_fixed"`.
    #[getter]
    pub fn status(&self) -> &'static str {
        match self.inner.status() {
            ParameterStatus::Floating(_) => "floating",
            ParameterStatus::TemporarilyFixed(_) => "temporarily_fixed",
            ParameterStatus::PermanentlyFixed => "permanently_fixed",
        }
    }

    pub fn set_error(&mut self, error: f64) -> PyResult<()> {
        Ok(self.inner.set_error(error)?)
    }

    pub fn fix(&mut self) {
        self.inner.fix();
    }

    pub fn release(&mut self) {
        self.inner.release();
    }

    pub fn __repr__(&self) -> String {
        format!(
            "FitParameter(name={:?}, value={}, error={})",
            self.inner.name(),
            self.inner.value(),
            self.inner.error()
        )
    }
}

/// FunctionMinimum: Python-facing wrapper for [`minimum::FunctionMinimum`].
///
/// Purpose
/// -------
/// Expose covariance updates, error extraction, sampling, and the text
/// report to Python.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `FunctionMinimum(min_value, point, covar=None, errors_only=False, seed=None)`:
/// - `point`: 1-D float array-like.
/// - `covar`: optional errors (length `n`) or packed covariance
///   (length `n(n+1)/2`).
/// - `seed`: when given, the minimum samples from its own seeded generator
///   instead of the thread-shared one.
///
/// Fields
/// ------
/// - `inner`: [`minimum::FunctionMinimum`]
///
/// Notes
/// -----
/// - `unsendable`: the wrapped random handle is `Rc`-based.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "FunctionMinimum", module = "rust_likely.fitting", unsendable)]
pub struct PyFunctionMinimum {
    inner: FunctionMinimum,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyFunctionMinimum {
    #[new]
    #[pyo3(
        text_signature = "(min_value, point, /, covar=None, errors_only=False, seed=None)",
        signature = (min_value, point, covar = None, errors_only = false, seed = None)
    )]
    pub fn new<'py>(
        min_value: f64, point: &Bound<'py, PyAny>, covar: Option<&Bound<'py, PyAny>>,
        errors_only: bool, seed: Option<u64>,
    ) -> PyResult<Self> {
        let point = extract_parameters(point, "point")?;
        let mut inner = match covar {
            Some(raw) => {
                let covar = extract_parameters(raw, "covar")?;
                FunctionMinimum::with_covariance(min_value, point, covar.view(), errors_only)?
            }
            None => FunctionMinimum::new(min_value, point),
        };
        if let Some(seed) = seed {
            inner.set_random(share(Random::from_seed(seed)));
        }
        Ok(PyFunctionMinimum { inner })
    }

    #[getter]
    pub fn min_value(&self) -> f64 {
        self.inner.min_value()
    }

    #[getter]
    pub fn point<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        parameters_to_py(py, self.inner.point().clone())
    }

    #[getter]
    pub fn have_covariance(&self) -> bool {
        self.inner.have_covariance()
    }

    /// Packed covariance, or `None`.
    #[getter]
    pub fn covariance<'py>(&self, py: Python<'py>) -> Option<Bound<'py, PyArray1<f64>>> {
        self.inner.covariance().map(|c| parameters_to_py(py, c.clone()))
    }

    pub fn update_parameters<'py>(&mut self, point: &Bound<'py, PyAny>, fval: f64) -> PyResult<()> {
        let point = extract_parameters(point, "point")?;
        self.inner.update_parameters(point, fval);
        Ok(())
    }

    /// Returns `False` when the covariance is rejected.
    #[pyo3(signature = (covar, errors_only = false))]
    pub fn update_covariance<'py>(
        &mut self, covar: &Bound<'py, PyAny>, errors_only: bool,
    ) -> PyResult<bool> {
        let covar = extract_parameters(covar, "covar")?;
        Ok(self.inner.update_covariance(covar.view(), errors_only)?)
    }

    pub fn errors<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        Ok(parameters_to_py(py, self.inner.errors()?))
    }

    /// Returns `(sample, weight)` with `weight = ½‖g‖²`.
    pub fn random_parameters<'py>(
        &self, py: Python<'py>,
    ) -> PyResult<(Bound<'py, PyArray1<f64>>, f64)> {
        let (sample, weight) = self.inner.random_parameters()?;
        Ok((parameters_to_py(py, sample), weight))
    }

    #[pyo3(signature = (format = "%g"))]
    pub fn report(&self, format: &str) -> PyResult<String> {
        let format: NumberFormat = format.parse()?;
        Ok(self.inner.report(&format))
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }
}

/// _rust_likely: PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_likely` module, attach the `fitting` submodule, and
/// register it in `sys.modules` as `rust_likely.fitting` so dotted imports
/// work.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or touching `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_likely<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let fitting_mod = PyModule::new(py, "fitting")?;
    fitting(py, m, &fitting_mod)?;

    py.import("sys")?.getattr("modules")?.set_item("rust_likely.fitting", fitting_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn fitting<'py>(
    _py: Python, rust_likely: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyFitParameter>()?;
    m.add_class::<PyFunctionMinimum>()?;
    rust_likely.add_submodule(m)?;
    Ok(())
}
