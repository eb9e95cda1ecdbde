//! Python-boundary helpers for the `_rust_likely` extension.
//!
//! Converts array-likes coming from Python (NumPy arrays, pandas Series,
//! plain sequences) into owned [`Parameters`] and hands vectors back as
//! NumPy arrays.
use crate::types::Parameters;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

/// Copy a 1-D float64 array-like into owned [`Parameters`].
///
/// Parameters
/// ----------
/// - `raw`: NumPy array, object with `to_numpy()`, or sequence of floats.
/// - `what`: argument name used in the error message.
///
/// Errors
/// ------
/// - `TypeError` when `raw` is none of the accepted forms.
pub fn extract_parameters<'py>(raw: &Bound<'py, PyAny>, what: &str) -> PyResult<Parameters> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method("to_numpy", (false,), None) {
        if let Ok(arr) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(arr.as_array().to_owned());
        }
    }

    let values: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{what}: expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })?;
    Ok(Parameters::from(values))
}

/// Hand a vector to Python as a NumPy array.
pub fn parameters_to_py<'py>(py: Python<'py>, values: Parameters) -> Bound<'py, PyArray1<f64>> {
    values.into_pyarray(py)
}
