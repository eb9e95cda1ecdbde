//! Bulk projections over ordered fit-parameter collections.
//!
//! A collection is a plain slice of [`FitParameter`]; position is identity
//! and every projection preserves order. `only_floating = true` restricts a
//! projection to parameters with `is_floating()`, which is how a minimizer
//! obtains its free coordinates.
use crate::{
    fit::{
        errors::{FitParamError, FitParamResult},
        parameter::FitParameter,
    },
    types::Parameters,
};
use ndarray::ArrayView1;
use std::collections::HashMap;

/// Ordered fit-parameter collection.
pub type FitParameters = Vec<FitParameter>;

fn selected(params: &[FitParameter], only_floating: bool) -> impl Iterator<Item = &FitParameter> {
    params.iter().filter(move |p| !only_floating || p.is_floating())
}

/// Values of the selected parameters.
pub fn fit_parameter_values(params: &[FitParameter], only_floating: bool) -> Parameters {
    selected(params, only_floating).map(FitParameter::value).collect()
}

/// Error magnitudes `|error|` of the selected parameters.
pub fn fit_parameter_errors(params: &[FitParameter], only_floating: bool) -> Parameters {
    selected(params, only_floating).map(FitParameter::error_magnitude).collect()
}

/// Names of the selected parameters.
pub fn fit_parameter_names(params: &[FitParameter], only_floating: bool) -> Vec<String> {
    selected(params, only_floating).map(|p| p.name().to_string()).collect()
}

pub fn count_floating_fit_parameters(params: &[FitParameter]) -> usize {
    params.iter().filter(|p| p.is_floating()).count()
}

/// Index of the first parameter called `name`.
pub fn find_fit_parameter_by_name(params: &[FitParameter], name: &str) -> Option<usize> {
    params.iter().position(|p| p.name() == name)
}

/// Write `values` back into the selected parameters, in order.
///
/// # Errors
/// - [`FitParamError::LengthMismatch`] if `values` does not match the number
///   of selected parameters.
/// - [`FitParamError::NonFiniteValue`] if any value is NaN/±inf.
///
/// Nothing is written unless every check passes.
pub fn set_fit_parameter_values(
    params: &mut [FitParameter], values: ArrayView1<f64>, only_floating: bool,
) -> FitParamResult<()> {
    let expected = selected(params, only_floating).count();
    if values.len() != expected {
        return Err(FitParamError::LengthMismatch { expected, found: values.len() });
    }
    for (p, &value) in selected(params, only_floating).zip(values.iter()) {
        if !value.is_finite() {
            return Err(FitParamError::NonFiniteValue { name: p.name().to_string(), value });
        }
    }
    let targets = params.iter_mut().filter(|p| !only_floating || p.is_floating());
    for (p, &value) in targets.zip(values.iter()) {
        p.set_value(value)?;
    }
    Ok(())
}

/// Check that no two parameters share a name.
///
/// # Errors
/// [`FitParamError::DuplicateName`] for the first repeated name found,
/// reporting both indices.
pub fn check_unique_names(params: &[FitParameter]) -> FitParamResult<()> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(params.len());
    for (idx, p) in params.iter().enumerate() {
        if let Some(&first) = seen.get(p.name()) {
            return Err(FitParamError::DuplicateName {
                name: p.name().to_string(),
                first,
                second: idx,
            });
        }
        seen.insert(p.name(), idx);
    }
    Ok(())
}
