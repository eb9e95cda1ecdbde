//! FitParameter: a named value with an error that encodes fit status.
//!
//! A parameter is in one of three states:
//! - **Floating**: free to vary, with error `e > 0`.
//! - **Temporarily fixed**: held at its value; the last floating error is
//!   remembered so [`FitParameter::release`] can restore it.
//! - **Permanently fixed**: error `0`; `release()` has no effect.
//!
//! The state is stored as a [`ParameterStatus`]. The signed accessor
//! [`FitParameter::error`] keeps the compact public encoding: positive when
//! floating, zero when permanently fixed, and the negated saved error when
//! temporarily fixed.
use crate::fit::errors::{FitParamError, FitParamResult};

/// Fit status of a parameter, with its error magnitude where one exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterStatus {
    /// Free to vary with the given error (> 0).
    Floating(f64),
    /// Held fixed; the saved error (> 0) is restored on release.
    TemporarilyFixed(f64),
    /// Held fixed with zero error.
    PermanentlyFixed,
}

impl ParameterStatus {
    fn from_error(error: f64) -> Self {
        if error > 0.0 { ParameterStatus::Floating(error) } else { ParameterStatus::PermanentlyFixed }
    }
}

/// Named fit parameter with value and status-encoding error.
#[derive(Debug, Clone, PartialEq)]
pub struct FitParameter {
    name: String,
    value: f64,
    status: ParameterStatus,
}

impl FitParameter {
    /// Create a parameter. `error > 0` makes it floating, `error == 0`
    /// permanently fixed.
    ///
    /// # Errors
    /// - [`FitParamError::EmptyName`] for an empty `name`.
    /// - [`FitParamError::NonFiniteValue`] for a NaN/±inf `value`.
    /// - [`FitParamError::NonFiniteError`] / [`FitParamError::NegativeError`]
    ///   for an invalid `error`.
    pub fn new(name: impl Into<String>, value: f64, error: f64) -> FitParamResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FitParamError::EmptyName);
        }
        if !value.is_finite() {
            return Err(FitParamError::NonFiniteValue { name, value });
        }
        validate_error(&name, error)?;
        Ok(FitParameter { name, value, status: ParameterStatus::from_error(error) })
    }

    /// Create a permanently fixed parameter.
    ///
    /// # Errors
    /// Same as [`FitParameter::new`] for the name and value.
    pub fn fixed(name: impl Into<String>, value: f64) -> FitParamResult<Self> {
        Self::new(name, value, 0.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Replace the value, leaving the status alone.
    ///
    /// # Errors
    /// [`FitParamError::NonFiniteValue`] for a NaN/±inf `value`.
    pub fn set_value(&mut self, value: f64) -> FitParamResult<()> {
        if !value.is_finite() {
            return Err(FitParamError::NonFiniteValue { name: self.name.clone(), value });
        }
        self.value = value;
        Ok(())
    }

    /// Signed error: `> 0` floating, `0` permanently fixed, `< 0`
    /// temporarily fixed (negated saved error).
    pub fn error(&self) -> f64 {
        match self.status {
            ParameterStatus::Floating(e) => e,
            ParameterStatus::TemporarilyFixed(e) => -e,
            ParameterStatus::PermanentlyFixed => 0.0,
        }
    }

    /// `|error()|`.
    pub fn error_magnitude(&self) -> f64 {
        self.error().abs()
    }

    pub fn status(&self) -> ParameterStatus {
        self.status
    }

    /// Set a new error, whatever the current state. `0` fixes permanently.
    ///
    /// # Errors
    /// [`FitParamError::NegativeError`] or [`FitParamError::NonFiniteError`];
    /// the parameter is unchanged on error.
    pub fn set_error(&mut self, error: f64) -> FitParamResult<()> {
        validate_error(&self.name, error)?;
        self.status = ParameterStatus::from_error(error);
        Ok(())
    }

    /// Fix a floating parameter temporarily. No-op otherwise.
    pub fn fix(&mut self) -> &mut Self {
        if let ParameterStatus::Floating(e) = self.status {
            self.status = ParameterStatus::TemporarilyFixed(e);
        }
        self
    }

    /// Release a temporarily fixed parameter. No-op otherwise.
    pub fn release(&mut self) -> &mut Self {
        if let ParameterStatus::TemporarilyFixed(e) = self.status {
            self.status = ParameterStatus::Floating(e);
        }
        self
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.status, ParameterStatus::Floating(_))
    }
}

fn validate_error(name: &str, error: f64) -> FitParamResult<()> {
    if !error.is_finite() {
        return Err(FitParamError::NonFiniteError { name: name.to_string(), error });
    }
    if error < 0.0 {
        return Err(FitParamError::NegativeError { name: name.to_string(), error });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction checks and the signed error encoding.
    // - The fix/release/set_error state machine.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Signed error and floating flag follow the constructor error.
    //
    // Given
    // -----
    // - Errors 0.5, 0.0 and 1e-300.
    //
    // Expect
    // ------
    // - error() returns the input; is_floating() iff error > 0.
    fn new_encodes_status_from_error() {
        for e in [0.5, 0.0, 1e-300] {
            let p = FitParameter::new("x", 3.0, e).unwrap();
            assert_eq!(p.error(), e);
            assert_eq!(p.is_floating(), e > 0.0);
            assert_eq!(p.value(), 3.0);
            assert_eq!(p.name(), "x");
        }
        assert_eq!(FitParameter::fixed("y", 1.0).unwrap().status(), ParameterStatus::PermanentlyFixed);
    }

    #[test]
    // Purpose
    // -------
    // Constructor rejects invalid fields.
    //
    // Given
    // -----
    // - Empty name, NaN value, negative error, infinite error.
    //
    // Expect
    // ------
    // - EmptyName, NonFiniteValue, NegativeError, NonFiniteError.
    fn new_rejects_invalid_fields() {
        assert_eq!(FitParameter::new("", 1.0, 0.1), Err(FitParamError::EmptyName));
        assert!(matches!(
            FitParameter::new("a", f64::NAN, 0.1),
            Err(FitParamError::NonFiniteValue { .. })
        ));
        assert_eq!(
            FitParameter::new("a", 1.0, -0.1),
            Err(FitParamError::NegativeError { name: "a".into(), error: -0.1 })
        );
        assert!(matches!(
            FitParameter::new("a", 1.0, f64::INFINITY),
            Err(FitParamError::NonFiniteError { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // fix() then release() restores the original error exactly.
    //
    // Given
    // -----
    // - p = ("m", 1.5, 0.2).
    //
    // Expect
    // ------
    // - After fix: error -0.2, not floating.
    // - After release: error 0.2, floating, value unchanged.
    fn fix_release_round_trip() {
        // Arrange
        let mut p = FitParameter::new("m", 1.5, 0.2).unwrap();

        // Act / Assert
        p.fix();
        assert_eq!(p.error(), -0.2);
        assert!(!p.is_floating());
        assert_eq!(p.status(), ParameterStatus::TemporarilyFixed(0.2));
        assert_eq!(p.error_magnitude(), 0.2);

        p.release();
        assert_eq!(p.error(), 0.2);
        assert!(p.is_floating());
        assert_eq!(p.value(), 1.5);

        p.fix().release();
        assert_eq!(p.error(), 0.2);
    }

    #[test]
    // Purpose
    // -------
    // Idempotent transitions and the permanently fixed sink.
    //
    // Given
    // -----
    // - A floating parameter fixed twice, and a permanently fixed one.
    //
    // Expect
    // ------
    // - Double fix keeps -e; release on floating is a no-op.
    // - fix/release leave a permanently fixed parameter at 0.
    fn transitions_are_idempotent() {
        let mut p = FitParameter::new("a", 0.0, 0.3).unwrap();
        p.release();
        assert_eq!(p.error(), 0.3);
        p.fix().fix();
        assert_eq!(p.error(), -0.3);

        let mut q = FitParameter::fixed("b", 2.0).unwrap();
        q.fix();
        assert_eq!(q.error(), 0.0);
        q.release();
        assert_eq!(q.error(), 0.0);
        assert!(!q.is_floating());
    }

    #[test]
    // Purpose
    // -------
    // set_error moves to Floating or PermanentlyFixed from any state and
    // leaves the parameter untouched on rejection.
    //
    // Given
    // -----
    // - A temporarily fixed parameter.
    //
    // Expect
    // ------
    // - set_error(-1) fails and the status is still TemporarilyFixed.
    // - set_error(0.7) floats with 0.7; set_error(0) fixes permanently.
    fn set_error_overrides_status() {
        let mut p = FitParameter::new("a", 1.0, 0.2).unwrap();
        p.fix();

        assert!(matches!(p.set_error(-1.0), Err(FitParamError::NegativeError { .. })));
        assert!(matches!(p.set_error(f64::NAN), Err(FitParamError::NonFiniteError { .. })));
        assert_eq!(p.status(), ParameterStatus::TemporarilyFixed(0.2));

        p.set_error(0.7).unwrap();
        assert_eq!(p.status(), ParameterStatus::Floating(0.7));

        p.set_error(0.0).unwrap();
        assert_eq!(p.status(), ParameterStatus::PermanentlyFixed);
        p.release();
        assert_eq!(p.error(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // set_value rejects non-finite values without mutating.
    //
    // Given
    // -----
    // - A parameter with value 1.0.
    //
    // Expect
    // ------
    // - set_value(inf) fails; set_value(2.5) succeeds.
    fn set_value_requires_finite_value() {
        let mut p = FitParameter::new("a", 1.0, 0.1).unwrap();
        assert!(p.set_value(f64::INFINITY).is_err());
        assert_eq!(p.value(), 1.0);
        p.set_value(2.5).unwrap();
        assert_eq!(p.value(), 2.5);
    }
}
