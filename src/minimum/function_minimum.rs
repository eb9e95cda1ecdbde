//! FunctionMinimum: the outcome of a minimization with optional covariance.
//!
//! Purpose
//! -------
//! Record where a function was minimized and the value found there, and
//! optionally the covariance of the parameters at that point together with
//! its Cholesky factor. The factor is used to draw correlated Gaussian
//! samples around the minimum.
//!
//! Key behaviors
//! -------------
//! - `update_covariance` accepts either one-sigma errors (diagonal
//!   covariance) or a packed symmetric matrix. Matrices that are not
//!   positive definite are rejected with `Ok(false)` and leave the minimum
//!   unchanged.
//! - `errors` returns `sqrt` of the covariance diagonal, flooring negative
//!   entries to zero.
//! - `set_random_parameters` writes `point + Uᵀg` for standard normals `g`
//!   and returns `½‖g‖²`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The covariance and its factor are stored together, so either both are
//!   present or neither is.
//! - Every check runs before any state is replaced.
//! - The random handle is shared; clones of a minimum draw from the same
//!   stream.
use crate::{
    covariance::{
        CovarianceError,
        cholesky::cholesky_decomposition,
        packed::{
            PackedCovariance, diagonal_index, packed_diagonal, packed_dim, packed_index,
            packed_len, unpack_symmetric, verify_packed_len,
        },
    },
    minimum::{
        errors::{MinimumError, MinimumResult},
        format::NumberFormat,
    },
    random::{RandomSource, SharedRandom, instance},
    types::Parameters,
};
use nalgebra::DMatrix;
use ndarray::ArrayView1;
use std::fmt;

/// Covariance and its packed upper Cholesky factor.
#[derive(Debug, Clone, PartialEq)]
struct CovarianceState {
    covar: PackedCovariance,
    cholesky: PackedCovariance,
}

impl CovarianceState {
    fn dim(&self) -> MinimumResult<usize> {
        Ok(packed_dim(self.covar.len())?)
    }
}

/// Minimum of a function, with optional covariance and a random handle for
/// sampling.
#[derive(Clone)]
pub struct FunctionMinimum {
    min_value: f64,
    point: Parameters,
    covariance: Option<CovarianceState>,
    random: SharedRandom,
}

impl FunctionMinimum {
    /// Minimum without covariance, sampling from the thread's shared
    /// [`Random`](crate::random::Random).
    pub fn new(min_value: f64, point: Parameters) -> Self {
        FunctionMinimum { min_value, point, covariance: None, random: instance() }
    }

    /// Minimum with a covariance given as errors (`errors_only`) or as a
    /// packed symmetric matrix.
    ///
    /// # Errors
    /// - [`MinimumError::InvalidShape`] on a length mismatch.
    /// - [`MinimumError::InvalidCovariance`] when the input is rejected by
    ///   [`FunctionMinimum::update_covariance`].
    pub fn with_covariance(
        min_value: f64, point: Parameters, covar: ArrayView1<f64>, errors_only: bool,
    ) -> MinimumResult<Self> {
        let mut minimum = Self::new(min_value, point);
        if !minimum.update_covariance(covar, errors_only)? {
            return Err(MinimumError::InvalidCovariance);
        }
        Ok(minimum)
    }

    /// Replace the random handle (builder form).
    pub fn with_random(mut self, random: SharedRandom) -> Self {
        self.random = random;
        self
    }

    /// Replace the random handle.
    pub fn set_random(&mut self, random: SharedRandom) {
        self.random = random;
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn point(&self) -> &Parameters {
        &self.point
    }

    pub fn n_parameters(&self) -> usize {
        self.point.len()
    }

    pub fn have_covariance(&self) -> bool {
        self.covariance.is_some()
    }

    /// Packed covariance, if present.
    pub fn covariance(&self) -> Option<&PackedCovariance> {
        self.covariance.as_ref().map(|s| &s.covar)
    }

    /// Packed upper Cholesky factor, if present.
    pub fn cholesky(&self) -> Option<&PackedCovariance> {
        self.covariance.as_ref().map(|s| &s.cholesky)
    }

    /// Dense symmetric covariance, if present.
    pub fn covariance_matrix(&self) -> Option<DMatrix<f64>> {
        self.covariance.as_ref().and_then(|s| unpack_symmetric(s.covar.view()).ok())
    }

    /// Move the minimum to `point` with value `fval`. The covariance is kept
    /// as is.
    pub fn update_parameters(&mut self, point: Parameters, fval: f64) {
        self.point = point;
        self.min_value = fval;
    }

    /// Replace the covariance.
    ///
    /// Parameters
    /// ----------
    /// - `covar`: one-sigma errors of length `n` when `errors_only`, else a
    ///   packed symmetric matrix of length `n(n+1)/2`.
    /// - `errors_only`: selects the input shape.
    ///
    /// Returns
    /// -------
    /// `Ok(true)` when stored. `Ok(false)` when an error is `≤ 0`, NaN or
    /// infinite, when its square underflows to 0 or overflows, or when the
    /// matrix is not positive definite; nothing changes in that case.
    ///
    /// Errors
    /// ------
    /// - [`MinimumError::InvalidShape`] when the length disagrees with `n`.
    pub fn update_covariance(
        &mut self, covar: ArrayView1<f64>, errors_only: bool,
    ) -> MinimumResult<bool> {
        let n = self.point.len();
        let state = if errors_only {
            if covar.len() != n {
                return Err(MinimumError::InvalidShape {
                    input: "errors",
                    expected: n,
                    found: covar.len(),
                });
            }
            if let Some(bad) = covar.iter().position(|&e| !is_usable_error(e)) {
                log::debug!("rejecting error vector: entry {bad} is {}", covar[bad]);
                return Ok(false);
            }
            diagonal_state(covar)
        } else {
            verify_packed_len(covar.len(), n).map_err(|err| match err {
                CovarianceError::PackedLengthMismatch { expected, found, .. } => {
                    MinimumError::InvalidShape { input: "covariance", expected, found }
                }
                other => MinimumError::Internal(other),
            })?;
            match cholesky_decomposition(covar)? {
                Some(cholesky) => CovarianceState { covar: covar.to_owned(), cholesky },
                None => {
                    log::debug!("rejecting {n}x{n} covariance: not positive definite");
                    return Ok(false);
                }
            }
        };
        self.covariance = Some(state);
        Ok(true)
    }

    /// One-sigma errors `sqrt(C[i,i])`, with negative diagonals floored to 0.
    ///
    /// # Errors
    /// [`MinimumError::MissingCovariance`] when no covariance is stored.
    pub fn errors(&self) -> MinimumResult<Parameters> {
        let state = self.covariance.as_ref().ok_or(MinimumError::MissingCovariance)?;
        let diagonal = packed_diagonal(state.covar.view())?;
        Ok(diagonal.mapv(|sigsq| {
            if sigsq > 0.0 {
                sigsq.sqrt()
            } else {
                if sigsq < 0.0 {
                    log::warn!("negative covariance diagonal ({sigsq}); reporting error 0");
                }
                0.0
            }
        }))
    }

    /// Draw `dst = point + Uᵀg` using the stored random handle.
    ///
    /// Returns `½‖g‖²`, the negative log density of the normal draw up to a
    /// constant.
    ///
    /// # Errors
    /// See [`FunctionMinimum::set_random_parameters_with`].
    pub fn set_random_parameters(&self, dst: &mut Parameters) -> MinimumResult<f64> {
        let mut source = self.random.borrow_mut();
        self.set_random_parameters_with(dst, &mut *source)
    }

    /// Draw `dst = point + Uᵀg` with normals taken from `source`.
    ///
    /// Errors
    /// ------
    /// - [`MinimumError::MissingCovariance`] when no covariance is stored.
    /// - [`MinimumError::InvalidShape`] when `dst` or the current point does
    ///   not match the covariance dimension.
    ///
    /// Notes
    /// -----
    /// All `n` normals are drawn before `dst` is touched. The factor is then
    /// read in packed order, one forward pass.
    pub fn set_random_parameters_with<R: RandomSource + ?Sized>(
        &self, dst: &mut Parameters, source: &mut R,
    ) -> MinimumResult<f64> {
        let state = self.covariance.as_ref().ok_or(MinimumError::MissingCovariance)?;
        let n = state.dim()?;
        if self.point.len() != n {
            return Err(MinimumError::InvalidShape {
                input: "point",
                expected: n,
                found: self.point.len(),
            });
        }
        if dst.len() != n {
            return Err(MinimumError::InvalidShape {
                input: "destination",
                expected: n,
                found: dst.len(),
            });
        }

        let gauss: Vec<f64> = (0..n).map(|_| source.normal()).collect();
        let nl_weight = 0.5 * gauss.iter().map(|g| g * g).sum::<f64>();

        dst.assign(&self.point);
        let mut next = state.cholesky.iter();
        for j in 0..n {
            for g in &gauss[..=j] {
                if let Some(u) = next.next() {
                    dst[j] += u * g;
                }
            }
        }
        Ok(nl_weight)
    }

    /// Allocate and return a fresh draw with its weight.
    ///
    /// # Errors
    /// Same as [`FunctionMinimum::set_random_parameters`].
    pub fn random_parameters(&self) -> MinimumResult<(Parameters, f64)> {
        let mut dst = self.point.clone();
        let weight = self.set_random_parameters(&mut dst)?;
        Ok((dst, weight))
    }

    /// Write the diagnostic report.
    ///
    /// Layout:
    /// ```text
    /// F(x0,x1,...) = fval
    /// ERRORS: e0 e1 ...
    /// COVARIANCE:
    ///  c00 c01 ...
    /// ```
    /// The last three parts appear only when a covariance is stored.
    ///
    /// # Errors
    /// Propagates writer failures, and fails when the stored covariance has
    /// no square layout.
    pub fn write_report<W: fmt::Write + ?Sized>(
        &self, out: &mut W, format: &NumberFormat,
    ) -> fmt::Result {
        out.write_str("F(")?;
        for (i, x) in self.point.iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            format.write_value(out, *x)?;
        }
        out.write_str(") = ")?;
        format.write_value(out, self.min_value)?;
        out.write_char('\n')?;

        let Some(state) = self.covariance.as_ref() else {
            return Ok(());
        };
        let errors = self.errors().map_err(|_| fmt::Error)?;
        out.write_str("ERRORS:")?;
        for e in errors.iter() {
            out.write_char(' ')?;
            format.write_value(out, *e)?;
        }
        out.write_str("\nCOVARIANCE:\n")?;
        let n = errors.len();
        for i in 0..n {
            for j in 0..n {
                out.write_char(' ')?;
                format.write_value(out, state.covar[packed_index(i, j)])?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }

    /// Report rendered with `format`.
    pub fn report(&self, format: &NumberFormat) -> String {
        let mut out = String::new();
        match self.write_report(&mut out, format) {
            Ok(()) => out,
            Err(_) => {
                log::error!("cannot render report: covariance has no square layout");
                String::new()
            }
        }
    }
}

/// Positive and finite, with a square that neither underflows nor overflows.
fn is_usable_error(e: f64) -> bool {
    let sigsq = e * e;
    e > 0.0 && e.is_finite() && sigsq > 0.0 && sigsq.is_finite()
}

fn diagonal_state(errors: ArrayView1<f64>) -> CovarianceState {
    let n = errors.len();
    let mut covar = PackedCovariance::zeros(packed_len(n));
    let mut cholesky = PackedCovariance::zeros(packed_len(n));
    for (i, &e) in errors.iter().enumerate() {
        covar[diagonal_index(i)] = e * e;
        cholesky[diagonal_index(i)] = e;
    }
    CovarianceState { covar, cholesky }
}

impl fmt::Display for FunctionMinimum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, &NumberFormat::default())
    }
}

impl fmt::Debug for FunctionMinimum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionMinimum")
            .field("min_value", &self.min_value)
            .field("point", &self.point)
            .field("covariance", &self.covariance())
            .finish_non_exhaustive()
    }
}
