//! Cholesky factorization of packed symmetric matrices.
//!
//! The primitive mirrors LAPACK `dpptrf` with `UPLO = 'U'`: it overwrites a
//! packed upper triangle in place with `U` such that `UᵀU = C`, and returns
//! an integer status (`0` on success, `k > 0` when the leading minor of
//! order `k` is not positive definite).
//!
//! Two backends implement [`CholeskyBackend`]:
//! - [`PackedCholesky`]: column-by-column routine working directly on packed
//!   storage. Default for the crate.
//! - [`DenseCholesky`]: unpacks into `nalgebra::DMatrix`, factorizes with
//!   `nalgebra::linalg::Cholesky`, and repacks `U = Lᵀ`.
//!
//! A matrix that is not positive definite is a routine outcome, reported as
//! `Ok(None)` by [`cholesky_decomposition`]. Only a packed length that is
//! not triangular is an error.
use crate::covariance::{
    errors::CovarianceResult,
    packed::{PackedCovariance, pack_upper, packed_dim, unpack_symmetric},
};
use nalgebra::linalg::Cholesky;
use ndarray::ArrayView1;

/// Backend able to factorize a packed upper triangle in place.
pub trait CholeskyBackend {
    /// Overwrite `ap` (packed upper, length `n(n+1)/2`) with its Cholesky
    /// factor `U`.
    ///
    /// # Returns
    /// `0` on success; a positive 1-based pivot index on failure. On
    /// failure the contents of `ap` are unspecified.
    fn factorize(&self, ap: &mut [f64], n: usize) -> i32;
}

/// Portable packed-storage backend built on [`factorize_packed_upper`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackedCholesky;

impl CholeskyBackend for PackedCholesky {
    fn factorize(&self, ap: &mut [f64], n: usize) -> i32 {
        factorize_packed_upper(ap, n)
    }
}

/// Dense backend delegating to `nalgebra::linalg::Cholesky`.
///
/// nalgebra does not expose the failing pivot, so a failure is reported as
/// status `n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenseCholesky;

impl CholeskyBackend for DenseCholesky {
    fn factorize(&self, ap: &mut [f64], n: usize) -> i32 {
        let dense = match unpack_symmetric(ArrayView1::from(&*ap)) {
            Ok(m) if m.nrows() == n => m,
            _ => return n.max(1) as i32,
        };
        let Some(chol) = Cholesky::new(dense) else {
            log::trace!("dense Cholesky rejected {n}x{n} matrix");
            return n.max(1) as i32;
        };
        let upper = chol.l().transpose();
        match pack_upper(&upper) {
            Ok(packed) => {
                for (dst, src) in ap.iter_mut().zip(packed.iter()) {
                    *dst = *src;
                }
                0
            }
            Err(_) => n.max(1) as i32,
        }
    }
}

/// In-place Cholesky factorization of a packed upper triangle.
///
/// Purpose
/// -------
/// Compute `U` with strictly positive diagonal such that `UᵀU = C`, where
/// `C` is the symmetric matrix whose upper triangle `ap` stores in
/// column-major packed order.
///
/// Parameters
/// ----------
/// - `ap`: packed upper triangle of length `n(n+1)/2`, overwritten with `U`.
/// - `n`: matrix order.
///
/// Returns
/// -------
/// `0` on success. `j + 1` when the pivot of column `j` is `≤ 0` or NaN; the
/// columns before `j` then already hold their factor entries.
///
/// Panics
/// ------
/// - If `ap.len() < n(n+1)/2`.
///
/// Notes
/// -----
/// Each column is finished before the next one is read, so the walk over
/// `ap` is a single forward pass.
pub fn factorize_packed_upper(ap: &mut [f64], n: usize) -> i32 {
    let mut jc = 0;
    for j in 0..n {
        let mut ic = 0;
        for i in 0..j {
            let mut sum = ap[jc + i];
            for k in 0..i {
                sum -= ap[ic + k] * ap[jc + k];
            }
            ap[jc + i] = sum / ap[ic + i];
            ic += i + 1;
        }

        let mut ajj = ap[jc + j];
        for k in 0..j {
            ajj -= ap[jc + k] * ap[jc + k];
        }
        if ajj <= 0.0 || ajj.is_nan() {
            ap[jc + j] = ajj;
            log::trace!("packed Cholesky failed at pivot {} (ajj = {ajj})", j + 1);
            return (j + 1) as i32;
        }
        ap[jc + j] = ajj.sqrt();
        jc += j + 1;
    }
    0
}

/// Factorize a packed symmetric matrix with the default backend.
///
/// # Returns
/// - `Ok(Some(U))`: packed upper factor with `UᵀU = covar`.
/// - `Ok(None)`: `covar` is not positive definite.
///
/// # Errors
/// [`CovarianceError::NonTriangularLength`](crate::covariance::CovarianceError)
/// when `covar.len()` is not `n(n+1)/2`.
pub fn cholesky_decomposition(covar: ArrayView1<f64>) -> CovarianceResult<Option<PackedCovariance>> {
    cholesky_decomposition_with(covar, &PackedCholesky)
}

/// Factorize a packed symmetric matrix with an explicit backend.
///
/// The input is copied; `covar` itself is never modified.
///
/// # Errors
/// Same as [`cholesky_decomposition`].
pub fn cholesky_decomposition_with<B: CholeskyBackend + ?Sized>(
    covar: ArrayView1<f64>, backend: &B,
) -> CovarianceResult<Option<PackedCovariance>> {
    let n = packed_dim(covar.len())?;
    let mut ap = covar.to_vec();
    if backend.factorize(&mut ap, n) != 0 {
        return Ok(None);
    }
    Ok(Some(PackedCovariance::from(ap)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::covariance::{CovarianceError, packed::reconstruct_from_factor};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The packed dpptrf-style routine on accepted and rejected inputs.
    // - Agreement between the packed and dense (nalgebra) backends.
    // - The Option-returning wrapper and its structural error.
    //
    // They intentionally do NOT cover:
    // - Sampling with the factor (see `minimum::function_minimum`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Factorize the 2×2 matrix [[4, 1], [1, 9]] by hand.
    //
    // Given
    // -----
    // - Packed covariance [4, 1, 9].
    //
    // Expect
    // ------
    // - Status 0 and U = [2, 0.5, sqrt(8.75)].
    fn factorize_packed_upper_matches_hand_computation() {
        // Arrange
        let mut ap = [4.0, 1.0, 9.0];

        // Act
        let status = factorize_packed_upper(&mut ap, 2);

        // Assert
        assert_eq!(status, 0);
        assert_relative_eq!(ap[0], 2.0, epsilon = 1e-15);
        assert_relative_eq!(ap[1], 0.5, epsilon = 1e-15);
        assert_relative_eq!(ap[2], 8.75_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Report the failing pivot for an indefinite matrix.
    //
    // Given
    // -----
    // - Packed [1, 2, 1] (det = -3) and packed [-1, 0, 1].
    //
    // Expect
    // ------
    // - Status 2 for the first (second pivot fails), 1 for the second.
    fn factorize_packed_upper_reports_failing_pivot() {
        let mut indefinite = [1.0, 2.0, 1.0];
        assert_eq!(factorize_packed_upper(&mut indefinite, 2), 2);

        let mut negative_lead = [-1.0, 0.0, 1.0];
        assert_eq!(factorize_packed_upper(&mut negative_lead, 2), 1);
    }

    #[test]
    // Purpose
    // -------
    // NaN pivots are treated as failures rather than propagated.
    //
    // Given
    // -----
    // - Packed [NaN].
    //
    // Expect
    // ------
    // - Status 1 and cholesky_decomposition returns Ok(None).
    fn nan_pivot_is_rejected() {
        let mut ap = [f64::NAN];
        assert_eq!(factorize_packed_upper(&mut ap, 1), 1);
        assert_eq!(cholesky_decomposition(array![f64::NAN].view()), Ok(None));
    }

    #[test]
    // Purpose
    // -------
    // The wrapper returns a factor reproducing the input and leaves the
    // input untouched.
    //
    // Given
    // -----
    // - A 3×3 SPD matrix [[4, 2, 0.4], [2, 5, 1], [0.4, 1, 3]].
    //
    // Expect
    // ------
    // - Some(U) with UᵀU ≈ C element-wise; input unchanged.
    fn cholesky_decomposition_reconstructs_input() {
        // Arrange
        let covar = array![4.0, 2.0, 5.0, 0.4, 1.0, 3.0];
        let before = covar.clone();

        // Act
        let factor = cholesky_decomposition(covar.view()).unwrap().unwrap();
        let rebuilt = reconstruct_from_factor(factor.view()).unwrap();

        // Assert
        assert_eq!(covar, before);
        for (a, b) in rebuilt.iter().zip(covar.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Packed and dense backends agree on accepted and rejected inputs.
    //
    // Given
    // -----
    // - The SPD 3×3 matrix above and the indefinite [1, 2, 1].
    //
    // Expect
    // ------
    // - Identical factors (to 1e-12) for the SPD input; both return None
    //   for the indefinite one.
    fn packed_and_dense_backends_agree() {
        let covar = array![4.0, 2.0, 5.0, 0.4, 1.0, 3.0];
        let packed = cholesky_decomposition_with(covar.view(), &PackedCholesky).unwrap().unwrap();
        let dense = cholesky_decomposition_with(covar.view(), &DenseCholesky).unwrap().unwrap();
        for (a, b) in packed.iter().zip(dense.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }

        let indefinite = array![1.0, 2.0, 1.0];
        assert_eq!(cholesky_decomposition_with(indefinite.view(), &PackedCholesky), Ok(None));
        assert_eq!(cholesky_decomposition_with(indefinite.view(), &DenseCholesky), Ok(None));
    }

    #[test]
    // Purpose
    // -------
    // A non-triangular packed length is an internal-consistency error.
    //
    // Given
    // -----
    // - A buffer of length 4.
    //
    // Expect
    // ------
    // - Err(NonTriangularLength { len: 4 }).
    fn cholesky_decomposition_rejects_non_triangular_length() {
        let covar = array![1.0, 0.0, 1.0, 0.0];
        assert_eq!(
            cholesky_decomposition(covar.view()),
            Err(CovarianceError::NonTriangularLength { len: 4 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The empty matrix factorizes trivially.
    //
    // Given
    // -----
    // - A zero-length packed buffer.
    //
    // Expect
    // ------
    // - Ok(Some(empty)).
    fn empty_matrix_factorizes_to_empty_factor() {
        let covar = PackedCovariance::zeros(0);
        let factor = cholesky_decomposition(covar.view()).unwrap().unwrap();
        assert!(factor.is_empty());
    }
}
