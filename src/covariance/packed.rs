//! Packed upper-triangular storage for symmetric matrices.
//!
//! A symmetric `n×n` matrix is stored as its upper triangle in column-major
//! order: element `(i, j)` with `i ≤ j` lives at offset `i + j(j+1)/2`, and
//! `(i, j)` with `i > j` uses the mirrored offset. The full buffer holds
//! `n(n+1)/2` values. This is the layout LAPACK's packed routines
//! (`dpptrf` with `UPLO = 'U'`) consume, so it is treated as a stable
//! contract throughout the crate.
//!
//! Diagonal entries sit at `i(i+3)/2`; consecutive columns are contiguous,
//! so walking the buffer front to back visits `(0,0), (0,1), (1,1),
//! (0,2), (1,2), (2,2), …`.
use crate::covariance::errors::{CovarianceError, CovarianceResult};
use nalgebra::DMatrix;
use ndarray::{Array1, ArrayView1};

/// Packed symmetric (or upper-triangular) matrix in column-major order.
pub type PackedCovariance = Array1<f64>;

/// Offset of element `(i, j)` in packed storage.
///
/// Symmetric access: `(i, j)` and `(j, i)` map to the same slot.
#[inline]
pub fn packed_index(i: usize, j: usize) -> usize {
    if i <= j { i + j * (j + 1) / 2 } else { j + i * (i + 1) / 2 }
}

/// Offset of the `i`-th diagonal element, `i(i+3)/2`.
#[inline]
pub fn diagonal_index(i: usize) -> usize {
    i * (i + 3) / 2
}

/// Packed length `n(n+1)/2` for an `n×n` matrix.
#[inline]
pub fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Recover the matrix dimension `n` from a packed length.
///
/// # Errors
/// [`CovarianceError::NonTriangularLength`] when `len` is not `n(n+1)/2`
/// for any non-negative integer `n`.
pub fn packed_dim(len: usize) -> CovarianceResult<usize> {
    // floor(sqrt(1 + 8 len) / 2) is exact for triangular lengths; the
    // neighbour check guards against float rounding for large inputs.
    let guess = (0.5 * ((1 + 8 * len) as f64).sqrt()).floor() as usize;
    for n in [guess.saturating_sub(1), guess, guess + 1] {
        if packed_len(n) == len {
            return Ok(n);
        }
    }
    Err(CovarianceError::NonTriangularLength { len })
}

/// Diagonal of a packed symmetric matrix.
///
/// # Errors
/// Propagates [`packed_dim`] failures.
pub fn packed_diagonal(packed: ArrayView1<f64>) -> CovarianceResult<Array1<f64>> {
    let n = packed_dim(packed.len())?;
    Ok(Array1::from_iter((0..n).map(|i| packed[diagonal_index(i)])))
}

/// Expand packed storage into a dense symmetric `DMatrix`.
///
/// # Errors
/// Propagates [`packed_dim`] failures.
pub fn unpack_symmetric(packed: ArrayView1<f64>) -> CovarianceResult<DMatrix<f64>> {
    let n = packed_dim(packed.len())?;
    Ok(DMatrix::from_fn(n, n, |i, j| packed[packed_index(i, j)]))
}

/// Expand packed upper-triangular storage into a dense `DMatrix`, leaving
/// the strict lower triangle zero.
///
/// # Errors
/// Propagates [`packed_dim`] failures.
pub fn unpack_upper(packed: ArrayView1<f64>) -> CovarianceResult<DMatrix<f64>> {
    let n = packed_dim(packed.len())?;
    Ok(DMatrix::from_fn(n, n, |i, j| if i <= j { packed[packed_index(i, j)] } else { 0.0 }))
}

/// Pack the upper triangle of a square dense matrix.
///
/// Only entries with `i ≤ j` are read; the lower triangle is ignored.
///
/// # Errors
/// [`CovarianceError::NonSquareMatrix`] when `matrix` is not square.
pub fn pack_upper(matrix: &DMatrix<f64>) -> CovarianceResult<PackedCovariance> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(CovarianceError::NonSquareMatrix { rows, cols });
    }
    let mut packed = Array1::zeros(packed_len(cols));
    for j in 0..cols {
        for i in 0..=j {
            packed[packed_index(i, j)] = matrix[(i, j)];
        }
    }
    Ok(packed)
}

/// Rebuild `C = UᵀU` from a packed upper-triangular factor `U`.
///
/// # Errors
/// Propagates [`packed_dim`] failures.
pub fn reconstruct_from_factor(factor: ArrayView1<f64>) -> CovarianceResult<PackedCovariance> {
    let n = packed_dim(factor.len())?;
    let mut covar = Array1::zeros(factor.len());
    for j in 0..n {
        for i in 0..=j {
            // C[i,j] = Σ_{k ≤ i} U[k,i] U[k,j]
            let mut sum = 0.0;
            for k in 0..=i {
                sum += factor[packed_index(k, i)] * factor[packed_index(k, j)];
            }
            covar[packed_index(i, j)] = sum;
        }
    }
    Ok(covar)
}

/// Check that a packed buffer describes an `n×n` matrix.
///
/// # Errors
/// [`CovarianceError::PackedLengthMismatch`] when `len != n(n+1)/2`.
pub fn verify_packed_len(len: usize, dim: usize) -> CovarianceResult<()> {
    let expected = packed_len(dim);
    if len != expected {
        return Err(CovarianceError::PackedLengthMismatch { dim, expected, found: len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Offset arithmetic for packed column-major upper storage.
    // - Dimension recovery, including non-triangular lengths.
    // - Dense <-> packed conversion and the UᵀU reconstruction.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the packed offset formula and its symmetric mirror.
    //
    // Given
    // -----
    // - A 3×3 layout (6 slots).
    //
    // Expect
    // ------
    // - Storage order (0,0),(0,1),(1,1),(0,2),(1,2),(2,2) maps to 0..6.
    // - (i,j) and (j,i) share a slot; diagonals are at i(i+3)/2.
    fn packed_index_follows_column_major_upper_layout() {
        let order = [(0, 0), (0, 1), (1, 1), (0, 2), (1, 2), (2, 2)];
        for (slot, &(i, j)) in order.iter().enumerate() {
            assert_eq!(packed_index(i, j), slot);
            assert_eq!(packed_index(j, i), slot);
        }
        assert_eq!(diagonal_index(0), 0);
        assert_eq!(diagonal_index(1), 2);
        assert_eq!(diagonal_index(2), 5);
    }

    #[test]
    // Purpose
    // -------
    // Check dimension recovery from packed lengths.
    //
    // Given
    // -----
    // - Triangular lengths 0, 1, 3, 6, 5050 and non-triangular 2, 4, 7.
    //
    // Expect
    // ------
    // - Triangular lengths recover n; others return NonTriangularLength.
    fn packed_dim_recovers_dimension_or_rejects_length() {
        assert_eq!(packed_dim(0), Ok(0));
        assert_eq!(packed_dim(1), Ok(1));
        assert_eq!(packed_dim(3), Ok(2));
        assert_eq!(packed_dim(6), Ok(3));
        assert_eq!(packed_dim(5050), Ok(100));
        for len in [2, 4, 7] {
            assert_eq!(packed_dim(len), Err(CovarianceError::NonTriangularLength { len }));
        }
    }

    #[test]
    // Purpose
    // -------
    // Round-trip a symmetric matrix through dense and packed forms.
    //
    // Given
    // -----
    // - Packed [4, 1, 9] describing [[4, 1], [1, 9]].
    //
    // Expect
    // ------
    // - unpack_symmetric mirrors the off-diagonal; pack_upper restores
    //   the packed buffer; the diagonal is [4, 9].
    fn unpack_and_pack_preserve_symmetric_entries() {
        let packed = array![4.0, 1.0, 9.0];

        let dense = unpack_symmetric(packed.view()).unwrap();
        assert_eq!(dense[(0, 0)], 4.0);
        assert_eq!(dense[(0, 1)], 1.0);
        assert_eq!(dense[(1, 0)], 1.0);
        assert_eq!(dense[(1, 1)], 9.0);

        assert_eq!(pack_upper(&dense).unwrap(), packed);
        assert_eq!(packed_diagonal(packed.view()).unwrap(), array![4.0, 9.0]);
    }

    #[test]
    // Purpose
    // -------
    // Reject non-square input to pack_upper.
    //
    // Given
    // -----
    // - A 2×3 dense matrix.
    //
    // Expect
    // ------
    // - NonSquareMatrix { rows: 2, cols: 3 }.
    fn pack_upper_rejects_non_square_matrix() {
        let m = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(pack_upper(&m), Err(CovarianceError::NonSquareMatrix { rows: 2, cols: 3 }));
    }

    #[test]
    // Purpose
    // -------
    // Verify UᵀU reconstruction for a hand-computed factor.
    //
    // Given
    // -----
    // - U = [[2, 0.5], [0, sqrt(8.75)]] packed as [2, 0.5, sqrt(8.75)].
    //
    // Expect
    // ------
    // - UᵀU = [[4, 1], [1, 9]], i.e. packed [4, 1, 9].
    fn reconstruct_from_factor_multiplies_transpose_by_factor() {
        let factor = array![2.0, 0.5, 8.75_f64.sqrt()];
        let covar = reconstruct_from_factor(factor.view()).unwrap();
        approx::assert_relative_eq!(covar[0], 4.0, epsilon = 1e-12);
        approx::assert_relative_eq!(covar[1], 1.0, epsilon = 1e-12);
        approx::assert_relative_eq!(covar[2], 9.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Length verification against an explicit dimension.
    //
    // Given
    // -----
    // - dim = 3 (expects 6 slots) with lengths 6 and 5.
    //
    // Expect
    // ------
    // - 6 passes; 5 yields PackedLengthMismatch.
    fn verify_packed_len_checks_against_dimension() {
        assert!(verify_packed_len(6, 3).is_ok());
        assert_eq!(
            verify_packed_len(5, 3),
            Err(CovarianceError::PackedLengthMismatch { dim: 3, expected: 6, found: 5 })
        );
    }
}
