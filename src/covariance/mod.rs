//! covariance: packed symmetric storage and the Cholesky primitive.
//!
//! Purpose
//! -------
//! Hold the low-level linear algebra that fit results rely on: the packed
//! upper-triangular layout used for covariance matrices and an in-place
//! Cholesky factorization that either yields `U` with `UᵀU = C` or signals
//! that `C` is not positive definite.
//!
//! Key behaviors
//! -------------
//! - Index arithmetic for packed storage ([`packed_index`],
//!   [`diagonal_index`], [`packed_len`], [`packed_dim`]).
//! - Conversion between packed buffers and dense `nalgebra::DMatrix`
//!   values ([`unpack_symmetric`], [`pack_upper`]) plus the `UᵀU`
//!   reconstruction used in diagnostics ([`reconstruct_from_factor`]).
//! - A `dpptrf`-shaped primitive ([`factorize_packed_upper`]) behind the
//!   [`CholeskyBackend`] trait, with a packed default ([`PackedCholesky`])
//!   and a dense nalgebra backend ([`DenseCholesky`]).
//! - [`cholesky_decomposition`], returning `Ok(None)` for matrices that are
//!   not positive definite.
//!
//! Invariants & assumptions
//! ------------------------
//! - A packed buffer of length `L` describes an `n×n` matrix only when
//!   `L = n(n+1)/2`; any other length is a [`CovarianceError`].
//! - Factors share the packed layout of their input and carry a strictly
//!   positive diagonal.
//! - Inputs are never modified by [`cholesky_decomposition`]; the routine
//!   works on a copy.
//!
//! Conventions
//! -----------
//! - Element `(i, j)` with `i ≤ j` lives at `i + j(j+1)/2`; lower entries
//!   use the mirrored offset.
//! - Packed buffers are `ndarray::Array1<f64>` ([`PackedCovariance`]); dense
//!   matrices are `nalgebra::DMatrix<f64>`.
//!
//! Downstream usage
//! ----------------
//! - `minimum::FunctionMinimum` validates incoming covariances with
//!   [`cholesky_decomposition`] and samples with the stored factor.
//!
//! Testing notes
//! -------------
//! - Unit tests cover offset arithmetic, dimension recovery, hand-computed
//!   factors, pivot reporting, and backend agreement.

pub mod cholesky;
pub mod errors;
pub mod packed;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::cholesky::{
    CholeskyBackend, DenseCholesky, PackedCholesky, cholesky_decomposition,
    cholesky_decomposition_with, factorize_packed_upper,
};
pub use self::errors::{CovarianceError, CovarianceResult};
pub use self::packed::{
    PackedCovariance, diagonal_index, pack_upper, packed_diagonal, packed_dim, packed_index,
    packed_len, reconstruct_from_factor, unpack_symmetric, unpack_upper, verify_packed_len,
};

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::cholesky::{CholeskyBackend, cholesky_decomposition};
    pub use super::errors::{CovarianceError, CovarianceResult};
    pub use super::packed::{PackedCovariance, packed_dim, packed_index};
}
