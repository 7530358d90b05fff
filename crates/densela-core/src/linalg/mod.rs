//! Linear algebra operations.
//!
//! All routines are implemented from scratch, with no external BLAS/LAPACK
//! bindings.
//!
//! | Level | Operations | Complexity |
//! |-------|-----------|------------|
//! | L1 | `dot`, `nrm2` | O(n) |
//! | L2 | `gemv` (matrix-vector multiply) | O(n^2) |
//! | L3 | `gemm` (matrix-matrix multiply) | O(n^3) |
//!
//! Decompositions: [`LuDecomposition`], [`SymmetricEigen`],
//! [`GeneralEigen`], [`SvdDecomposition`]. [`reconstruction_errors`]
//! compares all three factorization families on one matrix.

pub mod blas;
pub mod decomp;
mod det;
mod reconstruct;

pub use blas::{dot, gemm, gemv, nrm2};
pub use decomp::{
    Eigen, GeneralEigen, LuDecomposition, SvdDecomposition, SvdMethod, SymmetricEigen,
    svd_via_eig, svd_via_eig_error,
};
pub use det::det_recursive;
pub use reconstruct::{ReconstructionErrors, reconstruction_errors, reconstruction_errors_with};

use crate::Float;
use crate::error::Result;
use crate::matrix::Matrix;

/// Solve the linear system `Ax = b` for a square matrix `A`.
///
/// Uses LU decomposition with partial pivoting internally. Fails with
/// [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) when a
/// pivot column is below tolerance.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg;
/// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 4.0]]).unwrap();
/// let x = linalg::solve(&a, &[5.0, 6.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-10);
/// assert!((x[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve<T: Float>(a: &Matrix<T>, b: &[T]) -> Result<Vec<T>> {
    LuDecomposition::decompose(a)?.solve(b)
}

/// Compute the inverse of a square matrix.
///
/// Uses LU decomposition with partial pivoting internally.
/// Returns [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) if the
/// matrix is singular.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg;
/// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 4.0]]).unwrap();
/// let inv = linalg::inv(&a).unwrap();
/// // A * A^-1 ≈ I
/// let eye = a.matmul(&inv).unwrap();
/// assert!((eye[(0, 0)] - 1.0).abs() < 1e-10);
/// ```
pub fn inv<T: Float>(a: &Matrix<T>) -> Result<Matrix<T>> {
    LuDecomposition::decompose(a)?.inverse()
}

/// Compute the determinant of a square matrix as `sign(P) * prod(diag(U))`.
///
/// Uses LU decomposition with partial pivoting internally. A singular
/// matrix gives (approximately) zero rather than an error.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg;
/// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 4.0]]).unwrap();
/// let det = linalg::det(&a).unwrap();
/// assert!((det - 7.0).abs() < 1e-10);
/// ```
pub fn det<T: Float>(a: &Matrix<T>) -> Result<T> {
    Ok(LuDecomposition::decompose(a)?.det())
}
