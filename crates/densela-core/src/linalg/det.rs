//! Determinant by recursive Laplace (cofactor) expansion.
//!
//! The expansion runs along the first row and costs O(n!), so it is only
//! practical for small matrices. [`det`](crate::linalg::det) computes the same
//! value in O(n^3) through an LU factorization.

use tracing::debug;

use crate::Float;
use crate::error::Result;
use crate::matrix::Matrix;

/// Determinant of a square matrix by cofactor expansion along row 0.
///
/// - `0 x 0` gives `1` (empty product).
/// - `1 x 1` and `2 x 2` use the closed forms.
/// - Larger matrices sum `(-1)^j * a_0j * det(minor(0, j))`, skipping
///   terms with `a_0j == 0`.
///
/// Returns [`CoreError::NotSquare`](crate::CoreError::NotSquare) for
/// rectangular input.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::det_recursive;
/// let a = Matrix::from_rows(&[[2.0_f64, 1.0, 3.0], [0.0, 4.0, 5.0], [7.0, 2.0, 1.0]]).unwrap();
/// assert!((det_recursive(&a).unwrap() + 61.0).abs() < 1e-12);
/// ```
pub fn det_recursive<T: Float>(a: &Matrix<T>) -> Result<T> {
    let n = a.ensure_square()?;
    debug!(n, "determinant by cofactor expansion");
    Ok(cofactor_expansion(a))
}

#[allow(clippy::float_cmp)]
fn cofactor_expansion<T: Float>(a: &Matrix<T>) -> T {
    match a.rows() {
        0 => T::one(),
        1 => a[(0, 0)],
        2 => a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)],
        n => {
            let mut det = T::zero();
            for j in 0..n {
                let a0j = a[(0, j)];
                if a0j == T::zero() {
                    continue;
                }
                let term = a0j * cofactor_expansion(&a.minor(0, j));
                if j % 2 == 0 {
                    det += term;
                } else {
                    det -= term;
                }
            }
            det
        }
    }
}
