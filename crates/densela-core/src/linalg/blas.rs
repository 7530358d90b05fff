//! BLAS Level 1–3 operations on slices and [`Matrix`].
//!
//! All functions validate shapes, returning [`Result`] on dimension
//! mismatches.

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;
use crate::{Float, Scalar};

// ======================================================================
// BLAS Level 1: vector operations, O(n)
// ======================================================================

/// Inner (dot) product of two vectors: `sum(x_i * y_i)`.
///
/// ```
/// # use densela_core::linalg::dot;
/// let d = dot(&[1.0_f64, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert!((d - 32.0).abs() < 1e-10);
/// ```
pub fn dot<T: Scalar>(x: &[T], y: &[T]) -> Result<T> {
    if x.len() != y.len() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![x.len()],
            got: vec![y.len()],
        });
    }
    Ok(x.iter().zip(y).map(|(&a, &b)| a * b).sum())
}

/// Euclidean norm (L2 norm) of a vector: `sqrt(sum(x_i^2))`.
pub fn nrm2<T: Float>(x: &[T]) -> T {
    x.iter().map(|&v| v * v).sum::<T>().sqrt()
}

// ======================================================================
// BLAS Level 2: matrix-vector operations, O(n^2)
// ======================================================================

/// General matrix-vector multiply: `y = alpha * A * x + beta * y`.
///
/// - `a` has shape `[m, n]`.
/// - `x` must have length `n`.
/// - `y` must have length `m`.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::gemv;
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let mut y = [0.0; 2];
/// gemv(1.0, &a, &[5.0, 6.0], 0.0, &mut y).unwrap();
/// assert_eq!(y, [17.0, 39.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemv<T: Scalar>(alpha: T, a: &Matrix<T>, x: &[T], beta: T, y: &mut [T]) -> Result<()> {
    let (m, n) = a.shape();

    if x.len() != n {
        return Err(CoreError::DimensionMismatch {
            expected: vec![n],
            got: vec![x.len()],
        });
    }
    if y.len() != m {
        return Err(CoreError::DimensionMismatch {
            expected: vec![m],
            got: vec![y.len()],
        });
    }

    for (i, yi) in y.iter_mut().enumerate() {
        let sum: T = a.row(i).iter().zip(x).map(|(&aij, &xj)| aij * xj).sum();
        *yi = alpha * sum + beta * *yi;
    }

    Ok(())
}

// ======================================================================
// BLAS Level 3: matrix-matrix operations, O(n^3)
// ======================================================================

/// General matrix-matrix multiply: `C = alpha * A * B + beta * C`.
///
/// - `a` has shape `[m, k]`.
/// - `b` must have shape `[k, n]`.
/// - `c` must have shape `[m, n]`.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::gemm;
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
/// let mut c = Matrix::<f64>::zeros(2, 2);
/// gemm(1.0, &a, &b, 0.0, &mut c).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemm<T: Scalar>(
    alpha: T,
    a: &Matrix<T>,
    b: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) -> Result<()> {
    let (m, k) = a.shape();
    let n = b.cols();

    if b.rows() != k {
        return Err(CoreError::DimensionMismatch {
            expected: vec![k, n],
            got: vec![b.rows(), b.cols()],
        });
    }
    if c.shape() != (m, n) {
        return Err(CoreError::DimensionMismatch {
            expected: vec![m, n],
            got: vec![c.rows(), c.cols()],
        });
    }

    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let c_data = c.as_mut_slice();

    // ijk loop order (row-major friendly for A and C)
    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            let a_row = i * k;
            for p in 0..k {
                sum += a_data[a_row + p] * b_data[p * n + j];
            }
            let c_idx = i * n + j;
            c_data[c_idx] = alpha * sum + beta * c_data[c_idx];
        }
    }

    Ok(())
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl<T: Scalar> Matrix<T> {
    /// Matrix-vector multiply: returns `A @ x`.
    pub fn matvec(&self, x: &[T]) -> Result<Vec<T>> {
        let mut y = vec![T::zero(); self.rows()];
        gemv(T::one(), self, x, T::zero(), &mut y)?;
        Ok(y)
    }

    /// Matrix-matrix multiply: returns `self @ other`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
    /// let b = Matrix::from_rows(&[[1.0], [1.0], [1.0]]).unwrap();
    /// assert_eq!(a.matmul(&b).unwrap().as_slice(), &[6.0]);
    /// assert!(b.matmul(&b).is_err());
    /// ```
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        let mut c = Matrix::zeros(self.rows(), other.cols());
        gemm(T::one(), self, other, T::zero(), &mut c)?;
        Ok(c)
    }
}
