//! Element-wise arithmetic operators and reductions for [`Matrix`].
//!
//! Implements `Add`, `Sub` for:
//! - `Matrix<T> op Matrix<T>` (element-wise, same shape)
//!
//! and `Mul`, `Div` for `Matrix<T> op T` (scalar broadcast), plus `Neg`.

use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::{CoreError, Float, Scalar};

use super::Matrix;

// ======================================================================
// Matrix + Matrix  (element-wise, same shape: panics on mismatch)
// ======================================================================

macro_rules! impl_matrix_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: Matrix<T>) -> Matrix<T> {
                (&self).$method(&rhs)
            }
        }

        impl<T: Scalar> $trait for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: &Matrix<T>) -> Matrix<T> {
                assert_eq!(
                    self.shape(), rhs.shape(),
                    "shape mismatch in element-wise {}: {:?} vs {:?}",
                    stringify!($method), self.shape(), rhs.shape(),
                );
                let data = self.data.iter()
                    .zip(rhs.data.iter())
                    .map(|(&a, &b)| a $op b)
                    .collect();
                Matrix::from_parts(data, self.rows, self.cols)
            }
        }
    };
}

impl_matrix_binop!(Add, add, +);
impl_matrix_binop!(Sub, sub, -);

// ======================================================================
// Matrix * scalar  (broadcast scalar to every element)
// ======================================================================

macro_rules! impl_scalar_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<T: Scalar> $trait<T> for Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                self.map(|a| a $op rhs)
            }
        }

        impl<T: Scalar> $trait<T> for &Matrix<T> {
            type Output = Matrix<T>;

            fn $method(self, rhs: T) -> Matrix<T> {
                self.map(|a| a $op rhs)
            }
        }
    };
}

impl_scalar_binop!(Mul, mul, *);
impl_scalar_binop!(Div, div, /);

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|a| -a)
    }
}

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|a| -a)
    }
}

// ======================================================================
// Fallible (Result-returning) arithmetic for non-panicking callers
// ======================================================================

impl<T: Scalar> Matrix<T> {
    /// Element-wise addition, returning `Err` on shape mismatch.
    pub fn add_checked(&self, other: &Matrix<T>) -> crate::Result<Matrix<T>> {
        self.zip_map(other, |a, b| a + b)
    }

    /// Element-wise subtraction, returning `Err` on shape mismatch.
    pub fn sub_checked(&self, other: &Matrix<T>) -> crate::Result<Matrix<T>> {
        self.zip_map(other, |a, b| a - b)
    }

    /// Sum of the diagonal entries.
    pub fn trace(&self) -> T {
        self.diag().into_iter().sum()
    }
}

// ======================================================================
// Reductions
// ======================================================================

impl<T: Float> Matrix<T> {
    /// Frobenius norm: `sqrt(sum(a_ij^2))`.
    pub fn frobenius_norm(&self) -> T {
        self.data.iter().map(|&x| x * x).sum::<T>().sqrt()
    }

    /// Largest absolute entry (zero for an empty matrix).
    pub fn max_abs(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }

    /// Mean of every column (length `cols`).
    ///
    /// An empty column set or zero rows gives zeros.
    pub fn column_means(&self) -> Vec<T> {
        let mut means = vec![T::zero(); self.cols];
        if self.rows == 0 {
            return means;
        }
        for i in 0..self.rows {
            for (m, &x) in means.iter_mut().zip(self.row(i)) {
                *m += x;
            }
        }
        let n = T::from_usize(self.rows);
        for m in &mut means {
            *m /= n;
        }
        means
    }

    /// Whether the matrix is square and `|a_ij - a_ji| <= tol` everywhere.
    pub fn is_symmetric(&self, tol: T) -> bool {
        self.is_symmetric_within(tol, T::zero())
    }

    /// Symmetry test in the `allclose` form: every off-diagonal pair must
    /// satisfy `|a_ij - a_ji| <= atol + rtol * |a_ji|`.
    pub fn is_symmetric_within(&self, atol: T, rtol: T) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.rows;
        (0..n).all(|i| {
            (0..n).all(|j| {
                let (a, b) = (self[(i, j)], self[(j, i)]);
                i == j || (a - b).abs() <= atol + rtol * b.abs()
            })
        })
    }

    /// Fail with [`CoreError::InvalidArgument`] if any entry is NaN or
    /// infinite.
    pub fn ensure_finite(&self) -> crate::Result<()> {
        if self.data.iter().all(|&x| x.is_finite()) {
            Ok(())
        } else {
            Err(CoreError::InvalidArgument {
                reason: "matrix contains NaN or infinite entries",
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn m2(data: [f64; 4]) -> Matrix<f64> {
        Matrix::from_vec(data.to_vec(), 2, 2).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = m2([1.0, 2.0, 3.0, 4.0]);
        let b = m2([10.0, 20.0, 30.0, 40.0]);
        assert_eq!((&a + &b).as_slice(), &[11.0, 22.0, 33.0, 44.0]);
        assert_eq!((b - a).as_slice(), &[9.0, 18.0, 27.0, 36.0]);
    }

    #[test]
    fn test_scalar_ops() {
        let a = m2([1.0, 2.0, 3.0, 4.0]);
        assert_eq!((&a * 2.0).as_slice(), &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!((a / 2.0).as_slice(), &[0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn test_neg() {
        let a = m2([1.0, -2.0, 3.0, 0.0]);
        assert_eq!((-a).as_slice(), &[-1.0, 2.0, -3.0, -0.0]);
    }

    #[test]
    fn test_checked_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<f64>::zeros(3, 2);
        assert!(a.sub_checked(&b).unwrap_err().is_shape_error());
        assert!(a.add_checked(&b).is_err());
    }

    #[test]
    #[should_panic(expected = "shape mismatch")]
    fn test_add_panics_on_mismatch() {
        let _ = Matrix::<f64>::zeros(2, 2) + Matrix::<f64>::zeros(1, 2);
    }

    #[test]
    fn test_frobenius_norm() {
        let a = m2([3.0, 4.0, 0.0, 0.0]);
        assert_eq!(a.frobenius_norm(), 5.0);
        assert_eq!(Matrix::<f64>::zeros(0, 0).frobenius_norm(), 0.0);
    }

    #[test]
    fn test_column_means() {
        let x = Matrix::from_rows(&[[1.0, 10.0], [3.0, 20.0], [5.0, 30.0]]).unwrap();
        assert_eq!(x.column_means(), vec![3.0, 20.0]);
    }

    #[test]
    fn test_is_symmetric() {
        assert!(m2([1.0, 2.0, 2.0, 1.0]).is_symmetric(0.0));
        assert!(!m2([1.0, 2.0, 2.1, 1.0]).is_symmetric(1e-10));
        assert!(m2([1.0, 2.0, 2.0 + 1e-12, 1.0]).is_symmetric(1e-10));
        assert!(!Matrix::<f64>::zeros(2, 3).is_symmetric(1.0));
    }

    #[test]
    fn test_is_symmetric_within_relative() {
        // |diff| = 1e-4 against entries near 100: outside atol, inside rtol
        let a = m2([1.0, 100.0, 100.0001, 1.0]);
        assert!(!a.is_symmetric(1e-10));
        assert!(a.is_symmetric_within(1e-10, 1e-5));
        assert!(!a.is_symmetric_within(1e-10, 1e-7));
        assert!(!Matrix::<f64>::zeros(3, 2).is_symmetric_within(1.0, 1.0));
    }

    #[test]
    fn test_ensure_finite() {
        assert!(m2([1.0, 2.0, 3.0, 4.0]).ensure_finite().is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                m2([1.0, bad, 3.0, 4.0]).ensure_finite(),
                Err(CoreError::InvalidArgument { .. })
            ));
        }
    }

    #[test]
    fn test_trace_and_max_abs() {
        let a = m2([1.0, -7.0, 2.0, 4.0]);
        assert_eq!(a.trace(), 5.0);
        assert_eq!(a.max_abs(), 7.0);
    }
}
