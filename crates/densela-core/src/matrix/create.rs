//! Matrix creation functions analogous to `np.zeros`, `np.eye`, etc.

use crate::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Create a matrix filled with zeros.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::<f64>::zeros(2, 3);
    /// assert_eq!(m.shape(), (2, 3));
    /// assert!(m.iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::full(rows, cols, T::zero())
    }

    /// Create a matrix filled with a constant value.
    pub fn full(rows: usize, cols: usize, value: T) -> Self {
        Self::from_parts(vec![value; rows * cols], rows, cols)
    }

    /// Create an identity matrix of size `n x n`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let eye = Matrix::<f64>::eye(3);
    /// assert_eq!(eye[(0, 0)], 1.0);
    /// assert_eq!(eye[(0, 1)], 0.0);
    /// ```
    pub fn eye(n: usize) -> Self {
        let mut data = vec![T::zero(); n * n];
        for i in 0..n {
            data[i * n + i] = T::one();
        }
        Self::from_parts(data, n, n)
    }

    /// Create a square diagonal matrix from its diagonal entries.
    pub fn from_diag(diag: &[T]) -> Self {
        let n = diag.len();
        let mut data = vec![T::zero(); n * n];
        for (i, &d) in diag.iter().enumerate() {
            data[i * n + i] = d;
        }
        Self::from_parts(data, n, n)
    }

    /// Create a matrix whose `(i, j)` entry is `f(i, j)`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let hilbert = Matrix::from_fn(3, 3, |i, j| 1.0 / (i + j + 1) as f64);
    /// assert_eq!(hilbert[(2, 2)], 0.2);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self::from_parts(data, rows, cols)
    }
}
