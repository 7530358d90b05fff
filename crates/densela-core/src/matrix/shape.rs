//! Shape manipulation: transpose, minors and row swaps.

use crate::Scalar;

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Transpose the matrix. Returns a new matrix with copied data.
    pub fn transpose(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        let mut data = vec![T::zero(); self.data.len()];

        for r in 0..rows {
            for c in 0..cols {
                data[c * rows + r] = self.data[r * cols + c];
            }
        }

        Matrix::from_parts(data, cols, rows)
    }

    /// Copy of the matrix without row `row` and column `col`.
    ///
    /// This is the submatrix whose determinant is the `(row, col)` minor.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
    /// let m = a.minor(0, 1);
    /// assert_eq!(m.as_slice(), &[4.0, 6.0, 7.0, 9.0]);
    /// ```
    pub fn minor(&self, row: usize, col: usize) -> Self {
        assert!(
            row < self.rows && col < self.cols,
            "minor ({row}, {col}) out of bounds for {}x{}",
            self.rows,
            self.cols
        );
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != row) {
            for c in (0..self.cols).filter(|&c| c != col) {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Matrix::from_parts(data, self.rows - 1, self.cols - 1)
    }

    /// Swap rows `a` and `b` in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    /// Copy of the first `n` rows.
    pub fn top_rows(&self, n: usize) -> Self {
        let n = n.min(self.rows);
        Matrix::from_parts(self.data[..n * self.cols].to_vec(), n, self.cols)
    }
}
