//! Element, row and column access for [`Matrix`].

use core::ops::{Index, IndexMut};

use crate::Scalar;
use crate::error::{CoreError, Result};

use super::Matrix;

impl<T: Scalar> Matrix<T> {
    fn check_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                index: vec![row, col],
                shape: vec![self.rows, self.cols],
            });
        }
        Ok(row * self.cols + col)
    }

    /// Get a reference to the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        let flat = self.check_index(row, col)?;
        Ok(&self.data[flat])
    }

    /// Set the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let flat = self.check_index(row, col)?;
        self.data[flat] = value;
        Ok(())
    }

    /// Borrow row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[T] {
        assert!(i < self.rows, "row {i} out of bounds for {} rows", self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy column `j` into a vector.
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    pub fn col(&self, j: usize) -> Vec<T> {
        assert!(j < self.cols, "column {j} out of bounds for {} columns", self.cols);
        (0..self.rows).map(|i| self.data[i * self.cols + j]).collect()
    }

    /// The main diagonal (length `min(rows, cols)`).
    pub fn diag(&self) -> Vec<T> {
        (0..self.rows.min(self.cols))
            .map(|i| self.data[i * self.cols + i])
            .collect()
    }
}

impl<T: Scalar> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &self.data[row * self.cols + col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &mut self.data[row * self.cols + col]
    }
}
