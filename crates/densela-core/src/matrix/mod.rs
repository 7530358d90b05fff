//! Dense two-dimensional matrix with contiguous row-major storage.
//!
//! [`Matrix`] is the container every algorithm in this crate consumes and
//! produces. Operations take `&Matrix` and return freshly allocated results;
//! nothing mutates a caller-owned matrix.

mod create;
mod display;
mod indexing;
mod ops;
mod shape;

use crate::Scalar;
use crate::error::{CoreError, Result};

/// A dense `rows x cols` matrix.
///
/// Data is stored contiguously in row-major (C) order. The matrix owns its
/// data and cloning performs a deep copy.
///
/// # Type Parameters
///
/// - `T`: The element type, which must implement [`Scalar`].
#[derive(Debug, Clone)]
pub struct Matrix<T: Scalar> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Scalar> Matrix<T> {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Create a matrix from row-major data.
    ///
    /// Returns an error if `rows * cols` does not equal `data.len()`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(CoreError::InvalidShape {
                shape: vec![rows, cols],
                reason: "rows * cols does not match data length",
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a slice of equally long rows.
    ///
    /// An empty slice yields a `0 x 0` matrix.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// let m = Matrix::from_rows(&[[2.0, 1.0], [0.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// ```
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(CoreError::InvalidShape {
                    shape: vec![n_rows, row.len()],
                    reason: "rows have different lengths",
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    /// Build from parts whose sizes the caller has already checked.
    pub(crate) fn from_parts(data: Vec<T>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the matrix has zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A flat slice of all elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// A mutable flat slice of all elements in row-major order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix and return the underlying `Vec<T>`.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Fail with [`CoreError::NotSquare`] unless the matrix is square.
    pub fn ensure_square(&self) -> Result<usize> {
        if self.is_square() {
            Ok(self.rows)
        } else {
            Err(CoreError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    // ------------------------------------------------------------------
    // Map / apply
    // ------------------------------------------------------------------

    /// Iterate over all elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Apply a function to every element, returning a new matrix.
    pub fn map<U, F>(&self, f: F) -> Matrix<U>
    where
        U: Scalar,
        F: Fn(T) -> U,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Apply a function element-wise to two matrices of the same shape.
    pub fn zip_map<F>(&self, other: &Matrix<T>, f: F) -> Result<Matrix<T>>
    where
        F: Fn(T, T) -> T,
    {
        if self.shape() != other.shape() {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.rows, self.cols],
                got: vec![other.rows, other.cols],
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            data,
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl<T: Scalar> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }
}
