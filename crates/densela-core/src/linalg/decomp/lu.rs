//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (stored as a row-index vector)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular
//!
//! A column whose largest remaining entry is below the pivot tolerance is
//! structurally singular. By default it is skipped: no swap, no elimination,
//! and the factorization is only approximate. With
//! [`LinalgConfig::strict_pivoting`] the decomposition fails instead.

use tracing::{debug, instrument, warn};

use crate::Float;
use crate::config::LinalgConfig;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Result of an LU decomposition with partial pivoting.
#[derive(Debug, Clone)]
pub struct LuDecomposition<T: Float> {
    /// Unit lower-triangular factor, row-major n x n.
    l: Vec<T>,
    /// Upper factor, row-major n x n. Below a skipped pivot the original
    /// (sub-tolerance) entries are left in place.
    u: Vec<T>,
    /// `perm[i]` is the row of `A` that ended up in row `i` of `PA`.
    perm: Vec<usize>,
    /// Number of row interchanges performed.
    swap_count: usize,
    /// Columns skipped as structurally singular.
    skipped: Vec<usize>,
    /// Matrix dimension (n x n).
    n: usize,
}

impl<T: Float> LuDecomposition<T> {
    /// Perform LU decomposition with the default pivot tolerance (`1e-12`).
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::LuDecomposition;
    /// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 4.0]]).unwrap();
    /// let lu = LuDecomposition::decompose(&a).unwrap();
    /// assert!((lu.det() - 7.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        Self::decompose_with(a, &LinalgConfig::default())
    }

    /// Perform LU decomposition using `config.pivot_tolerance` and
    /// `config.strict_pivoting`.
    #[instrument(level = "debug", skip_all, fields(n = a.rows()))]
    pub fn decompose_with(a: &Matrix<T>, config: &LinalgConfig) -> Result<Self> {
        let n = a.ensure_square()?;
        let tol = T::from_f64(config.pivot_tolerance);

        let mut u: Vec<T> = a.as_slice().to_vec();
        let mut l = vec![T::zero(); n * n];
        for i in 0..n {
            l[i * n + i] = T::one();
        }
        let mut perm: Vec<usize> = (0..n).collect();
        let mut swap_count = 0;
        let mut skipped = Vec::new();

        for k in 0..n {
            // Find pivot: row with largest |u[i, k]| for i >= k
            let mut max_val = u[k * n + k].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = u[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val < tol {
                if config.strict_pivoting {
                    return Err(CoreError::SingularMatrix { column: k });
                }
                warn!(column = k, pivot = %max_val, "pivot below tolerance, column left uneliminated");
                skipped.push(k);
                continue;
            }

            if max_row != k {
                for j in 0..n {
                    u.swap(k * n + j, max_row * n + j);
                }
                // L entries computed so far were filled in the pre-swap order.
                for j in 0..k {
                    l.swap(k * n + j, max_row * n + j);
                }
                perm.swap(k, max_row);
                swap_count += 1;
            }

            let pivot = u[k * n + k];
            for i in (k + 1)..n {
                let factor = if pivot.abs() < tol {
                    T::zero()
                } else {
                    u[i * n + k] / pivot
                };
                l[i * n + k] = factor;
                for j in (k + 1)..n {
                    let ukj = u[k * n + j];
                    u[i * n + j] -= factor * ukj;
                }
                u[i * n + k] = T::zero();
            }
        }

        debug!(swap_count, skipped = ?skipped, "LU factorization complete");

        Ok(Self {
            l,
            u,
            perm,
            swap_count,
            skipped,
            n,
        })
    }

    /// Matrix dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The unit lower-triangular factor `L`.
    pub fn l(&self) -> Matrix<T> {
        Matrix::from_parts(self.l.clone(), self.n, self.n)
    }

    /// The upper-triangular factor `U`.
    pub fn u(&self) -> Matrix<T> {
        Matrix::from_parts(self.u.clone(), self.n, self.n)
    }

    /// The permutation matrix `P` with `PA = LU`.
    pub fn p(&self) -> Matrix<T> {
        let n = self.n;
        let mut data = vec![T::zero(); n * n];
        for (i, &pi) in self.perm.iter().enumerate() {
            data[i * n + pi] = T::one();
        }
        Matrix::from_parts(data, n, n)
    }

    /// The permutation in row-index form: row `i` of `PA` is row
    /// `permutation()[i]` of `A`.
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Number of row interchanges performed.
    pub fn swap_count(&self) -> usize {
        self.swap_count
    }

    /// `det(P)`: `+1` for an even number of swaps, `-1` for odd.
    pub fn sign(&self) -> T {
        if self.swap_count % 2 == 0 {
            T::one()
        } else {
            -T::one()
        }
    }

    /// Columns that were skipped because their pivot was below tolerance.
    pub fn skipped_columns(&self) -> &[usize] {
        &self.skipped
    }

    /// Whether every column was pivoted, i.e. `PA = LU` holds to rounding.
    pub fn is_exact(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Determinant from the factorization: `sign(P) * prod(diag(U))`.
    pub fn det(&self) -> T {
        let n = self.n;
        let mut d = self.sign();
        for i in 0..n {
            d *= self.u[i * n + i];
        }
        d
    }

    /// Rebuild `A` as `P^T L U`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let n = self.n;
        let mut out = vec![T::zero(); n * n];
        for i in 0..n {
            // Row i of LU is row perm[i] of A.
            let dst = self.perm[i];
            for j in 0..n {
                // L is unit lower triangular. U is not assumed upper
                // triangular: it may hold sub-tolerance entries below a
                // skipped pivot.
                let mut sum = T::zero();
                for p in 0..=i {
                    sum += self.l[i * n + p] * self.u[p * n + j];
                }
                out[dst * n + j] = sum;
            }
        }
        Matrix::from_parts(out, n, n)
    }

    /// Solve the linear system `Ax = b` using the precomputed factorization.
    ///
    /// Fails with [`CoreError::SingularMatrix`] if any column was skipped.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        if let Some(&column) = self.skipped.first() {
            return Err(CoreError::SingularMatrix { column });
        }
        if b.len() != self.n {
            return Err(CoreError::DimensionMismatch {
                expected: vec![self.n],
                got: vec![b.len()],
            });
        }

        let n = self.n;

        // Apply permutation: Pb
        let mut x: Vec<T> = self.perm.iter().map(|&pi| b[pi]).collect();

        // Forward substitution: Ly = Pb
        #[allow(clippy::needless_range_loop)]
        for i in 1..n {
            for j in 0..i {
                let lij_xj = self.l[i * n + j] * x[j];
                x[i] -= lij_xj;
            }
        }

        // Back substitution: Ux = y
        #[allow(clippy::needless_range_loop)]
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let uij_xj = self.u[i * n + j] * x[j];
                x[i] -= uij_xj;
            }
            x[i] /= self.u[i * n + i];
        }

        Ok(x)
    }

    /// Compute the inverse matrix by solving `AX = I` column by column.
    pub fn inverse(&self) -> Result<Matrix<T>> {
        let n = self.n;
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![T::zero(); n];

        for col in 0..n {
            e.fill(T::zero());
            e[col] = T::one();
            let x = self.solve(&e)?;
            for (row, &v) in x.iter().enumerate() {
                inv[(row, col)] = v;
            }
        }

        Ok(inv)
    }
}
