//! Singular Value Decomposition (SVD).
//!
//! Decomposes a matrix `A` (m x n) into the thin form `A = U S V^T` where,
//! with `r = min(m, n)`:
//! - `U` is m x r with orthonormal columns
//! - `S` is diagonal with non-negative entries, sorted descending (length r)
//! - `V^T` is r x n with orthonormal rows
//!
//! [`SvdDecomposition::decompose`] is the reference method: one-sided
//! Jacobi rotations applied directly to `A`, which never squares the
//! condition number. [`SvdDecomposition::via_gram_eig`] (see
//! [`svd_eig`](super::svd_eig)) builds the same triple from `A^T A`.

use tracing::{debug, instrument, warn};

use crate::Float;
use crate::config::LinalgConfig;
use crate::error::Result;
use crate::matrix::Matrix;

/// Which algorithm produces the SVD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvdMethod {
    /// One-sided Jacobi on `A` ([`SvdDecomposition::decompose`]).
    #[default]
    Jacobi,
    /// Symmetric eigendecomposition of `A^T A`
    /// ([`SvdDecomposition::via_gram_eig`]).
    GramEigen,
}

/// Result of a thin Singular Value Decomposition.
#[derive(Debug, Clone)]
pub struct SvdDecomposition<T: Float> {
    /// Left singular vectors (m x r).
    pub(crate) u: Matrix<T>,
    /// Singular values in descending order (length r).
    pub(crate) s: Vec<T>,
    /// Right singular vectors, transposed (r x n).
    pub(crate) vt: Matrix<T>,
}

#[allow(clippy::many_single_char_names)]
impl<T: Float> SvdDecomposition<T> {
    /// Compute the thin SVD of a matrix `A` (m x n) by one-sided Jacobi.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::SvdDecomposition;
    /// let a = Matrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]).unwrap();
    /// let svd = SvdDecomposition::decompose(&a).unwrap();
    /// let s = svd.singular_values();
    /// // Singular values of diag(3,4) are 4 and 3
    /// assert!((s[0] - 4.0).abs() < 1e-10);
    /// assert!((s[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        Self::decompose_with(a, &LinalgConfig::default())
    }

    /// Like [`decompose`](Self::decompose), with an explicit sweep budget.
    #[instrument(level = "debug", skip_all, fields(m = a.rows(), n = a.cols()))]
    pub fn decompose_with(a: &Matrix<T>, config: &LinalgConfig) -> Result<Self> {
        a.ensure_finite()?;
        let (m, n) = a.shape();
        if m >= n {
            Ok(Self::svd_tall(a, config.max_sweeps))
        } else {
            // A^T = U' S V'^T  =>  A = V' S U'^T
            let t = Self::svd_tall(&a.transpose(), config.max_sweeps);
            Ok(Self {
                u: t.vt.transpose(),
                s: t.s,
                vt: t.u.transpose(),
            })
        }
    }

    /// SVD for tall/square matrices (m >= n) using one-sided Jacobi.
    fn svd_tall(a: &Matrix<T>, max_sweeps: usize) -> Self {
        let (m, n) = a.shape();
        // Working copy: columns of A that will converge to U * S
        let mut work = a.as_slice().to_vec();
        // V starts as identity
        let mut v = vec![T::zero(); n * n];
        for i in 0..n {
            v[i * n + i] = T::one();
        }

        let tol = T::epsilon() * T::from_f64(100.0);

        let mut sweeps = 0;
        let mut converged = n < 2;
        while !converged && sweeps < max_sweeps {
            sweeps += 1;
            converged = true;

            // Apply Jacobi rotations to pairs of columns (p, q)
            for p in 0..n {
                for q in (p + 1)..n {
                    // Gram matrix elements for columns p and q
                    let mut app = T::zero();
                    let mut aqq = T::zero();
                    let mut apq = T::zero();
                    for i in 0..m {
                        let wp = work[i * n + p];
                        let wq = work[i * n + q];
                        app += wp * wp;
                        aqq += wq * wq;
                        apq += wp * wq;
                    }

                    if apq.abs() <= tol * (app * aqq).sqrt() {
                        continue;
                    }
                    converged = false;

                    let tau = (aqq - app) / (apq + apq);
                    let t = if tau >= T::zero() {
                        T::one() / (tau + (T::one() + tau * tau).sqrt())
                    } else {
                        -T::one() / (-tau + (T::one() + tau * tau).sqrt())
                    };
                    let cs = T::one() / (T::one() + t * t).sqrt();
                    let sn = t * cs;

                    // Rotate columns p and q of work and of V
                    for i in 0..m {
                        let wp = work[i * n + p];
                        let wq = work[i * n + q];
                        work[i * n + p] = cs * wp - sn * wq;
                        work[i * n + q] = sn * wp + cs * wq;
                    }
                    for i in 0..n {
                        let vp = v[i * n + p];
                        let vq = v[i * n + q];
                        v[i * n + p] = cs * vp - sn * vq;
                        v[i * n + q] = sn * vp + cs * vq;
                    }
                }
            }
        }

        if !converged {
            warn!(sweeps, "one-sided Jacobi SVD sweep budget exhausted");
        }
        debug!(sweeps, converged, "Jacobi SVD complete");

        // Singular values are the column norms of work.
        let norms: Vec<T> = (0..n)
            .map(|j| (0..m).map(|i| work[i * n + j] * work[i * n + j]).sum::<T>().sqrt())
            .collect();
        let s_max = norms.iter().fold(T::zero(), |acc, &x| acc.max(x));
        let cutoff = tol * s_max;

        // Sort singular values in descending order
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            norms[b]
                .partial_cmp(&norms[a])
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let s: Vec<T> = indices.iter().map(|&j| norms[j]).collect();
        let mut u = Matrix::zeros(m, n);
        let mut vt = Matrix::zeros(n, n);
        for (new_j, &old_j) in indices.iter().enumerate() {
            let norm = norms[old_j];
            // Columns that collapsed to (numerical) zero keep a zero U column.
            if norm > cutoff {
                for i in 0..m {
                    u[(i, new_j)] = work[i * n + old_j] / norm;
                }
            }
            for i in 0..n {
                vt[(new_j, i)] = v[i * n + old_j];
            }
        }

        Self { u, s, vt }
    }

    /// The singular values in descending order.
    pub fn singular_values(&self) -> &[T] {
        &self.s
    }

    /// The left singular vectors `U` (m x r).
    pub fn u(&self) -> &Matrix<T> {
        &self.u
    }

    /// The right singular vectors transposed, `V^T` (r x n).
    pub fn vt(&self) -> &Matrix<T> {
        &self.vt
    }

    /// Compute the matrix rank (number of singular values above a tolerance).
    pub fn rank(&self, tol: T) -> usize {
        self.s.iter().filter(|&&sv| sv > tol).count()
    }

    /// Compute the condition number (ratio of largest to smallest singular value).
    pub fn condition_number(&self) -> T {
        let (Some(&max_s), Some(&min_s)) = (self.s.first(), self.s.last()) else {
            return T::zero();
        };
        if min_s <= max_s * T::epsilon() {
            return T::from_f64(f64::INFINITY);
        }
        max_s / min_s
    }

    /// Rebuild `U diag(s) V^T`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let (m, r) = self.u.shape();
        let n = self.vt.cols();
        Matrix::from_fn(m, n, |i, j| {
            (0..r)
                .map(|k| self.u[(i, k)] * self.s[k] * self.vt[(k, j)])
                .sum()
        })
    }

    /// Frobenius norm of `a - U diag(s) V^T`.
    pub fn reconstruction_error(&self, a: &Matrix<T>) -> Result<T> {
        Ok(a.sub_checked(&self.reconstruct())?.frobenius_norm())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::many_single_char_names)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use approx::assert_abs_diff_eq;

    fn approx_eq(a: &[f64], b: &[f64], tol: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| (x - y).abs() < tol)
    }

    fn assert_orthonormal_columns(q: &Matrix<f64>, tol: f64) {
        let qtq = q.transpose().matmul(q).unwrap();
        let eye = Matrix::<f64>::eye(q.cols());
        assert!(approx_eq(qtq.as_slice(), eye.as_slice(), tol));
    }

    #[test]
    fn test_svd_diagonal() {
        let a = Matrix::from_rows(&[[3.0_f64, 0.0], [0.0, 4.0]]).unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert!(approx_eq(svd.singular_values(), &[4.0, 3.0], 1e-10));
    }

    #[test]
    fn test_svd_identity() {
        let svd = SvdDecomposition::decompose(&Matrix::<f64>::eye(3)).unwrap();
        for &sv in svd.singular_values() {
            assert!((sv - 1.0).abs() < 1e-10);
        }
        assert_eq!(svd.condition_number(), 1.0);
    }

    #[test]
    fn test_svd_reconstruction() {
        let a = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]])
            .unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert!(svd.reconstruction_error(&a).unwrap() < 1e-12);
        assert_orthonormal_columns(svd.u(), 1e-12);
        assert_orthonormal_columns(&svd.vt().transpose(), 1e-12);
    }

    #[test]
    fn test_svd_tall_matrix() {
        let a = Matrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert_eq!(svd.singular_values().len(), 2);
        assert_eq!(svd.u().shape(), (3, 2));
        assert_eq!(svd.vt().shape(), (2, 2));
        assert!(approx_eq(svd.reconstruct().as_slice(), a.as_slice(), 1e-12));
    }

    #[test]
    fn test_svd_wide_matrix() {
        let a = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert_eq!(svd.singular_values().len(), 2);
        assert_eq!(svd.u().shape(), (2, 2));
        assert_eq!(svd.vt().shape(), (2, 3));
        assert!(approx_eq(svd.reconstruct().as_slice(), a.as_slice(), 1e-12));
        assert_orthonormal_columns(&svd.vt().transpose(), 1e-12);
    }

    #[test]
    fn test_svd_numpy_values() {
        // >>> np.linalg.svd([[1,2],[3,4],[5,6]], compute_uv=False)
        // array([9.52551809, 0.51430058])
        let a = Matrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let s = SvdDecomposition::decompose(&a).unwrap().s;
        assert_abs_diff_eq!(s[0], 9.525_518_09, epsilon = 1e-8);
        assert_abs_diff_eq!(s[1], 0.514_300_58, epsilon = 1e-8);
    }

    #[test]
    fn test_svd_rank() {
        // Rank-1 matrix
        let a = Matrix::from_rows(&[[1.0_f64, 2.0, 3.0], [2.0, 4.0, 6.0], [3.0, 6.0, 9.0]])
            .unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert_eq!(svd.rank(1e-10), 1);
        assert!(svd.condition_number() > 1e12);
        assert!(svd.reconstruction_error(&a).unwrap() < 1e-12);
    }

    #[test]
    fn test_svd_zero_and_empty() {
        let z = Matrix::<f64>::zeros(3, 2);
        let svd = SvdDecomposition::decompose(&z).unwrap();
        assert_eq!(svd.singular_values(), &[0.0, 0.0]);
        assert_eq!(svd.reconstruct(), z);

        let e = Matrix::<f64>::zeros(0, 3);
        let svd = SvdDecomposition::decompose(&e).unwrap();
        assert!(svd.singular_values().is_empty());
        assert_eq!(svd.reconstruct().shape(), (0, 3));
        assert_eq!(svd.condition_number(), 0.0);
    }

    #[test]
    fn test_svd_rejects_infinite_entries() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [f64::INFINITY, 0.0], [0.0, 1.0]]).unwrap();
        assert!(matches!(
            SvdDecomposition::decompose(&a),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_svd_f32() {
        let a = Matrix::from_rows(&[[3.0_f32, 0.0], [0.0, -2.0]]).unwrap();
        let svd = SvdDecomposition::decompose(&a).unwrap();
        assert!((svd.singular_values()[0] - 3.0).abs() < 1e-6);
        assert!((svd.singular_values()[1] - 2.0).abs() < 1e-6);
    }
}
