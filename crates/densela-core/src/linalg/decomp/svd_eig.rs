//! SVD from the symmetric eigendecomposition of the Gram matrix `A^T A`.
//!
//! The eigenvalues of `A^T A` are the squared singular values of `A` and its
//! eigenvectors are the right singular vectors. Left singular vectors follow
//! from `u_i = A v_i / s_i`.
//!
//! Forming `A^T A` squares the condition number of `A`. Singular values
//! below roughly `sqrt(eps) * s_max` are lost to rounding, and the
//! reconstruction error grows accordingly. [`SvdDecomposition::decompose`]
//! does not have this limitation.

use tracing::{debug, instrument};

use crate::Float;
use crate::config::LinalgConfig;
use crate::error::Result;
use crate::matrix::Matrix;

use super::eig::SymmetricEigen;
use super::svd::SvdDecomposition;

impl<T: Float> SvdDecomposition<T> {
    /// Thin SVD of an m x n matrix through the eigendecomposition of
    /// `A^T A`.
    ///
    /// Negative eigenvalues (rounding noise) are clipped to zero. For every
    /// singular value `s_i <= tol` the left singular vector `u_i` is set to
    /// zero: it cannot be recovered from `A v_i / s_i`.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::SvdDecomposition;
    /// let a = Matrix::from_rows(&[[2.0_f64, 0.0], [0.0, 3.0]]).unwrap();
    /// let svd = SvdDecomposition::via_gram_eig(&a, 1e-12).unwrap();
    /// assert_eq!(svd.singular_values().len(), 2);
    /// assert!((svd.singular_values()[0] - 3.0).abs() < 1e-12);
    /// ```
    pub fn via_gram_eig(a: &Matrix<T>, tol: T) -> Result<Self> {
        Self::gram_eig(a, tol, &LinalgConfig::default())
    }

    /// Like [`via_gram_eig`](Self::via_gram_eig), taking the cutoff from
    /// `config.rank_tolerance` and the sweep budget from `config.max_sweeps`.
    pub fn via_gram_eig_with(a: &Matrix<T>, config: &LinalgConfig) -> Result<Self> {
        Self::gram_eig(a, T::from_f64(config.rank_tolerance), config)
    }

    #[instrument(level = "debug", skip_all, fields(m = a.rows(), n = a.cols()))]
    fn gram_eig(a: &Matrix<T>, tol: T, config: &LinalgConfig) -> Result<Self> {
        let (m, n) = a.shape();
        let r = m.min(n);

        let gram = a.transpose().matmul(a)?;
        let eig = SymmetricEigen::decompose_with(&gram, config)?;
        let v = eig.eigenvectors();

        let s: Vec<T> = eig.eigenvalues()[..r]
            .iter()
            .map(|&lambda| lambda.max(T::zero()).sqrt())
            .collect();
        let vt = Matrix::from_fn(r, n, |k, j| v[(j, k)]);

        let mut u = Matrix::zeros(m, r);
        let mut dropped = 0;
        for (k, &sk) in s.iter().enumerate() {
            if sk <= tol {
                dropped += 1;
                continue;
            }
            for i in 0..m {
                let av: T = a.row(i).iter().zip(vt.row(k)).map(|(&x, &y)| x * y).sum();
                u[(i, k)] = av / sk;
            }
        }
        if dropped > 0 {
            debug!(
                dropped,
                "singular values at or below tolerance, left singular vectors zeroed"
            );
        }

        Ok(Self { u, s, vt })
    }
}

/// Compute `(U, s, V^T)` of `a` via the Gram-matrix eigendecomposition.
///
/// Shapes are `m x r`, `r` and `r x n` with `r = min(m, n)`.
pub fn svd_via_eig<T: Float>(a: &Matrix<T>, tol: T) -> Result<(Matrix<T>, Vec<T>, Matrix<T>)> {
    let svd = SvdDecomposition::via_gram_eig(a, tol)?;
    Ok((svd.u, svd.s, svd.vt))
}

/// Frobenius norm of `a - U diag(s) V^T` for the Gram-eigen SVD with the
/// default tolerance.
pub fn svd_via_eig_error<T: Float>(a: &Matrix<T>) -> Result<T> {
    let svd = SvdDecomposition::via_gram_eig_with(a, &LinalgConfig::default())?;
    svd.reconstruction_error(a)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_diagonal_axis_aligned() {
        let a = Matrix::from_rows(&[[2.0_f64, 0.0], [0.0, 3.0]]).unwrap();
        let (u, s, vt) = svd_via_eig(&a, 1e-12).unwrap();
        assert_eq!(s, vec![3.0, 2.0]);
        // First right singular vector is +-e2, second +-e1.
        assert_abs_diff_eq!(vt[(0, 1)].abs(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vt[(1, 0)].abs(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u[(1, 0)].abs(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(u[(0, 1)].abs(), 1.0, epsilon = 1e-12);
        assert!(svd_via_eig_error(&a).unwrap() < 1e-12);
    }

    #[test]
    fn test_tall_and_wide_shapes() {
        let tall = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
        let (u, s, vt) = svd_via_eig(&tall, 1e-12).unwrap();
        assert_eq!((u.shape(), s.len(), vt.shape()), ((3, 2), 2, (2, 2)));
        assert!(svd_via_eig_error(&tall).unwrap() < 1e-10);

        let wide = tall.transpose();
        let (u, s, vt) = svd_via_eig(&wide, 1e-12).unwrap();
        assert_eq!((u.shape(), s.len(), vt.shape()), ((2, 2), 2, (2, 3)));
        assert!(svd_via_eig_error(&wide).unwrap() < 1e-10);
    }

    #[test]
    fn test_matches_reference_singular_values() {
        let a = Matrix::from_rows(&[[4.0, 1.0, -2.0], [0.5, 3.0, 1.0], [2.0, -1.0, 5.0]]).unwrap();
        let gram = SvdDecomposition::via_gram_eig(&a, 1e-12).unwrap();
        let jacobi = SvdDecomposition::decompose(&a).unwrap();
        for (x, y) in gram.singular_values().iter().zip(jacobi.singular_values()) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_rank_deficient_zeroes_left_vectors() {
        // Rank 1: every row is a multiple of [1, 2]
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]]).unwrap();
        let svd = SvdDecomposition::via_gram_eig(&a, 1e-6).unwrap();
        let s = svd.singular_values();
        assert!(s[1] <= 1e-6);
        assert!((0..3).all(|i| svd.u()[(i, 1)] == 0.0));
        assert!(svd.reconstruction_error(&a).unwrap() < 1e-10);
    }

    #[test]
    fn test_zero_matrix() {
        let z = Matrix::<f64>::zeros(2, 3);
        let (u, s, _) = svd_via_eig(&z, 1e-12).unwrap();
        assert_eq!(s, vec![0.0, 0.0]);
        assert!(u.iter().all(|&x| x == 0.0));
        assert_eq!(svd_via_eig_error(&z).unwrap(), 0.0);
    }

    #[test]
    fn test_squared_conditioning_is_visible() {
        // Lauchli matrix: 1 + d^2 rounds to 1, so A^T A loses d entirely.
        let d = 1e-9_f64;
        let a = Matrix::from_rows(&[[1.0, 1.0], [d, 0.0], [0.0, d]]).unwrap();
        let gram_err = svd_via_eig_error(&a).unwrap();
        let jacobi_err = SvdDecomposition::decompose(&a)
            .unwrap()
            .reconstruction_error(&a)
            .unwrap();
        assert!(gram_err > 1e-10, "gram-eigen error {gram_err}");
        assert!(jacobi_err < 1e-12, "jacobi error {jacobi_err}");
    }
}
