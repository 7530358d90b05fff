//! Eigendecomposition.
//!
//! [`SymmetricEigen`] decomposes a real symmetric matrix `A` into
//! `A = V D V^T` where:
//! - `V` is orthogonal (columns are eigenvectors)
//! - `D` is diagonal (eigenvalues on the diagonal)
//!
//! using the cyclic Jacobi eigenvalue algorithm.
//!
//! [`Eigen`] picks between the symmetric path and the complex
//! [`GeneralEigen`] path based on a symmetry check, so callers always see
//! which kind of result they got.

use num_complex::Complex64;
use tracing::{debug, instrument, warn};

use crate::Float;
use crate::config::LinalgConfig;
use crate::error::Result;
use crate::matrix::Matrix;

use super::general::{GeneralEigen, complex_frobenius_distance};

/// Result of an eigendecomposition for symmetric matrices.
#[derive(Debug, Clone)]
pub struct SymmetricEigen<T: Float> {
    /// Eigenvalues in descending order.
    eigenvalues: Vec<T>,
    /// Eigenvectors as columns of an n x n matrix (stored row-major).
    eigenvectors: Vec<T>,
    /// Matrix dimension.
    n: usize,
    /// Jacobi sweeps performed.
    sweeps: usize,
}

#[allow(clippy::many_single_char_names)]
impl<T: Float> SymmetricEigen<T> {
    /// Compute the eigendecomposition of a symmetric matrix.
    ///
    /// Returns eigenvalues and eigenvectors such that `A = V diag(d) V^T`.
    /// Only the lower triangle is read; the upper triangle is assumed to
    /// mirror it.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::SymmetricEigen;
    /// let a = Matrix::from_rows(&[[2.0_f64, 1.0], [1.0, 3.0]]).unwrap();
    /// let eig = SymmetricEigen::decompose(&a).unwrap();
    /// // Eigenvalues of [[2,1],[1,3]] are (5±sqrt(5))/2
    /// assert!((eig.eigenvalues()[0] - (2.5 + 5.0_f64.sqrt() / 2.0)).abs() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix<T>) -> Result<Self> {
        Self::decompose_with(a, &LinalgConfig::default())
    }

    /// Like [`decompose`](Self::decompose), with an explicit sweep budget.
    ///
    /// Running out of sweeps is not an error: the current (partially
    /// diagonalized) state is returned and a warning is emitted.
    #[instrument(level = "debug", skip_all, fields(n = a.rows()))]
    pub fn decompose_with(a: &Matrix<T>, config: &LinalgConfig) -> Result<Self> {
        let n = a.ensure_square()?;
        a.ensure_finite()?;

        // Working copy, mirrored from the lower triangle.
        let mut s = vec![T::zero(); n * n];
        for i in 0..n {
            for j in 0..=i {
                let v = a[(i, j)];
                s[i * n + j] = v;
                s[j * n + i] = v;
            }
        }
        // V starts as identity
        let mut v = vec![T::zero(); n * n];
        for i in 0..n {
            v[i * n + i] = T::one();
        }

        let scale = s.iter().map(|&x| x * x).sum::<T>().sqrt();
        let tol = T::epsilon() * T::from_f64(100.0) * scale;
        // Entries this small cannot keep the off-diagonal norm above `tol`.
        let negligible = tol / T::from_usize(n.max(1));

        let mut sweeps = 0;
        let mut converged = false;
        while sweeps <= config.max_sweeps {
            // Compute off-diagonal norm
            let mut off_norm = T::zero();
            for i in 0..n {
                for j in (i + 1)..n {
                    off_norm += s[i * n + j] * s[i * n + j];
                }
            }
            if off_norm.sqrt() <= tol {
                converged = true;
                break;
            }
            if sweeps == config.max_sweeps {
                break;
            }
            sweeps += 1;

            for p in 0..n {
                for q in (p + 1)..n {
                    let apq = s[p * n + q];
                    if apq.abs() <= negligible {
                        continue;
                    }

                    let app = s[p * n + p];
                    let aqq = s[q * n + q];

                    // Compute rotation angle
                    let theta = (aqq - app) / (apq + apq);
                    let t = if theta >= T::zero() {
                        T::one() / (theta + (T::one() + theta * theta).sqrt())
                    } else {
                        -T::one() / (-theta + (T::one() + theta * theta).sqrt())
                    };
                    let cs = T::one() / (T::one() + t * t).sqrt();
                    let sn = t * cs;

                    // Apply rotation to S: S' = G^T S G
                    s[p * n + p] = app - t * apq;
                    s[q * n + q] = aqq + t * apq;
                    s[p * n + q] = T::zero();
                    s[q * n + p] = T::zero();

                    for r in 0..n {
                        if r == p || r == q {
                            continue;
                        }
                        let srp = s[r * n + p];
                        let srq = s[r * n + q];
                        s[r * n + p] = cs * srp - sn * srq;
                        s[p * n + r] = cs * srp - sn * srq;
                        s[r * n + q] = sn * srp + cs * srq;
                        s[q * n + r] = sn * srp + cs * srq;
                    }

                    // V' = V * G
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
            warn!(
                sweeps,
                "Jacobi eigenvalue sweep budget exhausted before convergence"
            );
        }

        let eigenvalues: Vec<T> = (0..n).map(|i| s[i * n + i]).collect();

        // Sort descending by value
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(core::cmp::Ordering::Equal)
        });

        let eigenvalues_sorted: Vec<T> = indices.iter().map(|&i| eigenvalues[i]).collect();
        let mut v_sorted = vec![T::zero(); n * n];
        for (new_j, &old_j) in indices.iter().enumerate() {
            for i in 0..n {
                v_sorted[i * n + new_j] = v[i * n + old_j];
            }
        }

        debug!(sweeps, converged, "symmetric eigendecomposition complete");

        Ok(Self {
            eigenvalues: eigenvalues_sorted,
            eigenvectors: v_sorted,
            n,
            sweeps,
        })
    }

    /// Matrix dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The eigenvalues, sorted descending.
    pub fn eigenvalues(&self) -> &[T] {
        &self.eigenvalues
    }

    /// The eigenvector matrix `V` (n x n, columns are eigenvectors, unit
    /// norm, mutually orthogonal).
    pub fn eigenvectors(&self) -> Matrix<T> {
        Matrix::from_parts(self.eigenvectors.clone(), self.n, self.n)
    }

    /// Number of Jacobi sweeps performed.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Rebuild `V diag(d) V^T`.
    pub fn reconstruct(&self) -> Matrix<T> {
        let n = self.n;
        let v = &self.eigenvectors;
        Matrix::from_fn(n, n, |i, j| {
            (0..n)
                .map(|k| v[i * n + k] * self.eigenvalues[k] * v[j * n + k])
                .sum()
        })
    }
}

// ======================================================================
// Tagged symmetric / general result
// ======================================================================

/// Eigendecomposition of a real square matrix, symmetric or not.
#[derive(Debug, Clone)]
pub enum Eigen {
    /// Symmetric input: real eigenvalues, orthonormal eigenvectors.
    Real(SymmetricEigen<f64>),
    /// Non-symmetric input: complex eigenvalues and eigenvectors.
    Complex(GeneralEigen),
}

impl Eigen {
    /// Decompose `a`, choosing the symmetric path when
    /// `|a_ij - a_ji| <= 1e-10` for every pair.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::Eigen;
    /// let rot = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
    /// let eig = Eigen::decompose(&rot).unwrap();
    /// assert!(matches!(eig, Eigen::Complex(_)));
    /// assert!(eig.reconstruction_error(&rot).unwrap() < 1e-10);
    /// ```
    pub fn decompose(a: &Matrix<f64>) -> Result<Self> {
        Self::decompose_with(a, &LinalgConfig::default())
    }

    /// Like [`decompose`](Self::decompose), using
    /// `config.symmetry_tolerance` and `config.symmetry_rel_tolerance` for
    /// the symmetry check.
    pub fn decompose_with(a: &Matrix<f64>, config: &LinalgConfig) -> Result<Self> {
        a.ensure_square()?;
        if a.is_symmetric_within(config.symmetry_tolerance, config.symmetry_rel_tolerance) {
            SymmetricEigen::decompose_with(a, config).map(Self::Real)
        } else {
            GeneralEigen::decompose_with(a, config).map(Self::Complex)
        }
    }

    /// Whether the symmetric path was taken.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    /// The eigenvalues, widened to complex for the symmetric case.
    pub fn eigenvalues(&self) -> Vec<Complex64> {
        match self {
            Self::Real(eig) => eig
                .eigenvalues()
                .iter()
                .map(|&v| Complex64::new(v, 0.0))
                .collect(),
            Self::Complex(eig) => eig.eigenvalues().to_vec(),
        }
    }

    /// Frobenius norm of `a` minus the reconstruction from this
    /// decomposition, computed in complex arithmetic for the general case.
    pub fn reconstruction_error(&self, a: &Matrix<f64>) -> Result<f64> {
        match self {
            Self::Real(eig) => Ok(a.sub_checked(&eig.reconstruct())?.frobenius_norm()),
            Self::Complex(eig) => complex_frobenius_distance(a, &eig.reconstruct()?),
        }
    }
}
