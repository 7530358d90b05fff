//! Reconstruction-error analysis.
//!
//! Factorizes one square matrix three ways (LU, eigendecomposition, SVD) and
//! reports the Frobenius norm of `A - reconstruction` for each. Nothing is
//! judged here; callers decide which errors are acceptable.

use tracing::{debug, instrument, warn};

use crate::config::LinalgConfig;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

use super::decomp::{Eigen, LuDecomposition, SvdDecomposition, SvdMethod};

/// Frobenius reconstruction errors of the three factorizations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructionErrors {
    /// `||A - P^T L U||`
    pub lu_error: f64,
    /// `||A - V diag(w) V^T||` (symmetric) or `||A - V diag(w) V^-1||`
    /// (general). Infinite when the eigenvectors are linearly dependent.
    pub eig_error: f64,
    /// `||A - U diag(s) V^T||`
    pub svd_error: f64,
}

/// Reconstruction errors with the default configuration and the Jacobi SVD.
///
/// ```
/// # use densela_core::Matrix;
/// # use densela_core::linalg::reconstruction_errors;
/// let a = Matrix::from_rows(&[[2.0, 1.0, 3.0], [0.0, 4.0, 5.0], [7.0, 2.0, 1.0]]).unwrap();
/// let errs = reconstruction_errors(&a).unwrap();
/// assert!(errs.lu_error < 1e-12);
/// assert!(errs.eig_error < 1e-8);
/// assert!(errs.svd_error < 1e-12);
/// ```
pub fn reconstruction_errors(a: &Matrix<f64>) -> Result<ReconstructionErrors> {
    reconstruction_errors_with(a, &LinalgConfig::default(), SvdMethod::Jacobi)
}

/// Reconstruction errors with explicit tolerances and SVD method.
///
/// The eigendecomposition takes the symmetric path when `a` is symmetric
/// within `config.symmetry_tolerance` and `config.symmetry_rel_tolerance`.
/// A defective matrix (linearly
/// dependent eigenvectors) reports an infinite `eig_error` instead of
/// failing.
#[instrument(level = "debug", skip_all, fields(n = a.rows(), svd = ?method))]
pub fn reconstruction_errors_with(
    a: &Matrix<f64>,
    config: &LinalgConfig,
    method: SvdMethod,
) -> Result<ReconstructionErrors> {
    a.ensure_square()?;

    let lu = LuDecomposition::decompose_with(a, config)?;
    let lu_error = a.sub_checked(&lu.reconstruct())?.frobenius_norm();

    let eig = Eigen::decompose_with(a, config)?;
    let eig_error = match eig.reconstruction_error(a) {
        Ok(err) => err,
        Err(CoreError::SingularMatrix { .. }) => {
            warn!("eigenvector matrix is singular, eigen reconstruction undefined");
            f64::INFINITY
        }
        Err(e) => return Err(e),
    };

    let svd = match method {
        SvdMethod::Jacobi => SvdDecomposition::decompose_with(a, config)?,
        SvdMethod::GramEigen => SvdDecomposition::via_gram_eig_with(a, config)?,
    };
    let svd_error = svd.reconstruction_error(a)?;

    debug!(
        lu_error,
        eig_error,
        svd_error,
        symmetric = eig.is_symmetric(),
        "reconstruction errors"
    );

    Ok(ReconstructionErrors {
        lu_error,
        eig_error,
        svd_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonsymmetric_matrix() {
        let a = Matrix::from_rows(&[[2.0, 1.0, 3.0], [0.0, 4.0, 5.0], [7.0, 2.0, 1.0]]).unwrap();
        let errs = reconstruction_errors(&a).unwrap();
        assert!(errs.lu_error < 1e-12);
        assert!(errs.eig_error < 1e-8);
        assert!(errs.svd_error < 1e-12);
    }

    #[test]
    fn test_symmetric_matrix() {
        let a = Matrix::from_rows(&[[4.0, 1.0, 2.0], [1.0, 3.0, 0.5], [2.0, 0.5, 5.0]]).unwrap();
        let errs = reconstruction_errors(&a).unwrap();
        assert!(errs.lu_error < 1e-12);
        assert!(errs.eig_error < 1e-12);
        assert!(errs.svd_error < 1e-12);
    }

    #[test]
    fn test_complex_spectrum() {
        // Rotation by 90 degrees, eigenvalues +-i
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let errs = reconstruction_errors(&a).unwrap();
        assert!(errs.eig_error < 1e-12);
    }

    #[test]
    fn test_gram_eigen_method() {
        let a = Matrix::from_rows(&[[3.0, 1.0], [1.0, 2.0]]).unwrap();
        let errs = reconstruction_errors_with(&a, &LinalgConfig::default(), SvdMethod::GramEigen)
            .unwrap();
        assert!(errs.svd_error < 1e-12);
    }

    #[test]
    fn test_singular_matrix_lu_error_stays_small() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        let errs = reconstruction_errors(&a).unwrap();
        assert!(errs.lu_error < 1e-10);
        assert!(errs.svd_error < 1e-12);
    }

    #[test]
    fn test_defective_matrix_reports_infinite_eig_error() {
        // Jordan block: a single eigenvector for a double eigenvalue
        let a = Matrix::from_rows(&[[1.0, 1.0], [0.0, 1.0]]).unwrap();
        let errs = reconstruction_errors(&a).unwrap();
        assert!(errs.eig_error.is_infinite());
        assert!(errs.lu_error < 1e-12);
    }

    #[test]
    fn test_not_square() {
        let a = Matrix::<f64>::zeros(2, 3);
        assert!(reconstruction_errors(&a).unwrap_err().is_shape_error());
    }

    #[test]
    fn test_strict_pivoting_propagates() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let cfg = LinalgConfig::default().with_strict_pivoting(true);
        assert!(matches!(
            reconstruction_errors_with(&a, &cfg, SvdMethod::Jacobi),
            Err(CoreError::SingularMatrix { column: 1 })
        ));
    }
}
