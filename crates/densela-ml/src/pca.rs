//! Principal component analysis via SVD.
//!
//! The data matrix `X` (n samples x d features) is centered column-wise and
//! decomposed as `Xc = U diag(s) V^T` with the one-sided Jacobi SVD. The
//! first `k` rows of `V^T` are the principal components; the variance
//! along component `i` is `s_i^2 / (n - 1)`.

use tracing::{debug, instrument};

use densela_core::linalg::SvdDecomposition;
use densela_core::{CoreError, Float, LinalgConfig, Matrix, Result};

/// A fitted PCA model.
#[derive(Debug, Clone)]
pub struct Pca<T: Float> {
    mean: Vec<T>,
    /// k x d, orthonormal rows.
    components: Matrix<T>,
    /// n x k scores of the training data.
    projected: Matrix<T>,
    explained_variance: Vec<T>,
    explained_variance_ratio: Vec<T>,
    /// All d singular values of the centered data, descending.
    singular_values: Vec<T>,
}

impl<T: Float> Pca<T> {
    /// Fit `k` principal components to `x`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::OutOfRange`] if `k` is not in `[1, d]`.
    /// - [`CoreError::InvalidShape`] if `x` has fewer than two rows.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_ml::Pca;
    /// let x = Matrix::from_rows(&[[0.0_f64, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
    /// let pca = Pca::fit(&x, 1).unwrap();
    /// assert!((pca.explained_variance_ratio()[0] - 1.0).abs() < 1e-12);
    /// assert_eq!(pca.projected().shape(), (4, 1));
    /// ```
    pub fn fit(x: &Matrix<T>, k: usize) -> Result<Self> {
        Self::fit_with(x, k, &LinalgConfig::default())
    }

    /// Like [`fit`](Self::fit), with an explicit sweep budget for the SVD.
    #[instrument(level = "debug", skip_all, fields(n = x.rows(), d = x.cols(), k))]
    pub fn fit_with(x: &Matrix<T>, k: usize, config: &LinalgConfig) -> Result<Self> {
        let (n, d) = x.shape();
        if k == 0 || k > d {
            return Err(CoreError::OutOfRange {
                name: "k",
                value: k,
                min: 1,
                max: d,
            });
        }
        if n < 2 {
            return Err(CoreError::InvalidShape {
                shape: vec![n, d],
                reason: "PCA needs at least two samples",
            });
        }

        let mean = x.column_means();
        let centered = Matrix::from_fn(n, d, |i, j| x[(i, j)] - mean[j]);

        // Zero rows leave Xc^T Xc unchanged and guarantee d right singular
        // vectors when there are fewer samples than features.
        let svd = if n < d {
            let padded = Matrix::from_fn(d, d, |i, j| {
                if i < n { centered[(i, j)] } else { T::zero() }
            });
            SvdDecomposition::decompose_with(&padded, config)?
        } else {
            SvdDecomposition::decompose_with(&centered, config)?
        };

        let mut components = svd.vt().top_rows(k);
        flip_signs(&mut components);
        let projected = centered.matmul(&components.transpose())?;

        let denom = T::from_usize(n - 1);
        let variance: Vec<T> = svd
            .singular_values()
            .iter()
            .map(|&s| s * s / denom)
            .collect();
        let total: T = variance.iter().copied().sum();
        let explained_variance = variance[..k].to_vec();
        let explained_variance_ratio: Vec<T> = if total > T::zero() {
            explained_variance.iter().map(|&v| v / total).collect()
        } else {
            vec![T::zero(); k]
        };

        debug!(
            retained = %explained_variance_ratio.iter().copied().sum::<T>(),
            "PCA fit complete"
        );

        Ok(Self {
            mean,
            components,
            projected,
            explained_variance,
            explained_variance_ratio,
            singular_values: svd.singular_values().to_vec(),
        })
    }

    /// Per-feature mean of the training data (length d).
    pub fn mean(&self) -> &[T] {
        &self.mean
    }

    /// Principal axes as rows (k x d).
    pub fn components(&self) -> &Matrix<T> {
        &self.components
    }

    /// Training data projected onto the components (n x k).
    pub fn projected(&self) -> &Matrix<T> {
        &self.projected
    }

    /// Variance along each retained component, `s_i^2 / (n - 1)`.
    pub fn explained_variance(&self) -> &[T] {
        &self.explained_variance
    }

    /// Share of the total variance along each retained component.
    pub fn explained_variance_ratio(&self) -> &[T] {
        &self.explained_variance_ratio
    }

    /// Every singular value of the centered data, descending.
    pub fn singular_values(&self) -> &[T] {
        &self.singular_values
    }

    /// Number of retained components, `k`.
    pub fn n_components(&self) -> usize {
        self.components.rows()
    }

    /// Project new samples (m x d) onto the fitted components.
    pub fn transform(&self, x: &Matrix<T>) -> Result<Matrix<T>> {
        let d = self.mean.len();
        if x.cols() != d {
            return Err(CoreError::DimensionMismatch {
                expected: vec![x.rows(), d],
                got: vec![x.rows(), x.cols()],
            });
        }
        let centered = Matrix::from_fn(x.rows(), d, |i, j| x[(i, j)] - self.mean[j]);
        centered.matmul(&self.components.transpose())
    }

    /// Map scores (m x k) back to feature space.
    pub fn inverse_transform(&self, z: &Matrix<T>) -> Result<Matrix<T>> {
        let mut x = z.matmul(&self.components)?;
        for i in 0..x.rows() {
            for (j, &mu) in self.mean.iter().enumerate() {
                x[(i, j)] += mu;
            }
        }
        Ok(x)
    }
}

/// Fit PCA with `k` components; shorthand for [`Pca::fit`].
pub fn pca<T: Float>(x: &Matrix<T>, k: usize) -> Result<Pca<T>> {
    Pca::fit(x, k)
}

/// Make the largest-magnitude entry of every row positive.
fn flip_signs<T: Float>(components: &mut Matrix<T>) {
    for i in 0..components.rows() {
        let pivot = components
            .row(i)
            .iter()
            .copied()
            .fold(T::zero(), |best, v| if v.abs() > best.abs() { v } else { best });
        if pivot < T::zero() {
            for j in 0..components.cols() {
                components[(i, j)] = -components[(i, j)];
            }
        }
    }
}
