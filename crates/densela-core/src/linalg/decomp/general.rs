//! Eigendecomposition for general (non-symmetric) real matrices.
//!
//! The matrix is reduced to upper Hessenberg form with complex Householder
//! reflections, then driven to complex Schur form `A = Z T Z^H` by a
//! single-shift QR iteration with Wilkinson shifts. Eigenvalues are the
//! diagonal of `T`; eigenvectors come from back-substitution on `T`,
//! mapped through `Z` and normalized to unit 2-norm.
//!
//! Everything is done in complex arithmetic, so complex-conjugate pairs need
//! no special handling.

use num_complex::Complex64;
use tracing::{debug, instrument};

use crate::config::LinalgConfig;
use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Iterations without deflation before an exceptional shift is tried.
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// Result of a general eigendecomposition `A V = V diag(w)`.
#[derive(Debug, Clone)]
pub struct GeneralEigen {
    eigenvalues: Vec<Complex64>,
    /// Eigenvectors as columns (row-major n x n).
    eigenvectors: Vec<Complex64>,
    n: usize,
    iterations: usize,
}

#[allow(clippy::many_single_char_names)]
impl GeneralEigen {
    /// Eigendecomposition of an arbitrary real square matrix.
    ///
    /// ```
    /// # use densela_core::Matrix;
    /// # use densela_core::linalg::GeneralEigen;
    /// // 90 degree rotation: eigenvalues are +i and -i
    /// let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
    /// let eig = GeneralEigen::decompose(&a).unwrap();
    /// for w in eig.eigenvalues() {
    ///     assert!(w.re.abs() < 1e-12 && (w.im.abs() - 1.0).abs() < 1e-12);
    /// }
    /// ```
    pub fn decompose(a: &Matrix<f64>) -> Result<Self> {
        Self::decompose_with(a, &LinalgConfig::default())
    }

    /// Like [`decompose`](Self::decompose), with an explicit QR iteration
    /// budget of `config.max_qr_iterations` per eigenvalue.
    #[instrument(level = "debug", skip_all, fields(n = a.rows()))]
    pub fn decompose_with(a: &Matrix<f64>, config: &LinalgConfig) -> Result<Self> {
        let n = a.ensure_square()?;
        a.ensure_finite()?;
        let mut h: Vec<Complex64> = a.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        let mut z = identity(n);

        hessenberg(&mut h, &mut z, n);
        let iterations = schur(&mut h, &mut z, n, config.max_qr_iterations)?;

        let eigenvalues: Vec<Complex64> = (0..n).map(|i| h[i * n + i]).collect();
        let eigenvectors = triangular_eigenvectors(&h, &z, n);

        debug!(iterations, "general eigendecomposition complete");

        Ok(Self {
            eigenvalues,
            eigenvectors,
            n,
            iterations,
        })
    }

    /// Matrix dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The eigenvalues in the order they appear on the Schur diagonal.
    pub fn eigenvalues(&self) -> &[Complex64] {
        &self.eigenvalues
    }

    /// The eigenvector matrix `V` (columns are unit-norm eigenvectors).
    pub fn eigenvectors(&self) -> Matrix<Complex64> {
        Matrix::from_parts(self.eigenvectors.clone(), self.n, self.n)
    }

    /// Total QR iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Rebuild `V diag(w) V^-1`.
    ///
    /// Fails with [`CoreError::SingularMatrix`] when the eigenvectors are
    /// linearly dependent (defective input).
    pub fn reconstruct(&self) -> Result<Matrix<Complex64>> {
        let v = self.eigenvectors();
        let v_inv = invert_complex(&v)?;
        let n = self.n;
        let vd = Matrix::from_fn(n, n, |i, j| v[(i, j)] * self.eigenvalues[j]);
        vd.matmul(&v_inv)
    }
}

fn identity(n: usize) -> Vec<Complex64> {
    let mut z = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        z[i * n + i] = Complex64::new(1.0, 0.0);
    }
    z
}

/// Householder reduction to upper Hessenberg form, accumulating the
/// reflections into `q` so that `A = Q H Q^H`.
fn hessenberg(h: &mut [Complex64], q: &mut [Complex64], n: usize) {
    let zero = Complex64::new(0.0, 0.0);
    for k in 0..n.saturating_sub(2) {
        let xnorm = ((k + 1)..n)
            .map(|i| h[i * n + k].norm_sqr())
            .sum::<f64>()
            .sqrt();
        if xnorm == 0.0 {
            continue;
        }
        let x0 = h[(k + 1) * n + k];
        let phase = if x0.norm() > 0.0 {
            x0 / x0.norm()
        } else {
            Complex64::new(1.0, 0.0)
        };
        let alpha = -phase * xnorm;

        let mut v: Vec<Complex64> = ((k + 1)..n).map(|i| h[i * n + k]).collect();
        v[0] -= alpha;
        let vnorm = v.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
        if vnorm == 0.0 {
            continue;
        }
        for c in &mut v {
            *c /= vnorm;
        }

        // H = P H, P = I - 2 v v^H acting on rows k+1..n
        for j in 0..n {
            let w: Complex64 = v
                .iter()
                .enumerate()
                .map(|(r, vr)| vr.conj() * h[(k + 1 + r) * n + j])
                .sum();
            for (r, vr) in v.iter().enumerate() {
                h[(k + 1 + r) * n + j] -= *vr * w * 2.0;
            }
        }
        // H = H P and Q = Q P, acting on columns k+1..n
        for m in [&mut *h, &mut *q] {
            for i in 0..n {
                let w: Complex64 = v
                    .iter()
                    .enumerate()
                    .map(|(c, vc)| m[i * n + k + 1 + c] * *vc)
                    .sum();
                for (c, vc) in v.iter().enumerate() {
                    m[i * n + k + 1 + c] -= w * vc.conj() * 2.0;
                }
            }
        }

        h[(k + 1) * n + k] = alpha;
        for i in (k + 2)..n {
            h[i * n + k] = zero;
        }
    }
}

/// Shifted QR iteration on an upper Hessenberg `h`, leaving it upper
/// triangular and accumulating the rotations into `z`. Returns the number
/// of QR steps taken.
fn schur(h: &mut [Complex64], z: &mut [Complex64], n: usize, max_iter: usize) -> Result<usize> {
    let zero = Complex64::new(0.0, 0.0);
    let budget = max_iter.saturating_mul(n.max(1));
    let hnorm = h.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();

    let mut total = 0;
    let mut since_deflation = 0;
    let mut hi = n;

    while hi > 1 {
        // Find the start of the active unreduced block.
        let mut lo = hi - 1;
        while lo > 0 {
            let mut s = h[(lo - 1) * n + lo - 1].norm() + h[lo * n + lo].norm();
            if s == 0.0 {
                s = hnorm;
            }
            if h[lo * n + lo - 1].norm() <= f64::EPSILON * s {
                h[lo * n + lo - 1] = zero;
                break;
            }
            lo -= 1;
        }

        if lo == hi - 1 {
            hi -= 1;
            since_deflation = 0;
            continue;
        }

        if total >= budget {
            return Err(CoreError::NoConvergence {
                algorithm: "complex QR iteration",
                iterations: total,
            });
        }
        total += 1;
        since_deflation += 1;

        let mu = if since_deflation % EXCEPTIONAL_SHIFT_PERIOD == 0 {
            let mut s = h[(hi - 1) * n + hi - 2].re.abs();
            if hi >= lo + 3 {
                s += h[(hi - 2) * n + hi - 3].re.abs();
            }
            h[(hi - 1) * n + hi - 1] + s
        } else {
            wilkinson_shift(
                h[(hi - 2) * n + hi - 2],
                h[(hi - 2) * n + hi - 1],
                h[(hi - 1) * n + hi - 2],
                h[(hi - 1) * n + hi - 1],
            )
        };

        qr_step(h, z, n, lo, hi, mu);
    }

    Ok(total)
}

/// Eigenvalue of `[[a, b], [c, d]]` closer to `d`.
fn wilkinson_shift(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Complex64 {
    let half_diff = (a - d) * 0.5;
    let disc = (half_diff * half_diff + b * c).sqrt();
    let mean = (a + d) * 0.5;
    let mu1 = mean + disc;
    let mu2 = mean - disc;
    if (mu1 - d).norm() <= (mu2 - d).norm() {
        mu1
    } else {
        mu2
    }
}

/// One explicit shifted QR step `H - mu I = QR`, `H <- RQ + mu I` on the
/// block `lo..hi`, applied to the full matrix so the Schur form of the
/// already deflated parts is kept.
fn qr_step(h: &mut [Complex64], z: &mut [Complex64], n: usize, lo: usize, hi: usize, mu: Complex64) {
    for k in lo..hi {
        h[k * n + k] -= mu;
    }

    let mut rotations = Vec::with_capacity(hi - lo - 1);
    for k in lo..(hi - 1) {
        let x = h[k * n + k];
        let y = h[(k + 1) * n + k];
        let r = (x.norm_sqr() + y.norm_sqr()).sqrt();
        let (c, s) = if r == 0.0 {
            (Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0))
        } else {
            (x / r, y / r)
        };
        // G = [[conj(c), conj(s)], [-s, c]] from the left on rows k, k+1
        for j in k..n {
            let a = h[k * n + j];
            let b = h[(k + 1) * n + j];
            h[k * n + j] = c.conj() * a + s.conj() * b;
            h[(k + 1) * n + j] = -s * a + c * b;
        }
        rotations.push((c, s));
    }

    // G^H = [[c, -conj(s)], [s, conj(c)]] from the right on columns k, k+1
    for (offset, &(c, s)) in rotations.iter().enumerate() {
        let k = lo + offset;
        for i in 0..(k + 2) {
            let a = h[i * n + k];
            let b = h[i * n + k + 1];
            h[i * n + k] = a * c + b * s;
            h[i * n + k + 1] = -a * s.conj() + b * c.conj();
        }
        for i in 0..n {
            let a = z[i * n + k];
            let b = z[i * n + k + 1];
            z[i * n + k] = a * c + b * s;
            z[i * n + k + 1] = -a * s.conj() + b * c.conj();
        }
    }

    for k in lo..hi {
        h[k * n + k] += mu;
    }
}

/// Eigenvectors of `A = Z T Z^H` from the upper triangular `T`.
fn triangular_eigenvectors(t: &[Complex64], z: &[Complex64], n: usize) -> Vec<Complex64> {
    let zero = Complex64::new(0.0, 0.0);
    let tnorm = t.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
    let small = f64::EPSILON * tnorm.max(f64::MIN_POSITIVE);

    let mut vectors = vec![zero; n * n];
    let mut y = vec![zero; n];
    for k in 0..n {
        let lambda = t[k * n + k];
        y.fill(zero);
        y[k] = Complex64::new(1.0, 0.0);
        for i in (0..k).rev() {
            let rhs: Complex64 = ((i + 1)..=k).map(|j| t[i * n + j] * y[j]).sum();
            let mut d = t[i * n + i] - lambda;
            if d.norm() < small {
                d = Complex64::new(small, 0.0);
            }
            y[i] = -rhs / d;
        }

        // x = Z y, normalized
        let mut norm = 0.0;
        for i in 0..n {
            let xi: Complex64 = (0..=k).map(|j| z[i * n + j] * y[j]).sum();
            vectors[i * n + k] = xi;
            norm += xi.norm_sqr();
        }
        let norm = norm.sqrt();
        if norm > 0.0 {
            for i in 0..n {
                vectors[i * n + k] /= norm;
            }
        }
    }
    vectors
}

/// Inverse of a complex square matrix by Gauss-Jordan elimination with
/// partial pivoting.
pub(crate) fn invert_complex(m: &Matrix<Complex64>) -> Result<Matrix<Complex64>> {
    let n = m.ensure_square()?;
    let zero = Complex64::new(0.0, 0.0);
    let scale = m.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let tol = f64::EPSILON * scale * n as f64;

    let mut a = m.as_slice().to_vec();
    let mut inv = identity(n);

    for k in 0..n {
        let mut p = k;
        let mut best = a[k * n + k].norm();
        for i in (k + 1)..n {
            let v = a[i * n + k].norm();
            if v > best {
                best = v;
                p = i;
            }
        }
        if best <= tol {
            return Err(CoreError::SingularMatrix { column: k });
        }
        if p != k {
            for j in 0..n {
                a.swap(k * n + j, p * n + j);
                inv.swap(k * n + j, p * n + j);
            }
        }

        let pivot = a[k * n + k];
        for j in 0..n {
            a[k * n + j] /= pivot;
            inv[k * n + j] /= pivot;
        }
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = a[i * n + k];
            if factor == zero {
                continue;
            }
            for j in 0..n {
                let akj = a[k * n + j];
                let ikj = inv[k * n + j];
                a[i * n + j] -= factor * akj;
                inv[i * n + j] -= factor * ikj;
            }
        }
    }

    Ok(Matrix::from_parts(inv, n, n))
}

/// Frobenius norm of `a - b` with `a` lifted to complex.
pub(crate) fn complex_frobenius_distance(a: &Matrix<f64>, b: &Matrix<Complex64>) -> Result<f64> {
    if a.shape() != b.shape() {
        return Err(CoreError::DimensionMismatch {
            expected: vec![a.rows(), a.cols()],
            got: vec![b.rows(), b.cols()],
        });
    }
    Ok(a
        .iter()
        .zip(b.iter())
        .map(|(&x, y)| (Complex64::new(x, 0.0) - y).norm_sqr())
        .sum::<f64>()
        .sqrt())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sorted_by_re_im(mut w: Vec<Complex64>) -> Vec<Complex64> {
        w.sort_by(|a, b| {
            a.re.partial_cmp(&b.re)
                .unwrap_or(core::cmp::Ordering::Equal)
                .then(a.im.partial_cmp(&b.im).unwrap_or(core::cmp::Ordering::Equal))
        });
        w
    }

    fn residual(a: &Matrix<f64>, eig: &GeneralEigen) -> f64 {
        // max_k |A v_k - w_k v_k|
        let n = eig.n();
        let v = eig.eigenvectors();
        let a_c = a.map(|x| Complex64::new(x, 0.0));
        let av = a_c.matmul(&v).unwrap();
        let mut worst: f64 = 0.0;
        for k in 0..n {
            for i in 0..n {
                let r = av[(i, k)] - v[(i, k)] * eig.eigenvalues()[k];
                worst = worst.max(r.norm());
            }
        }
        worst
    }

    #[test]
    fn test_rotation_has_imaginary_pair() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let eig = GeneralEigen::decompose(&a).unwrap();
        let w = sorted_by_re_im(eig.eigenvalues().to_vec());
        assert_abs_diff_eq!(w[0].im, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w[1].im, 1.0, epsilon = 1e-12);
        assert!(residual(&a, &eig) < 1e-12);
    }

    #[test]
    fn test_upper_triangular_eigenvalues_are_diagonal() {
        let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]]).unwrap();
        let eig = GeneralEigen::decompose(&a).unwrap();
        let w = sorted_by_re_im(eig.eigenvalues().to_vec());
        for (got, want) in w.iter().zip([1.0, 4.0, 6.0]) {
            assert_abs_diff_eq!(got.re, want, epsilon = 1e-10);
            assert_abs_diff_eq!(got.im, 0.0, epsilon = 1e-10);
        }
        assert!(residual(&a, &eig) < 1e-10);
    }

    #[test]
    fn test_companion_matrix_roots() {
        // x^3 - 6x^2 + 11x - 6 = (x-1)(x-2)(x-3)
        let a = Matrix::from_rows(&[[6.0, -11.0, 6.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        let eig = GeneralEigen::decompose(&a).unwrap();
        let w = sorted_by_re_im(eig.eigenvalues().to_vec());
        for (got, want) in w.iter().zip([1.0, 2.0, 3.0]) {
            assert_abs_diff_eq!(got.re, want, epsilon = 1e-8);
            assert_abs_diff_eq!(got.im, 0.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_mixed_real_and_complex_4x4() {
        let a = Matrix::from_rows(&[
            [4.0, -2.0, 1.0, 0.5],
            [3.0, 1.0, -1.0, 2.0],
            [0.0, 2.0, 5.0, -3.0],
            [1.0, 0.0, 2.0, -1.0],
        ])
        .unwrap();
        let eig = GeneralEigen::decompose(&a).unwrap();
        assert!(residual(&a, &eig) < 1e-9);
        // sum of eigenvalues is the trace
        let sum: Complex64 = eig.eigenvalues().iter().sum();
        assert_abs_diff_eq!(sum.re, 9.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sum.im, 0.0, epsilon = 1e-9);
        let rec = eig.reconstruct().unwrap();
        assert!(complex_frobenius_distance(&a, &rec).unwrap() < 1e-8);
    }

    #[test]
    fn test_eigenvectors_unit_norm() {
        let a = Matrix::from_rows(&[[2.0, 1.0, 3.0], [0.0, 4.0, 5.0], [7.0, 2.0, 1.0]]).unwrap();
        let eig = GeneralEigen::decompose(&a).unwrap();
        let v = eig.eigenvectors();
        for k in 0..3 {
            let norm: f64 = (0..3).map(|i| v[(i, k)].norm_sqr()).sum::<f64>().sqrt();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_and_scalar() {
        let eig = GeneralEigen::decompose(&Matrix::zeros(0, 0)).unwrap();
        assert!(eig.eigenvalues().is_empty());
        let eig = GeneralEigen::decompose(&Matrix::from_rows(&[[-2.5]]).unwrap()).unwrap();
        assert_eq!(eig.eigenvalues(), &[Complex64::new(-2.5, 0.0)]);
        assert_eq!(eig.iterations(), 0);
    }

    #[test]
    fn test_iteration_budget() {
        let a = Matrix::from_rows(&[[0.0, -1.0], [1.0, 0.0]]).unwrap();
        let cfg = LinalgConfig::default().with_max_qr_iterations(0);
        assert!(matches!(
            GeneralEigen::decompose_with(&a, &cfg),
            Err(CoreError::NoConvergence { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let a = Matrix::from_rows(&[[1.0, 2.0], [f64::NAN, 0.0]]).unwrap();
        assert!(matches!(
            GeneralEigen::decompose(&a),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_invert_complex() {
        let m = Matrix::from_rows(&[
            [Complex64::new(1.0, 1.0), Complex64::new(2.0, 0.0)],
            [Complex64::new(0.0, -1.0), Complex64::new(3.0, 0.5)],
        ])
        .unwrap();
        let inv = invert_complex(&m).unwrap();
        let eye = m.matmul(&inv).unwrap();
        for i in 0..2 {
            for j in 0..2 {
                let want = if i == j { 1.0 } else { 0.0 };
                assert!((eye[(i, j)] - Complex64::new(want, 0.0)).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_invert_complex_singular() {
        let one = Complex64::new(1.0, 0.0);
        let m = Matrix::from_rows(&[[one, one], [one, one]]).unwrap();
        assert!(matches!(
            invert_complex(&m),
            Err(CoreError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_distance_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 2);
        let b = Matrix::<Complex64>::zeros(2, 3);
        assert!(complex_frobenius_distance(&a, &b).is_err());
    }
}
