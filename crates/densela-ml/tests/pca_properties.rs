//! Property tests for PCA.

use approx::assert_abs_diff_eq;
use densela_core::Matrix;
use densela_ml::{Pca, pca};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 48;

/// Data matrix with 2..=12 samples and 1..=5 features, entries in [-10, 10].
fn data() -> impl Strategy<Value = Matrix<f64>> {
    (2usize..=12, 1usize..=5).prop_flat_map(|(n, d)| {
        prop::collection::vec(-10.0f64..10.0, n * d)
            .prop_map(move |v| Matrix::from_vec(v, n, d).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn prop_components_orthonormal(x in data()) {
        let d = x.cols();
        let fit = Pca::fit(&x, d).unwrap();
        let c = fit.components();
        let cct = c.matmul(&c.transpose()).unwrap();
        prop_assert!((&cct - &Matrix::eye(d)).max_abs() < 1e-10);
    }

    #[test]
    fn prop_full_ratio_sums_to_one(x in data()) {
        let fit = pca(&x, x.cols()).unwrap();
        let total: f64 = fit.explained_variance().iter().sum();
        prop_assume!(total > 1e-9);
        let sum: f64 = fit.explained_variance_ratio().iter().sum();
        prop_assert!((sum - 1.0).abs() < 1e-10);
        prop_assert!(fit.explained_variance_ratio().iter().all(|&r| (0.0..=1.0 + 1e-12).contains(&r)));
    }

    #[test]
    fn prop_projected_variance_matches(x in data(), k_seed in 0usize..5) {
        let n = x.rows();
        let k = 1 + k_seed % x.cols();
        let fit = Pca::fit(&x, k).unwrap();
        let z = fit.projected();
        prop_assert_eq!(z.shape(), (n, k));
        for j in 0..k {
            let col = z.col(j);
            let mean: f64 = col.iter().sum::<f64>() / n as f64;
            prop_assert!(mean.abs() < 1e-9);
            let var: f64 = col.iter().map(|&v| v * v).sum::<f64>() / (n - 1) as f64;
            let want = fit.explained_variance()[j];
            prop_assert!((var - want).abs() < 1e-8 * want.max(1.0), "{var} vs {want}");
        }
    }

    #[test]
    fn prop_k_out_of_range_is_rejected(x in data(), extra in 1usize..4) {
        prop_assert!(Pca::fit(&x, 0).unwrap_err().is_range_error());
        prop_assert!(Pca::fit(&x, x.cols() + extra).unwrap_err().is_range_error());
    }
}

#[test]
fn scenario_points_along_x_axis() {
    // t on the x axis with deterministic noise of order 1e-8 on y.
    let x = Matrix::from_fn(50, 2, |i, j| {
        let t = i as f64 * 0.2 - 5.0;
        if j == 0 { t } else { 1e-8 * ((i % 3) as f64 - 1.0) }
    });
    let fit = pca(&x, 1).unwrap();
    assert_abs_diff_eq!(fit.explained_variance_ratio()[0], 1.0, epsilon = 1e-12);
    assert_eq!(fit.n_components(), 1);
    assert_eq!(fit.components().shape(), (1, 2));
    assert_eq!(fit.projected().shape(), (50, 1));
}
