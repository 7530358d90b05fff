//! Numerical tolerances and iteration budgets.
//!
//! Every decomposition has a plain entry point that uses
//! [`LinalgConfig::default()`] and a `*_with` variant taking an explicit
//! configuration.
//!
//! ```
//! # use densela_core::LinalgConfig;
//! let cfg = LinalgConfig::default()
//!     .with_pivot_tolerance(1e-10)
//!     .with_strict_pivoting(true);
//! assert!(cfg.strict_pivoting);
//! ```

/// Tolerances and budgets shared by the decompositions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinalgConfig {
    /// Pivot magnitude below which an LU column is treated as singular.
    pub pivot_tolerance: f64,
    /// Fail LU with `SingularMatrix` instead of skipping singular columns.
    pub strict_pivoting: bool,
    /// Absolute part of the symmetry test
    /// `|a_ij - a_ji| <= symmetry_tolerance + symmetry_rel_tolerance * |a_ji|`.
    pub symmetry_tolerance: f64,
    /// Relative part of the symmetry test. Zero makes the test purely
    /// absolute.
    pub symmetry_rel_tolerance: f64,
    /// Singular values at or below this get a zero left singular vector in
    /// the Gram-eigen SVD.
    pub rank_tolerance: f64,
    /// Jacobi sweep budget (symmetric eigen, reference SVD).
    pub max_sweeps: usize,
    /// Per-eigenvalue iteration budget for the complex QR algorithm.
    pub max_qr_iterations: usize,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1e-12,
            strict_pivoting: false,
            symmetry_tolerance: 1e-10,
            symmetry_rel_tolerance: 1e-5,
            rank_tolerance: 1e-12,
            max_sweeps: 100,
            max_qr_iterations: 60,
        }
    }
}

impl LinalgConfig {
    #[must_use]
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    #[must_use]
    pub fn with_strict_pivoting(mut self, strict: bool) -> Self {
        self.strict_pivoting = strict;
        self
    }

    #[must_use]
    pub fn with_symmetry_tolerance(mut self, tol: f64) -> Self {
        self.symmetry_tolerance = tol;
        self
    }

    #[must_use]
    pub fn with_symmetry_rel_tolerance(mut self, rtol: f64) -> Self {
        self.symmetry_rel_tolerance = rtol;
        self
    }

    #[must_use]
    pub fn with_rank_tolerance(mut self, tol: f64) -> Self {
        self.rank_tolerance = tol;
        self
    }

    #[must_use]
    pub fn with_max_sweeps(mut self, sweeps: usize) -> Self {
        self.max_sweeps = sweeps;
        self
    }

    #[must_use]
    pub fn with_max_qr_iterations(mut self, iterations: usize) -> Self {
        self.max_qr_iterations = iterations;
        self
    }
}
