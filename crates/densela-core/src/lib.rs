//! `densela-core`: foundation crate for the densela workspace.
//!
//! Provides the dense [`Matrix`] type, numeric element traits, error and
//! configuration types, and the linear algebra routines: cofactor and LU
//! determinants, pivoted LU, symmetric and general eigendecomposition, two
//! SVD algorithms and a reconstruction-error analyzer.
//!
//! # Design
//!
//! - All numerical algorithms are implemented from scratch; no BLAS/LAPACK.
//! - Generic over real element types via the [`Scalar`] / [`Float`] traits.
//!   Complex eigenvectors use [`num_complex::Complex64`].
//! - Operations never mutate caller-owned matrices; each call allocates its
//!   own working copies.
//! - Diagnostics are emitted through [`tracing`]; installing a subscriber is
//!   up to the application.

pub mod config;
pub mod dtype;
pub mod error;
pub mod linalg;
pub mod matrix;

// Re-export key types at crate root for convenience.
pub use config::LinalgConfig;
pub use dtype::{Float, Scalar};
pub use error::{CoreError, Result};
pub use matrix::Matrix;
pub use num_complex::Complex64;

/// Items intended for glob-import: `use densela_core::prelude::*;`
pub mod prelude {
    pub use crate::config::LinalgConfig;
    pub use crate::dtype::{Float, Scalar};
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{
        Eigen, LuDecomposition, SvdDecomposition, SvdMethod, SymmetricEigen, det, det_recursive,
        reconstruction_errors, svd_via_eig,
    };
    pub use crate::matrix::Matrix;
}
