//! # densela
//!
//! Dense linear algebra in pure Rust: matrices, cofactor and LU
//! determinants, pivoted LU, symmetric and general eigendecomposition,
//! SVD (one-sided Jacobi and Gram-matrix eigen), reconstruction-error
//! analysis and PCA.
//!
//! One `use densela::prelude::*;` brings the common types into scope.
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `core` *(default)* | Matrix, decompositions, reconstruction analysis |
//! | `ml` | Principal component analysis |
//! | `serde` | `Serialize`/`Deserialize` for configuration and reports |

pub use densela_core as core;

#[cfg(feature = "ml")]
pub use densela_ml as ml;

/// Glob-import convenience: `use densela::prelude::*;`
pub mod prelude {
    pub use densela_core::prelude::*;

    #[cfg(feature = "ml")]
    pub use densela_ml::prelude::*;
}
