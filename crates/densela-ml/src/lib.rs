//! `densela-ml`: statistical learning built on `densela-core`.
//!
//! Currently provides principal component analysis ([`Pca`]) computed from
//! the one-sided Jacobi SVD of the centered data.

pub mod pca;

pub use pca::{Pca, pca};

/// Items intended for glob-import: `use densela_ml::prelude::*;`
pub mod prelude {
    pub use crate::pca::{Pca, pca};
}
