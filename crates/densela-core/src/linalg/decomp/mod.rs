//! Matrix decompositions.
//!
//! | Decomposition | Module        | Factorization             |
//! |---------------|---------------|---------------------------|
//! | LU            | [`lu`]        | `PA = LU`                 |
//! | Symmetric eig | [`eig`]       | `A = V diag(d) V^T`       |
//! | General eig   | [`general`]   | `A = V diag(w) V^-1`      |
//! | SVD (Jacobi)  | [`svd`]       | `A = U diag(s) V^T`       |
//! | SVD (Gram)    | [`svd_eig`]   | `A = U diag(s) V^T`       |

pub mod eig;
pub mod general;
pub mod lu;
pub mod svd;
pub mod svd_eig;

pub use eig::{Eigen, SymmetricEigen};
pub use general::GeneralEigen;
pub use lu::LuDecomposition;
pub use svd::{SvdDecomposition, SvdMethod};
pub use svd_eig::{svd_via_eig, svd_via_eig_error};
