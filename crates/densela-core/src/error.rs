use thiserror::Error;

/// All errors returned by `densela-core` and the crates built on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The operation requires a square matrix.
    #[error("matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// A shape specification is invalid for the given data.
    #[error("invalid shape {shape:?}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        reason: &'static str,
    },

    /// A row/column index is out of bounds.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    /// A count parameter lies outside its valid closed interval.
    #[error("{name} = {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    /// A pivot fell below tolerance where an exact factorization is required.
    #[error("singular matrix: pivot in column {column} is below tolerance")]
    SingularMatrix { column: usize },

    /// An iterative method exhausted its iteration budget.
    #[error("{algorithm} did not converge after {iterations} iterations")]
    NoConvergence {
        algorithm: &'static str,
        iterations: usize,
    },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

impl CoreError {
    /// Whether the error reports a malformed or incompatible shape.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::NotSquare { .. } | Self::DimensionMismatch { .. } | Self::InvalidShape { .. }
        )
    }

    /// Whether the error reports a parameter outside its valid range.
    pub fn is_range_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::IndexOutOfBounds { .. })
    }
}

/// Convenience alias used throughout `densela`.
pub type Result<T> = std::result::Result<T, CoreError>;
