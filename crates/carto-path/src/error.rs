//! Error types for path geometry.

use thiserror::Error;

use crate::PathCommand;

/// Errors raised by path operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// Flattening tolerance must be finite and strictly positive.
    #[error("invalid flattening tolerance: {0}")]
    InvalidTolerance(f64),

    /// The operation only handles straight segments; flatten first.
    #[error("{command:?} at instruction {index} is curved; flatten the path first")]
    CurvedSegment { index: usize, command: PathCommand },
}

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
