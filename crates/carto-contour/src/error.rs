//! Error types for contour tracing.

use thiserror::Error;

/// Errors raised when configuring or running the contour tracer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// Contour interval must be finite and strictly positive.
    #[error("invalid contour interval: {0}")]
    InvalidInterval(f64),

    /// A contour level is NaN or infinite.
    #[error("invalid contour level: {0}")]
    InvalidLevel(f64),

    /// Explicit first level lies above the last level.
    #[error("first level {first} is above last level {last}")]
    InvalidLevelRange { first: f64, last: f64 },

    /// A strand needs at least two points to form a line.
    #[error("min_points must be at least 2, got {0}")]
    InvalidMinPoints(usize),

    /// The level sequence is unreasonably long for the interval.
    #[error("{count} contour levels requested, limit is {limit}")]
    TooManyLevels { count: usize, limit: usize },

    /// The grid has no cells to trace.
    #[error("grid of {rows}x{cols} nodes has no cells to contour")]
    GridTooSmall { rows: usize, cols: usize },
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
