//! Error types for raster grids and grid ingest.

use thiserror::Error;

/// Configuration errors raised while building or reshaping a grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    /// A grid needs at least one row and one column.
    #[error("invalid grid dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Cell size must be finite and strictly positive.
    #[error("invalid cell size: {0}")]
    InvalidCellSize(f64),

    /// Georeference origin must be finite.
    #[error("invalid grid origin: west={west}, north={north}")]
    InvalidOrigin { west: f64, north: f64 },

    /// Flat data buffer does not match `rows * cols`.
    #[error("data length {actual} does not match {expected} grid cells")]
    DataLength { expected: usize, actual: usize },

    /// Row-wise construction with rows of different lengths.
    #[error("row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Cell index outside the grid.
    #[error("cell (col={col}, row={row}) is outside a {rows}x{cols} grid")]
    IndexOutOfBounds {
        col: usize,
        row: usize,
        rows: usize,
        cols: usize,
    },

    /// Requested sub-window does not fit inside the grid.
    #[error("window rows {first_row}..+{rows}, cols {first_col}..+{cols} is outside the grid")]
    WindowOutOfBounds {
        first_row: usize,
        first_col: usize,
        rows: usize,
        cols: usize,
    },

    /// A world-space region selects no grid nodes.
    #[error("region selects no grid nodes")]
    EmptyRegion,

    /// Invalid grid operator parameters.
    #[error("invalid operator parameters: {0}")]
    InvalidOperator(String),
}

/// Errors raised while ingesting a grid from text.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Failed to read the source.
    #[error("failed to read grid: {0}")]
    Io(#[from] std::io::Error),

    /// A required header key is absent.
    #[error("missing header key: {0}")]
    MissingHeader(&'static str),

    /// A header key that the reader does not understand.
    #[error("unknown header key: {0}")]
    UnknownHeader(String),

    /// A header value failed to parse or is out of range.
    #[error("invalid header value for {key}: {value:?}")]
    InvalidHeader { key: &'static str, value: String },

    /// A sample token failed to parse.
    #[error("invalid sample {token:?} at position {index}")]
    InvalidSample { index: usize, token: String },

    /// The body ended before `rows * cols` samples were read.
    #[error("expected {expected} samples, found {actual}")]
    TooFewSamples { expected: usize, actual: usize },

    /// The body holds more than `rows * cols` samples.
    #[error("more than {expected} samples in grid body")]
    TooManySamples { expected: usize },

    /// The header describes a grid that cannot be built.
    #[error(transparent)]
    Grid(#[from] RasterError),
}

/// Result type for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;
