//! Georeferenced raster grids.
//!
//! A [`RasterGrid`] is a `rows x cols` field of samples with a
//! [`Georeference`] mapping node indices to world coordinates. Row 0 is the
//! northern edge. On top of the storage the crate provides:
//!
//! - **Sampling**: nearest, bilinear and bicubic kernels at world
//!   coordinates, returning `NaN` for void
//! - **Statistics**: min/max/mean and void counts
//! - **Operators**: pointwise and terrain transforms producing new grids
//! - **Ingest**: an ESRI ASCII grid reader
//!
//! # Example
//!
//! ```
//! use carto_raster::{FloatGrid, Georeference, InterpolationMethod};
//!
//! let georef = Georeference::new(0.0, 1.0, 1.0).unwrap();
//! let grid = FloatGrid::from_rows(vec![vec![0.0, 1.0], vec![2.0, 3.0]], georef).unwrap();
//!
//! assert_eq!(grid.sample(0.5, 0.5, InterpolationMethod::Bilinear), 1.5);
//! assert!(grid.nearest_neighbor(5.0, 5.0).is_nan());
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod grid;
pub mod interpolation;
pub mod operators;
pub mod stats;
pub mod types;
pub mod value;

// Re-export commonly used types at crate root
pub use ascii::{parse_ascii_grid, read_ascii_grid, read_ascii_grid_file, read_ascii_grid_from};
pub use carto_common::BoundingBox;
pub use config::SamplingConfig;
pub use error::{IngestError, RasterError, Result};
pub use grid::{FloatGrid, Georeference, RasterGrid, ShortGrid};
pub use interpolation::MAX_RESAMPLE_CELLS;
pub use operators::{
    AspectOperator, GridOperator, OffsetOperator, ScaleOperator, SlopeOperator, ThresholdOperator,
};
pub use types::{GridStatistics, InterpolationMethod};
pub use value::GridValue;
