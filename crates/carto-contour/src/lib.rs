//! Isoline extraction from raster grids.
//!
//! [`ContourTracer`] runs marching squares over a [`RasterGrid`] and returns
//! the strands as [`carto_path::Path`] values in world coordinates, grouped
//! by level in a [`ContourSet`].
//!
//! ```
//! use carto_contour::{ContourConfig, ContourTracer};
//! use carto_raster::{FloatGrid, Georeference};
//!
//! let grid = FloatGrid::from_rows(
//!     vec![vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0], vec![2.0, 3.0, 4.0]],
//!     Georeference::new(0.0, 2.0, 1.0).unwrap(),
//! )
//! .unwrap();
//!
//! let tracer = ContourTracer::new(ContourConfig::with_interval(1.5)).unwrap();
//! let paths = tracer.trace_level(&grid, 1.5).unwrap();
//! assert_eq!(paths.len(), 1);
//! ```
//!
//! [`RasterGrid`]: carto_raster::RasterGrid

mod cell;
pub mod config;
pub mod error;
pub mod levels;
pub mod set;
pub mod tracer;

pub use config::ContourConfig;
pub use error::{ContourError, Result};
pub use levels::{generate_contour_levels, resolve_levels, stepped_levels, MAX_LEVELS};
pub use set::{ContourGroup, ContourSet};
pub use tracer::ContourTracer;
