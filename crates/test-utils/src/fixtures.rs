//! Common test fixtures: grid layouts and ESRI ASCII grid files.

use std::fmt::Write as _;
use std::io::Write as _;

use tempfile::NamedTempFile;

/// Common grid layouts for testing.
pub mod grid {
    /// Simple 10x10 grid with unit cells and its north-west node at (0, 9).
    pub const SIMPLE_10X10: GridSpec = GridSpec {
        cols: 10,
        rows: 10,
        west: 0.0,
        north: 9.0,
        cell_size: 1.0,
    };

    /// Global 1 degree grid, nodes on whole degrees.
    pub const GLOBAL_1DEG: GridSpec = GridSpec {
        cols: 360,
        rows: 181,
        west: -180.0,
        north: 90.0,
        cell_size: 1.0,
    };

    /// Grid layout for testing: node counts, north-west node and spacing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub cols: usize,
        pub rows: usize,
        pub west: f64,
        pub north: f64,
        pub cell_size: f64,
    }

    impl GridSpec {
        /// Returns the total number of grid nodes.
        pub fn size(&self) -> usize {
            self.cols * self.rows
        }

        /// Easternmost node coordinate.
        pub fn east(&self) -> f64 {
            self.west + (self.cols as f64 - 1.0) * self.cell_size
        }

        /// Southernmost node coordinate.
        pub fn south(&self) -> f64 {
            self.north - (self.rows as f64 - 1.0) * self.cell_size
        }
    }
}

/// Renders an ESRI ASCII grid with a centre-registered origin.
///
/// `data` is row-major with row 0 at the north edge. NaN values are written
/// as `nodata` when one is given.
pub fn ascii_grid_text(spec: &grid::GridSpec, nodata: Option<f64>, data: &[f32]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "ncols {}", spec.cols);
    let _ = writeln!(text, "nrows {}", spec.rows);
    let _ = writeln!(text, "xllcenter {}", spec.west);
    let _ = writeln!(text, "yllcenter {}", spec.south());
    let _ = writeln!(text, "cellsize {}", spec.cell_size);
    if let Some(nodata) = nodata {
        let _ = writeln!(text, "NODATA_value {}", nodata);
    }
    for row in data.chunks(spec.cols.max(1)) {
        let line: Vec<String> = row
            .iter()
            .map(|&v| match nodata {
                Some(nd) if v.is_nan() => nd.to_string(),
                _ => v.to_string(),
            })
            .collect();
        let _ = writeln!(text, "{}", line.join(" "));
    }
    text
}

/// Writes `contents` to a fresh temporary `.asc` file.
///
/// The file is deleted when the returned handle is dropped.
pub fn write_temp_grid(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".asc")
        .tempfile()
        .expect("Failed to create temp grid file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp grid file");
    file.flush().expect("Failed to flush temp grid file");
    file
}
