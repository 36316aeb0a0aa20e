//! The georeferenced raster grid.

use carto_common::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::error::{RasterError, Result};
use crate::value::GridValue;

/// Slack applied when snapping world coordinates onto node indices.
const INDEX_EPSILON: f64 = 1e-9;

/// Snap `f` onto a whole index when within [`INDEX_EPSILON`] and clamp it
/// to `[0, n - 1]`. `None` when it lies further outside.
fn snap_index(f: f64, n: usize) -> Option<f64> {
    let last = (n - 1) as f64;
    if !(f >= -INDEX_EPSILON && f <= last + INDEX_EPSILON) {
        return None;
    }
    let nearest = f.round();
    let f = if (f - nearest).abs() <= INDEX_EPSILON {
        nearest
    } else {
        f
    };
    Some(f.clamp(0.0, last))
}

/// World position of node `(0, 0)` and the uniform node spacing.
///
/// `west` is the x of column 0 and `north` the y of row 0. Rows run
/// southward and columns eastward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Georeference {
    west: f64,
    north: f64,
    cell_size: f64,
}

impl Georeference {
    pub fn new(west: f64, north: f64, cell_size: f64) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(RasterError::InvalidCellSize(cell_size));
        }
        if !(west.is_finite() && north.is_finite()) {
            return Err(RasterError::InvalidOrigin { west, north });
        }
        Ok(Self {
            west,
            north,
            cell_size,
        })
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The same spacing with the origin moved by whole cells.
    fn shifted(&self, first_row: usize, first_col: usize) -> Self {
        Self {
            west: self.west + first_col as f64 * self.cell_size,
            north: self.north - first_row as f64 * self.cell_size,
            cell_size: self.cell_size,
        }
    }
}

/// A `rows x cols` scalar field stored row-major, north row first.
///
/// The element type is generic; see [`GridValue`] for the void convention.
/// Cell values can be changed in place, but the dimensions and georeference
/// are fixed; cropping builds a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid<T: GridValue = f32> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
    georef: Georeference,
}

/// Single-precision grid, the common case for elevation data.
pub type FloatGrid = RasterGrid<f32>;

/// 16-bit integer grid with `i16::MIN` as void.
pub type ShortGrid = RasterGrid<i16>;

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
        return Err(RasterError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

impl<T: GridValue> RasterGrid<T> {
    /// Zero-filled grid.
    pub fn new(rows: usize, cols: usize, georef: Georeference) -> Result<Self> {
        Self::filled(rows, cols, georef, T::from_sample(0.0))
    }

    /// Grid with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, georef: Georeference, value: T) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            data: vec![value; rows * cols],
            rows,
            cols,
            georef,
        })
    }

    /// Grid over a row-major buffer of exactly `rows * cols` values.
    pub fn from_data(rows: usize, cols: usize, georef: Georeference, data: Vec<T>) -> Result<Self> {
        check_dimensions(rows, cols)?;
        if data.len() != rows * cols {
            return Err(RasterError::DataLength {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            rows,
            cols,
            georef,
        })
    }

    /// Grid from a list of rows, north row first.
    pub fn from_rows(rows: Vec<Vec<T>>, georef: Georeference) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        check_dimensions(rows.len(), cols)?;
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(RasterError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self {
            data,
            rows: n_rows,
            cols,
            georef,
        })
    }

    /// A grid with the same shape and georeference over new values.
    pub(crate) fn with_data(&self, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            data,
            rows: self.rows,
            cols: self.cols,
            georef: self.georef,
        }
    }

    // ------------------------------------------------------------------
    // Shape and georeference
    // ------------------------------------------------------------------

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn georef(&self) -> &Georeference {
        &self.georef
    }

    pub fn cell_size(&self) -> f64 {
        self.georef.cell_size
    }

    pub fn west(&self) -> f64 {
        self.georef.west
    }

    pub fn north(&self) -> f64 {
        self.georef.north
    }

    /// y of the last row.
    pub fn south(&self) -> f64 {
        self.georef.north - (self.rows - 1) as f64 * self.georef.cell_size
    }

    /// x of the last column.
    pub fn east(&self) -> f64 {
        self.georef.west + (self.cols - 1) as f64 * self.georef.cell_size
    }

    /// Footprint spanned by the grid nodes.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.west(), self.south(), self.east(), self.north())
    }

    // ------------------------------------------------------------------
    // Cell access
    // ------------------------------------------------------------------

    /// Raw row-major values, north row first.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Values of one row, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.rows {
            return None;
        }
        Some(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Get the value at a specific grid coordinate.
    pub fn get(&self, col: usize, row: usize) -> Option<T> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// Overwrite one cell. The georeference is untouched.
    pub fn set(&mut self, col: usize, row: usize, value: T) -> Result<()> {
        if col >= self.cols || row >= self.rows {
            return Err(RasterError::IndexOutOfBounds {
                col,
                row,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Cell value as a sample: `NaN` when void or outside the grid.
    pub fn value_at(&self, col: usize, row: usize) -> f64 {
        self.get(col, row).map_or(f64::NAN, GridValue::to_sample)
    }

    // ------------------------------------------------------------------
    // World <-> index conversion
    // ------------------------------------------------------------------

    pub fn column_to_x(&self, col: usize) -> f64 {
        self.georef.west + col as f64 * self.georef.cell_size
    }

    pub fn row_to_y(&self, row: usize) -> f64 {
        self.georef.north - row as f64 * self.georef.cell_size
    }

    /// Nearest column to `x`, or `None` outside `[west, east]`.
    pub fn x_to_column(&self, x: f64) -> Option<usize> {
        if !(x >= self.west() && x <= self.east()) {
            return None;
        }
        let col = ((x - self.west()) / self.cell_size()).round() as usize;
        Some(col.min(self.cols - 1))
    }

    /// Nearest row to `y`, or `None` outside `[south, north]`.
    pub fn y_to_row(&self, y: f64) -> Option<usize> {
        if !(y >= self.south() && y <= self.north()) {
            return None;
        }
        let row = ((self.north() - y) / self.cell_size()).round() as usize;
        Some(row.min(self.rows - 1))
    }

    /// Fractional `(column, row)` of `(x, y)`, measured from the north-west
    /// node.
    ///
    /// Positions within [`INDEX_EPSILON`] of a node snap onto it, so world
    /// coordinates computed from node indices land back on whole indices.
    /// `None` outside the footprint.
    pub(crate) fn fractional_index(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let cs = self.cell_size();
        let col = snap_index((x - self.west()) / cs, self.cols)?;
        let row = snap_index((self.north() - y) / cs, self.rows)?;
        Some((col, row))
    }

    // ------------------------------------------------------------------
    // Cropping
    // ------------------------------------------------------------------

    /// Copy of the `new_rows x new_cols` window starting at
    /// `(first_row, first_col)`, with the origin shifted onto that node.
    pub fn cut(
        &self,
        first_row: usize,
        first_col: usize,
        new_rows: usize,
        new_cols: usize,
    ) -> Result<Self> {
        check_dimensions(new_rows, new_cols)?;
        let fits = first_row
            .checked_add(new_rows)
            .is_some_and(|end| end <= self.rows)
            && first_col
                .checked_add(new_cols)
                .is_some_and(|end| end <= self.cols);
        if !fits {
            return Err(RasterError::WindowOutOfBounds {
                first_row,
                first_col,
                rows: new_rows,
                cols: new_cols,
            });
        }

        let mut data = Vec::with_capacity(new_rows * new_cols);
        for row in first_row..first_row + new_rows {
            let start = row * self.cols + first_col;
            data.extend_from_slice(&self.data[start..start + new_cols]);
        }
        Ok(Self {
            data,
            rows: new_rows,
            cols: new_cols,
            georef: self.georef.shifted(first_row, first_col),
        })
    }

    /// Crop to the nodes lying inside `region` (edges inclusive).
    pub fn cut_region(&self, region: &BoundingBox) -> Result<Self> {
        let cs = self.cell_size();
        let first_col = ((region.min_x - self.west()) / cs - INDEX_EPSILON).ceil().max(0.0);
        let last_col = ((region.max_x - self.west()) / cs + INDEX_EPSILON)
            .floor()
            .min((self.cols - 1) as f64);
        let first_row = ((self.north() - region.max_y) / cs - INDEX_EPSILON).ceil().max(0.0);
        let last_row = ((self.north() - region.min_y) / cs + INDEX_EPSILON)
            .floor()
            .min((self.rows - 1) as f64);

        // NaN bounds fail these comparisons as well.
        if !(first_col <= last_col && first_row <= last_row) {
            return Err(RasterError::EmptyRegion);
        }

        let first_col = first_col as usize;
        let first_row = first_row as usize;
        self.cut(
            first_row,
            first_col,
            last_row as usize - first_row + 1,
            last_col as usize - first_col + 1,
        )
    }
}
