//! Grid operators: whole-grid transforms producing a new grid.
//!
//! Every operator keeps the dimensions and georeference of its input.
//! Void cells stay void.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::grid::RasterGrid;
use crate::value::GridValue;

/// A transform from one grid to another of the same shape.
pub trait GridOperator<T: GridValue>: Send + Sync {
    /// Short operator name for logs.
    fn name(&self) -> &str;

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>>;
}

/// Apply `f` to every non-void cell in parallel.
fn map_values<T, F>(grid: &RasterGrid<T>, f: F) -> RasterGrid<T>
where
    T: GridValue,
    F: Fn(f64) -> f64 + Sync,
{
    let data = grid
        .data()
        .par_iter()
        .map(|&v| {
            if v.is_void() {
                T::VOID
            } else {
                T::from_sample(f(v.to_sample()))
            }
        })
        .collect();
    grid.with_data(data)
}

fn log_operator<T: GridValue>(name: &str, grid: &RasterGrid<T>) {
    debug!(
        operator = name,
        rows = grid.rows(),
        cols = grid.cols(),
        "Applying grid operator"
    );
}

// ----------------------------------------------------------------------------
// Pointwise operators
// ----------------------------------------------------------------------------

/// Multiply every cell by a constant factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOperator {
    factor: f64,
}

impl ScaleOperator {
    pub fn new(factor: f64) -> Result<Self> {
        if !factor.is_finite() {
            return Err(RasterError::InvalidOperator(format!(
                "scale factor must be finite, got {}",
                factor
            )));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl<T: GridValue> GridOperator<T> for ScaleOperator {
    fn name(&self) -> &str {
        "scale"
    }

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>> {
        log_operator("scale", grid);
        Ok(map_values(grid, |v| v * self.factor))
    }
}

/// Add a constant to every cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetOperator {
    offset: f64,
}

impl OffsetOperator {
    pub fn new(offset: f64) -> Result<Self> {
        if !offset.is_finite() {
            return Err(RasterError::InvalidOperator(format!(
                "offset must be finite, got {}",
                offset
            )));
        }
        Ok(Self { offset })
    }
}

impl<T: GridValue> GridOperator<T> for OffsetOperator {
    fn name(&self) -> &str {
        "offset"
    }

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>> {
        log_operator("offset", grid);
        Ok(map_values(grid, |v| v + self.offset))
    }
}

/// Clamp every cell into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdOperator {
    min: f64,
    max: f64,
}

impl ThresholdOperator {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        // Rejects NaN bounds as well.
        if !(min <= max) {
            return Err(RasterError::InvalidOperator(format!(
                "threshold range is empty: [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }
}

impl<T: GridValue> GridOperator<T> for ThresholdOperator {
    fn name(&self) -> &str {
        "threshold"
    }

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>> {
        log_operator("threshold", grid);
        Ok(map_values(grid, |v| v.clamp(self.min, self.max)))
    }
}

// ----------------------------------------------------------------------------
// Terrain operators
// ----------------------------------------------------------------------------

/// Surface gradient at a node as `(dz/dx, dz/dy)` with y pointing north.
///
/// Central differences inside the grid, one-sided on the border. `None`
/// when the node or a neighbour used is void.
fn gradient<T: GridValue>(grid: &RasterGrid<T>, col: usize, row: usize) -> Option<(f64, f64)> {
    let cs = grid.cell_size();
    let centre = grid.value_at(col, row);
    if centre.is_nan() {
        return None;
    }

    let west = col.saturating_sub(1);
    let east = (col + 1).min(grid.cols() - 1);
    let north = row.saturating_sub(1);
    let south = (row + 1).min(grid.rows() - 1);

    let gx = if east > west {
        (grid.value_at(east, row) - grid.value_at(west, row)) / ((east - west) as f64 * cs)
    } else {
        0.0
    };
    let gy = if south > north {
        (grid.value_at(col, north) - grid.value_at(col, south)) / ((south - north) as f64 * cs)
    } else {
        0.0
    };

    if gx.is_nan() || gy.is_nan() {
        None
    } else {
        Some((gx, gy))
    }
}

/// Build a grid by evaluating `f` on the gradient of every node, rows in
/// parallel.
fn map_gradient<T, F>(grid: &RasterGrid<T>, f: F) -> RasterGrid<T>
where
    T: GridValue,
    F: Fn(f64, f64) -> f64 + Sync,
{
    let cols = grid.cols();
    let mut data = vec![T::VOID; grid.len()];
    data.par_chunks_mut(cols).enumerate().for_each(|(row, out)| {
        for (col, value) in out.iter_mut().enumerate() {
            *value = match gradient(grid, col, row) {
                Some((gx, gy)) => T::from_sample(f(gx, gy)),
                None => T::VOID,
            };
        }
    });
    grid.with_data(data)
}

/// Steepest slope angle in degrees, `0` for flat ground.
///
/// Assumes the vertical unit matches the horizontal cell size unit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlopeOperator;

impl<T: GridValue> GridOperator<T> for SlopeOperator {
    fn name(&self) -> &str {
        "slope"
    }

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>> {
        log_operator("slope", grid);
        Ok(map_gradient(grid, |gx, gy| gx.hypot(gy).atan().to_degrees()))
    }
}

/// Compass bearing of steepest descent in `[0, 360)`, north = 0 and
/// east = 90. Flat nodes have no aspect and become void.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AspectOperator;

impl<T: GridValue> GridOperator<T> for AspectOperator {
    fn name(&self) -> &str {
        "aspect"
    }

    fn operate(&self, grid: &RasterGrid<T>) -> Result<RasterGrid<T>> {
        log_operator("aspect", grid);
        Ok(map_gradient(grid, |gx, gy| {
            if gx == 0.0 && gy == 0.0 {
                return f64::NAN;
            }
            let bearing = (-gx).atan2(-gy).to_degrees().rem_euclid(360.0);
            if bearing >= 360.0 {
                0.0
            } else {
                bearing
            }
        }))
    }
}
