//! Interpolation kernels for sampling a grid at world coordinates.
//!
//! All kernels return `f64` with `NaN` for void: outside the grid
//! footprint, or wherever a void cell contributes to the result.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{RasterError, Result};
use crate::grid::{Georeference, RasterGrid};
use crate::types::InterpolationMethod;
use crate::value::GridValue;

/// Largest node count `resample` will allocate.
pub const MAX_RESAMPLE_CELLS: usize = 1 << 28;

impl<T: GridValue> RasterGrid<T> {
    /// Value of the nearest node.
    pub fn nearest_neighbor(&self, x: f64, y: f64) -> f64 {
        match (self.x_to_column(x), self.y_to_row(y)) {
            (Some(col), Some(row)) => self.value_at(col, row),
            _ => f64::NAN,
        }
    }

    /// Bilinear blend of the four corners of the cell containing `(x, y)`.
    ///
    /// Offsets are measured from the north-west corner of the cell. A
    /// corner whose weight is exactly zero is not read, so sampling on a
    /// node or along a cell edge only depends on the nodes it touches.
    pub fn bilinear(&self, x: f64, y: f64) -> f64 {
        let Some((fx, fy)) = self.fractional_index(x, y) else {
            return f64::NAN;
        };

        let col = fx.floor() as usize;
        let row = fy.floor() as usize;
        let rel_x = fx - col as f64;
        let rel_y = fy - row as f64;

        let h1 = self.value_at(col, row);
        let h2 = if rel_x > 0.0 {
            self.value_at(col + 1, row)
        } else {
            h1
        };
        let (h3, h4) = if rel_y > 0.0 {
            let h3 = self.value_at(col, row + 1);
            let h4 = if rel_x > 0.0 {
                self.value_at(col + 1, row + 1)
            } else {
                h3
            };
            (h3, h4)
        } else {
            (h1, h2)
        };

        h1 + (h2 - h1) * rel_x + (h3 - h1) * rel_y + (h1 - h2 - h3 + h4) * rel_x * rel_y
    }

    /// Separable cubic over the 4x4 nodes around the containing cell.
    ///
    /// Indices past the grid edge are reflected back inside, so cells on
    /// the border still get a full neighbourhood.
    pub fn bicubic(&self, x: f64, y: f64) -> f64 {
        let Some((fx, fy)) = self.fractional_index(x, y) else {
            return f64::NAN;
        };

        let col = fx.floor() as isize;
        let row = fy.floor() as isize;
        let u = fx - col as f64;
        let v = fy - row as f64;

        let mut along_rows = [0.0; 4];
        for (j, slot) in along_rows.iter_mut().enumerate() {
            let r = mirror(row - 1 + j as isize, self.rows());
            let c = |i: isize| self.value_at(mirror(col - 1 + i, self.cols()), r);
            *slot = cubic(u, c(0), c(1), c(2), c(3));
        }
        cubic(v, along_rows[0], along_rows[1], along_rows[2], along_rows[3])
    }

    /// Dispatch to the kernel named by `method`.
    pub fn sample(&self, x: f64, y: f64, method: InterpolationMethod) -> f64 {
        match method {
            InterpolationMethod::Nearest => self.nearest_neighbor(x, y),
            InterpolationMethod::Bilinear => self.bilinear(x, y),
            InterpolationMethod::Bicubic => self.bicubic(x, y),
        }
    }

    /// Sample the grid onto a new node spacing over the same footprint.
    ///
    /// The north-west node is kept; the node count along each axis is
    /// the number of whole `cell_size` steps that fit in the footprint.
    pub fn resample(&self, cell_size: f64, method: InterpolationMethod) -> Result<Self> {
        let georef = Georeference::new(self.west(), self.north(), cell_size)?;
        let cols = steps(self.east() - self.west(), cell_size);
        let rows = steps(self.north() - self.south(), cell_size);
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len <= MAX_RESAMPLE_CELLS)
            .ok_or(RasterError::InvalidDimensions { rows, cols })?;

        debug!(
            src_rows = self.rows(),
            src_cols = self.cols(),
            rows,
            cols,
            cell_size,
            method = %method,
            "Resampling grid"
        );

        let mut data = vec![T::VOID; len];
        data.par_chunks_mut(cols)
            .enumerate()
            .for_each(|(row, out)| {
                let y = georef.north() - row as f64 * cell_size;
                for (col, value) in out.iter_mut().enumerate() {
                    let x = georef.west() + col as f64 * cell_size;
                    *value = T::from_sample(self.sample(x, y, method));
                }
            });

        Self::from_data(rows, cols, georef, data)
    }
}

fn steps(extent: f64, cell_size: f64) -> usize {
    ((extent / cell_size + 1e-9).floor() as usize).saturating_add(1)
}

/// Reflect an index across the grid edges into `[0, n)`.
fn mirror(i: isize, n: usize) -> usize {
    let last = n as isize - 1;
    let reflected = if i < 0 {
        -i
    } else if i > last {
        2 * last - i
    } else {
        i
    };
    reflected.clamp(0, last.max(0)) as usize
}

/// Catmull-Rom cubic through `c1` (t = 0) and `c2` (t = 1).
fn cubic(t: f64, c0: f64, c1: f64, c2: f64, c3: f64) -> f64 {
    (t * (t * (t * (c3 - 3.0 * c2 + 3.0 * c1 - c0) + (-c3 + 4.0 * c2 - 5.0 * c1 + 2.0 * c0))
        + (c2 - c0))
        + 2.0 * c1)
        / 2.0
}
