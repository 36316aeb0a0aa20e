//! Marching-squares cell classification.
//!
//! A cell is the square between four neighbouring grid nodes. Corners are
//! compared against the level to build a 4-bit code, and the code selects
//! the directed segments crossing the cell. Every segment keeps values
//! above the level on its right-hand side (looking along the segment in
//! the y-up world frame), so segments in neighbouring cells chain into
//! consistently oriented strands.

use carto_common::Point;
use carto_raster::{GridValue, RasterGrid};

/// Corner spread above which cyclic values are treated as wrapped.
const CYCLIC_WRAP_THRESHOLD: f64 = 270.0;

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// The same physical edge seen from the neighbouring cell.
    pub(crate) fn opposite(self) -> Edge {
        match self {
            Edge::Top => Edge::Bottom,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
            Edge::Left => Edge::Right,
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Edge::Top => 1,
            Edge::Right => 2,
            Edge::Bottom => 4,
            Edge::Left => 8,
        }
    }

    /// Index of the cell across this edge, `None` past the grid border.
    pub(crate) fn neighbor(
        self,
        col: usize,
        row: usize,
        cell_cols: usize,
        cell_rows: usize,
    ) -> Option<(usize, usize)> {
        match self {
            Edge::Top => row.checked_sub(1).map(|r| (col, r)),
            Edge::Bottom => (row + 1 < cell_rows).then_some((col, row + 1)),
            Edge::Left => col.checked_sub(1).map(|c| (c, row)),
            Edge::Right => (col + 1 < cell_cols).then_some((col + 1, row)),
        }
    }
}

/// A directed crossing `entry -> exit`.
pub(crate) type Segment = (Edge, Edge);

use Edge::{Bottom as B, Left as L, Right as R, Top as T};

/// Segments for codes without ambiguity; empty for 0, 15 and saddles.
const SEGMENTS: [&[Segment]; 16] = [
    &[],
    &[(L, B)],
    &[(B, R)],
    &[(L, R)],
    &[(T, L)],
    &[(T, B)],
    &[],
    &[(T, R)],
    &[(R, T)],
    &[],
    &[(B, T)],
    &[(L, T)],
    &[(R, L)],
    &[(R, B)],
    &[(B, L)],
    &[],
];

/// Code 6: bottom-right and top-left above.
const SADDLE_6_JOINED: &[Segment] = &[(B, L), (T, R)];
const SADDLE_6_SPLIT: &[Segment] = &[(B, R), (T, L)];

/// Code 9: bottom-left and top-right above.
const SADDLE_9_JOINED: &[Segment] = &[(L, T), (R, B)];
const SADDLE_9_SPLIT: &[Segment] = &[(L, B), (R, T)];

/// Corner values of one cell, void-free and already unwrapped for cyclic
/// data.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell {
    pub col: usize,
    pub row: usize,
    top_left: f64,
    top_right: f64,
    bottom_left: f64,
    bottom_right: f64,
}

impl Cell {
    /// Read the cell whose top-left node is `(col, row)`.
    ///
    /// `None` when any corner is void: such cells hold no crossing.
    pub(crate) fn read<V: GridValue>(
        grid: &RasterGrid<V>,
        col: usize,
        row: usize,
        cyclic: bool,
    ) -> Option<Cell> {
        let mut corners = [
            grid.value_at(col, row),
            grid.value_at(col + 1, row),
            grid.value_at(col, row + 1),
            grid.value_at(col + 1, row + 1),
        ];
        if corners.iter().any(|v| v.is_nan()) {
            return None;
        }
        if cyclic {
            unwrap_cyclic(&mut corners);
        }
        let [top_left, top_right, bottom_left, bottom_right] = corners;
        Some(Cell {
            col,
            row,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        })
    }

    /// Bits 0..3 set for bottom-left, bottom-right, top-left and top-right
    /// strictly above `level`.
    pub(crate) fn code(&self, level: f64) -> u8 {
        let mut code = 0;
        if self.bottom_left > level {
            code |= 1;
        }
        if self.bottom_right > level {
            code |= 2;
        }
        if self.top_left > level {
            code |= 4;
        }
        if self.top_right > level {
            code |= 8;
        }
        code
    }

    /// Directed segments crossing this cell at `level`.
    ///
    /// Saddles are resolved from the mean of the four corners: when the
    /// centre is above the level the two high corners are joined through
    /// the middle, otherwise they are split. Both strands through a saddle
    /// see the same resolution, so they never cross. This takes the place
    /// of choosing by the edge a strand entered through, which depends on
    /// tracing order.
    pub(crate) fn segments(&self, level: f64) -> &'static [Segment] {
        match self.code(level) {
            6 if self.centre() > level => SADDLE_6_JOINED,
            6 => SADDLE_6_SPLIT,
            9 if self.centre() > level => SADDLE_9_JOINED,
            9 => SADDLE_9_SPLIT,
            code => SEGMENTS[code as usize],
        }
    }

    fn centre(&self) -> f64 {
        (self.top_left + self.top_right + self.bottom_left + self.bottom_right) / 4.0
    }

    /// World position where `level` crosses `edge`.
    ///
    /// Horizontal edges are interpolated west to east and vertical edges
    /// north to south, so both cells sharing an edge compute the same
    /// point.
    pub(crate) fn crossing<V: GridValue>(
        &self,
        edge: Edge,
        level: f64,
        grid: &RasterGrid<V>,
    ) -> Point {
        let cs = grid.cell_size();
        let col = self.col as f64;
        let row = self.row as f64;
        let (x, y) = match edge {
            Edge::Top => {
                let t = fraction(self.top_left, self.top_right, level);
                (col + t, row)
            }
            Edge::Bottom => {
                let t = fraction(self.bottom_left, self.bottom_right, level);
                (col + t, row + 1.0)
            }
            Edge::Left => {
                let t = fraction(self.top_left, self.bottom_left, level);
                (col, row + t)
            }
            Edge::Right => {
                let t = fraction(self.top_right, self.bottom_right, level);
                (col + 1.0, row + t)
            }
        };
        Point::new(grid.west() + x * cs, grid.north() - y * cs)
    }
}

/// Position of `level` between `a` (at 0) and `b` (at 1).
///
/// Only called on edges with a crossing, where `a != b`.
fn fraction(a: f64, b: f64, level: f64) -> f64 {
    ((level - a) / (b - a)).clamp(0.0, 1.0)
}

/// Make wrapped angles continuous: when two corners are further apart than
/// [`CYCLIC_WRAP_THRESHOLD`], every corner above 180 is moved down by 360.
fn unwrap_cyclic(corners: &mut [f64; 4]) {
    let min = corners.iter().copied().fold(f64::INFINITY, f64::min);
    let max = corners.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max - min > CYCLIC_WRAP_THRESHOLD {
        for v in corners.iter_mut() {
            if *v > 180.0 {
                *v -= 360.0;
            }
        }
    }
}
