//! Strand assembly: walks marching-squares segments across the grid and
//! stitches them into continuous paths.

use carto_common::Point;
use carto_path::Path;
use carto_raster::{GridValue, RasterGrid};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::cell::{Cell, Edge};
use crate::config::ContourConfig;
use crate::error::{ContourError, Result};
use crate::levels::resolve_levels;
use crate::set::{ContourGroup, ContourSet};

/// Traces isolines over raster grids.
///
/// Every strand keeps values above its level on the right-hand side.
/// Strands that return to their start are closed paths; the others end on
/// the grid border or against void cells.
#[derive(Debug, Clone)]
pub struct ContourTracer {
    config: ContourConfig,
}

impl ContourTracer {
    pub fn new(config: ContourConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ContourConfig {
        &self.config
    }

    /// Trace every configured level. Levels are traced in parallel and
    /// returned in ascending order.
    pub fn trace<T: GridValue>(&self, grid: &RasterGrid<T>) -> Result<ContourSet> {
        check_grid(grid)?;
        let (min, max) = grid.min_max();
        let levels = resolve_levels(&self.config, min, max)?;
        debug!(
            min,
            max,
            interval = self.config.interval,
            levels = levels.len(),
            "Resolved contour levels"
        );

        let groups = levels
            .par_iter()
            .map(|&level| {
                let paths = self.trace_level(grid, level)?;
                Ok(ContourGroup::new(level, paths))
            })
            .collect::<Result<Vec<_>>>()?;

        let set = ContourSet::new(groups);
        info!(
            levels = set.len(),
            paths = set.path_count(),
            cyclic = self.config.cyclic,
            "Traced contours"
        );
        Ok(set)
    }

    /// Trace a single level.
    pub fn trace_level<T: GridValue>(&self, grid: &RasterGrid<T>, level: f64) -> Result<Vec<Path>> {
        if !level.is_finite() {
            return Err(ContourError::InvalidLevel(level));
        }
        check_grid(grid)?;

        let mut walker = Walker::new(grid, level, self.config.cyclic);
        let mut paths = Vec::new();
        for row in 0..walker.cell_rows {
            for col in 0..walker.cell_cols {
                while let Some(points) = walker.next_strand(col, row) {
                    if let Some(path) = finish_strand(points, self.config.min_points) {
                        paths.push(path);
                    }
                }
            }
        }

        debug!(level, paths = paths.len(), "Traced contour level");
        Ok(paths)
    }
}

fn check_grid<T: GridValue>(grid: &RasterGrid<T>) -> Result<()> {
    if grid.rows() < 2 || grid.cols() < 2 {
        return Err(ContourError::GridTooSmall {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    Ok(())
}

/// Per-level tracing state: which segments have already joined a strand.
struct Walker<'a, T: GridValue> {
    grid: &'a RasterGrid<T>,
    level: f64,
    cyclic: bool,
    cell_cols: usize,
    cell_rows: usize,
    /// Entry-edge bits of the used segments, one byte per cell.
    used: Vec<u8>,
}

impl<'a, T: GridValue> Walker<'a, T> {
    fn new(grid: &'a RasterGrid<T>, level: f64, cyclic: bool) -> Self {
        let cell_cols = grid.cols() - 1;
        let cell_rows = grid.rows() - 1;
        Self {
            grid,
            level,
            cyclic,
            cell_cols,
            cell_rows,
            used: vec![0; cell_cols * cell_rows],
        }
    }

    fn cell(&self, col: usize, row: usize) -> Option<Cell> {
        Cell::read(self.grid, col, row, self.cyclic)
    }

    /// Mark the segment entering through `entry` as used. False when it
    /// already was.
    fn claim(&mut self, cell: &Cell, entry: Edge) -> bool {
        let slot = &mut self.used[cell.row * self.cell_cols + cell.col];
        if *slot & entry.bit() != 0 {
            return false;
        }
        *slot |= entry.bit();
        true
    }

    fn point(&self, cell: &Cell, edge: Edge) -> Point {
        cell.crossing(edge, self.level, self.grid)
    }

    fn across(&self, cell: &Cell, edge: Edge) -> Option<Cell> {
        let (col, row) = edge.neighbor(cell.col, cell.row, self.cell_cols, self.cell_rows)?;
        self.cell(col, row)
    }

    /// Start a strand from the first unused segment of `(col, row)` and
    /// follow it both ways.
    fn next_strand(&mut self, col: usize, row: usize) -> Option<Vec<Point>> {
        let start = self.cell(col, row)?;
        let &(entry, exit) = start
            .segments(self.level)
            .iter()
            .find(|(entry, _)| self.used[row * self.cell_cols + col] & entry.bit() == 0)?;
        self.claim(&start, entry);

        let mut forward = vec![self.point(&start, entry), self.point(&start, exit)];
        let closed = self.walk_forward(start, exit, &mut forward);
        if closed {
            return Some(forward);
        }

        let mut backward = Vec::new();
        self.walk_backward(start, entry, &mut backward);
        backward.reverse();
        backward.extend(forward);
        Some(backward)
    }

    /// Follow exits until the strand leaves the grid, meets a void or
    /// already traced cell, or comes back to its own start. Returns true in
    /// the last case.
    fn walk_forward(&mut self, mut cell: Cell, mut exit: Edge, points: &mut Vec<Point>) -> bool {
        loop {
            let Some(next) = self.across(&cell, exit) else {
                return false;
            };
            let entry = exit.opposite();
            let Some(&(_, next_exit)) = next
                .segments(self.level)
                .iter()
                .find(|(e, _)| *e == entry)
            else {
                return false;
            };
            if !self.claim(&next, entry) {
                // Only the start segment can be reached twice.
                return true;
            }
            points.push(self.point(&next, next_exit));
            cell = next;
            exit = next_exit;
        }
    }

    /// Follow entries upstream from the start segment, pushing points in
    /// reverse travel order.
    fn walk_backward(&mut self, mut cell: Cell, mut entry: Edge, points: &mut Vec<Point>) {
        loop {
            let Some(prev) = self.across(&cell, entry) else {
                return;
            };
            let exit = entry.opposite();
            let Some(&(prev_entry, _)) = prev
                .segments(self.level)
                .iter()
                .find(|(_, x)| *x == exit)
            else {
                return;
            };
            if !self.claim(&prev, prev_entry) {
                return;
            }
            points.push(self.point(&prev, prev_entry));
            cell = prev;
            entry = prev_entry;
        }
    }
}

/// Tidy a raw strand and turn it into a path.
///
/// Consecutive duplicates (crossings through a node exactly on the level)
/// are collapsed. A strand ending where it started becomes a closed path.
/// `None` when fewer than `min_points` points remain.
fn finish_strand(mut points: Vec<Point>, min_points: usize) -> Option<Path> {
    points.dedup();
    let closed = points.len() >= 4 && points.first() == points.last();
    if closed {
        points.pop();
    }
    if points.len() < min_points.max(2) {
        return None;
    }
    Some(Path::from_polyline(&points, closed))
}
