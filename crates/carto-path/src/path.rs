//! The flat-array path model and its mutators.

use std::cell::Cell;

use carto_common::{AffineTransform, BoundingBox, Point};

use crate::command::{Elements, PathCommand, PathElement};

/// Cached bounding box state.
///
/// Insertions keep a `Known` box up to date; removals and transforms can
/// shrink the envelope, so they mark it `Stale` and the next query rescans.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum BoundsCache {
    #[default]
    Empty,
    Stale,
    Known(BoundingBox),
}

/// A 2D path made of one or more subpaths of lines and bezier curves.
///
/// Instructions and coordinates are stored in two flat buffers. The number
/// of coordinate pairs always equals the sum of
/// [`PathCommand::point_count`] over the instructions. Cloning deep-copies
/// both buffers.
#[derive(Debug, Clone, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
    coords: Vec<f64>,
    bounds: Cell<BoundsCache>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.commands == other.commands && self.coords == other.coords
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty path with room for `commands` instructions and `points` points.
    pub fn with_capacity(commands: usize, points: usize) -> Self {
        Self {
            commands: Vec::with_capacity(commands),
            coords: Vec::with_capacity(points * 2),
            bounds: Cell::new(BoundsCache::Empty),
        }
    }

    /// Build a LineTo-only path through `points`, closed if requested.
    pub fn from_polyline(points: &[Point], closed: bool) -> Self {
        let mut path = Self::with_capacity(points.len() + 1, points.len());
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(first.x, first.y);
            for p in iter {
                path.line_to(p.x, p.y);
            }
            if closed {
                path.close_path();
            }
        }
        path
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Start a new subpath at `(x, y)`.
    ///
    /// A `MoveTo` directly following another `MoveTo` replaces it instead
    /// of leaving an empty subpath behind.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if self.commands.last() == Some(&PathCommand::MoveTo) {
            self.coords.truncate(self.coords.len() - 2);
            self.coords.push(x);
            self.coords.push(y);
            self.bounds.set(BoundsCache::Stale);
            return;
        }
        self.commands.push(PathCommand::MoveTo);
        self.push_point(x, y);
    }

    /// Straight segment from the pen to `(x, y)`.
    ///
    /// On an empty path there is no pen position; the call starts a subpath
    /// at `(x, y)` as if it were a `move_to`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.commands.is_empty() {
            self.move_to(x, y);
            return;
        }
        self.commands.push(PathCommand::LineTo);
        self.push_point(x, y);
    }

    /// Quadratic bezier with control point `(cx, cy)` ending at `(x, y)`.
    ///
    /// On an empty path a subpath is started at the control point first.
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        if self.commands.is_empty() {
            self.move_to(cx, cy);
        }
        self.commands.push(PathCommand::QuadTo);
        self.push_point(cx, cy);
        self.push_point(x, y);
    }

    /// Cubic bezier with control points `(c1x, c1y)`, `(c2x, c2y)` ending at
    /// `(x, y)`.
    ///
    /// On an empty path a subpath is started at the first control point.
    pub fn curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        if self.commands.is_empty() {
            self.move_to(c1x, c1y);
        }
        self.commands.push(PathCommand::CurveTo);
        self.push_point(c1x, c1y);
        self.push_point(c2x, c2y);
        self.push_point(x, y);
    }

    /// Close the current subpath back to its `MoveTo` point. Ignored on an
    /// empty path.
    pub fn close_path(&mut self) {
        if !self.commands.is_empty() {
            self.commands.push(PathCommand::Close);
        }
    }

    /// Drop the most recent instruction and its points.
    pub fn remove_last_instruction(&mut self) -> Option<PathCommand> {
        let command = self.commands.pop()?;
        let remaining = self.coords.len() - command.point_count() * 2;
        self.coords.truncate(remaining);
        self.invalidate_bounds();
        Some(command)
    }

    /// Append the instructions of `other`.
    ///
    /// With `connect`, a leading `MoveTo` of `other` becomes a `LineTo` so
    /// the pen does not lift between the two paths.
    pub fn append(&mut self, other: &Path, connect: bool) {
        if other.commands.is_empty() {
            return;
        }
        let joined = connect && !self.commands.is_empty();
        let first = self.commands.len();
        self.commands.extend_from_slice(&other.commands);
        self.coords.extend_from_slice(&other.coords);
        if joined && self.commands[first] == PathCommand::MoveTo {
            self.commands[first] = PathCommand::LineTo;
        }

        let merged = match (self.bounds.get(), other.bounds.get()) {
            (BoundsCache::Stale, _) | (_, BoundsCache::Stale) => BoundsCache::Stale,
            (BoundsCache::Empty, theirs) => theirs,
            (ours, BoundsCache::Empty) => ours,
            (BoundsCache::Known(a), BoundsCache::Known(b)) => BoundsCache::Known(a.union(&b)),
        };
        self.bounds.set(merged);
    }

    /// Remove every instruction and point.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.coords.clear();
        self.bounds.set(BoundsCache::Empty);
    }

    // ------------------------------------------------------------------
    // Whole-path mutation
    // ------------------------------------------------------------------

    /// Scale every point by `factor` about the pivot `(cx, cy)`.
    pub fn scale(&mut self, factor: f64, cx: f64, cy: f64) {
        for xy in self.coords.chunks_exact_mut(2) {
            xy[0] = cx + (xy[0] - cx) * factor;
            xy[1] = cy + (xy[1] - cy) * factor;
        }
        self.invalidate_bounds();
    }

    /// Apply an affine map to every point.
    pub fn transform(&mut self, transform: &AffineTransform) {
        if transform.is_identity() {
            return;
        }
        for xy in self.coords.chunks_exact_mut(2) {
            let (x, y) = transform.apply(xy[0], xy[1]);
            xy[0] = x;
            xy[1] = y;
        }
        self.invalidate_bounds();
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Flat `x0, y0, x1, y1, ...` coordinate buffer.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn point(&self, index: usize) -> Option<Point> {
        let x = *self.coords.get(index * 2)?;
        let y = *self.coords.get(index * 2 + 1)?;
        Some(Point::new(x, y))
    }

    /// Every stored point, control points included.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.coords
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
    }

    pub fn elements(&self) -> Elements<'_> {
        Elements::new(&self.commands, &self.coords)
    }

    pub fn has_curves(&self) -> bool {
        self.commands.iter().any(|c| c.is_curve())
    }

    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|&&c| c == PathCommand::MoveTo)
            .count()
    }

    /// First point of the path.
    pub fn start_point(&self) -> Option<Point> {
        self.point(0)
    }

    /// Last stored point (the end of the final drawing instruction).
    pub fn end_point(&self) -> Option<Point> {
        self.point_count().checked_sub(1).and_then(|i| self.point(i))
    }

    /// Pen position: the last point, or the subpath start after a `Close`.
    pub fn current_point(&self) -> Option<Point> {
        let mut pen = None;
        let mut subpath_start = None;
        for element in self.elements() {
            match element {
                PathElement::MoveTo(p) => {
                    subpath_start = Some(p);
                    pen = Some(p);
                }
                PathElement::Close => pen = subpath_start,
                other => pen = other.end_point(),
            }
        }
        pen
    }

    /// True when the final instruction is a `Close`.
    pub fn is_closed(&self) -> bool {
        self.commands.last() == Some(&PathCommand::Close)
    }

    /// Axis-aligned envelope of every stored point, control points
    /// included. `None` for an empty path.
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self.bounds.get() {
            BoundsCache::Empty => None,
            BoundsCache::Known(bbox) => Some(bbox),
            BoundsCache::Stale => {
                let recomputed = BoundingBox::from_points(self.points());
                self.bounds.set(match recomputed {
                    Some(bbox) => BoundsCache::Known(bbox),
                    None => BoundsCache::Empty,
                });
                recomputed
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn push_point(&mut self, x: f64, y: f64) {
        self.coords.push(x);
        self.coords.push(y);
        match self.bounds.get() {
            BoundsCache::Empty => self.bounds.set(BoundsCache::Known(BoundingBox::from_point(x, y))),
            BoundsCache::Known(mut bbox) => {
                bbox.include(x, y);
                self.bounds.set(BoundsCache::Known(bbox));
            }
            BoundsCache::Stale => {}
        }
    }

    fn invalidate_bounds(&mut self) {
        let state = if self.coords.is_empty() {
            BoundsCache::Empty
        } else {
            BoundsCache::Stale
        };
        self.bounds.set(state);
    }
}
