//! Bezier flattening.
//!
//! Curves are approximated by recursive De Casteljau subdivision at
//! `t = 0.5` until each piece is straight enough for the requested
//! tolerance. Quadratic curves are degree-elevated to cubics first.

use carto_common::Point;

use crate::command::{Elements, PathElement};
use crate::error::{PathError, Result};
use crate::path::Path;

/// Tolerance used by point containment queries.
pub const CONTAINS_TOLERANCE: f64 = 1e-3;

/// Hard cap on subdivision depth (at most `2^depth` segments per curve).
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Lazy, straight-line-only view of a path.
///
/// Yields only `MoveTo`, `LineTo` and `Close` elements. The iterator is
/// `Clone`, so a pass can be restarted from any position; calling
/// [`Path::flatten`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    elements: Elements<'a>,
    tolerance: f64,
    pen: Point,
    subpath_start: Point,
    // Pending line endpoints of the curve being emitted, in reverse order.
    pending: Vec<Point>,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(path: &'a Path, tolerance: f64) -> Self {
        Self {
            elements: path.elements(),
            tolerance,
            pen: Point::default(),
            subpath_start: Point::default(),
            pending: Vec::new(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Iterator for Flatten<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        loop {
            if let Some(p) = self.pending.pop() {
                return Some(PathElement::LineTo(p));
            }

            match self.elements.next()? {
                PathElement::MoveTo(p) => {
                    self.pen = p;
                    self.subpath_start = p;
                    return Some(PathElement::MoveTo(p));
                }
                PathElement::LineTo(p) => {
                    self.pen = p;
                    return Some(PathElement::LineTo(p));
                }
                PathElement::Close => {
                    self.pen = self.subpath_start;
                    return Some(PathElement::Close);
                }
                PathElement::QuadTo(c, p) => {
                    let (c1, c2) = elevate_quad(self.pen, c, p);
                    self.push_cubic(c1, c2, p);
                }
                PathElement::CurveTo(c1, c2, p) => {
                    self.push_cubic(c1, c2, p);
                }
            }
        }
    }
}

impl Flatten<'_> {
    fn push_cubic(&mut self, c1: Point, c2: Point, end: Point) {
        let mut out = Vec::new();
        subdivide_cubic([self.pen, c1, c2, end], self.tolerance, 0, &mut out);
        out.reverse();
        self.pending = out;
        self.pen = end;
    }
}

impl Path {
    /// Straight-line approximation of the path within `tolerance`.
    ///
    /// Returns an error for a non-positive or non-finite tolerance.
    pub fn flatten(&self, tolerance: f64) -> Result<Flatten<'_>> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(PathError::InvalidTolerance(tolerance));
        }
        Ok(Flatten::new(self, tolerance))
    }

    /// Materialise [`Path::flatten`] into a new straight-only path.
    pub fn flattened(&self, tolerance: f64) -> Result<Path> {
        let mut out = Path::with_capacity(self.command_count(), self.point_count());
        for element in self.flatten(tolerance)? {
            match element {
                PathElement::MoveTo(p) => out.move_to(p.x, p.y),
                PathElement::LineTo(p) => out.line_to(p.x, p.y),
                PathElement::Close => out.close_path(),
                PathElement::QuadTo(..) | PathElement::CurveTo(..) => {
                    unreachable!("flatten yields straight elements only")
                }
            }
        }
        Ok(out)
    }
}

/// Control points of the cubic equal to the quadratic `(p0, c, p1)`.
fn elevate_quad(p0: Point, c: Point, p1: Point) -> (Point, Point) {
    (p0.lerp(c, 2.0 / 3.0), p1.lerp(c, 2.0 / 3.0))
}

/// Append the line endpoints approximating cubic `pts` to `out`.
///
/// Pieces that are already flat and have zero length emit nothing.
fn subdivide_cubic(pts: [Point; 4], tolerance: f64, depth: u32, out: &mut Vec<Point>) {
    let [p1, _, _, p4] = pts;
    if depth >= MAX_SUBDIVISION_DEPTH || is_flat(&pts, tolerance) {
        if p1 != p4 {
            out.push(p4);
        }
        return;
    }
    let (left, right) = split_cubic(&pts);
    subdivide_cubic(left, tolerance, depth + 1, out);
    subdivide_cubic(right, tolerance, depth + 1, out);
}

/// Straight enough when both control points lie within `tolerance` of the
/// chord and the control polygon is no more than `tolerance` longer than
/// the chord.
fn is_flat(pts: &[Point; 4], tolerance: f64) -> bool {
    let [p1, p2, p3, p4] = *pts;
    let chord = p1.distance(p4);
    if !chord.is_finite() {
        // Subdividing cannot converge; let the depth cap end it quickly.
        return true;
    }

    if chord <= f64::EPSILON {
        return p1.distance(p2) <= tolerance && p1.distance(p3) <= tolerance;
    }

    let dx = p4.x - p1.x;
    let dy = p4.y - p1.y;
    let d2 = ((p2.x - p1.x) * dy - (p2.y - p1.y) * dx).abs() / chord;
    let d3 = ((p3.x - p1.x) * dy - (p3.y - p1.y) * dx).abs() / chord;
    if d2.max(d3) > tolerance {
        return false;
    }

    let polygon = p1.distance(p2) + p2.distance(p3) + p3.distance(p4);
    polygon - chord <= tolerance
}

/// Split a cubic at `t = 0.5` into its two halves.
fn split_cubic(pts: &[Point; 4]) -> ([Point; 4], [Point; 4]) {
    let [p1, p2, p3, p4] = *pts;
    let p12 = p1.midpoint(p2);
    let p23 = p2.midpoint(p3);
    let p34 = p3.midpoint(p4);
    let p123 = p12.midpoint(p23);
    let p234 = p23.midpoint(p34);
    let mid = p123.midpoint(p234);
    ([p1, p12, p123, mid], [mid, p234, p34, p4])
}
