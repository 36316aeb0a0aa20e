//! Geometric queries over a path: containment, area and length.

use carto_common::Point;

use crate::command::PathElement;
use crate::error::{PathError, Result};
use crate::flatten::{Flatten, CONTAINS_TOLERANCE};
use crate::path::Path;

impl Path {
    /// Even-odd point-in-polygon test.
    ///
    /// Every subpath is treated as closed. Curves are flattened with
    /// [`CONTAINS_TOLERANCE`] before testing.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self.bounds() {
            Some(bbox) if bbox.contains_point(x, y) => {}
            _ => return false,
        }

        let mut inside = false;
        for_each_edge(Flatten::new(self, CONTAINS_TOLERANCE), |a, b| {
            if (a.y > y) != (b.y > y) {
                let x_cross = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
                if x < x_cross {
                    inside = !inside;
                }
            }
        });
        inside
    }

    /// Shoelace area over straight segments, each subpath implicitly
    /// closed. Positive for counter-clockwise outlines (y up).
    ///
    /// Curved instructions are rejected; flatten the path first.
    pub fn signed_area(&self) -> Result<f64> {
        if let Some(index) = self.commands().iter().position(|c| c.is_curve()) {
            return Err(PathError::CurvedSegment {
                index,
                command: self.commands()[index],
            });
        }

        let mut twice_area = 0.0;
        for_each_edge(self.elements(), |a, b| {
            twice_area += a.x * b.y - b.x * a.y;
        });
        Ok(twice_area * 0.5)
    }

    /// Absolute value of [`Path::signed_area`].
    pub fn area(&self) -> Result<f64> {
        self.signed_area().map(f64::abs)
    }

    /// Length of the outline flattened with `tolerance`, counting the
    /// closing segment of closed subpaths.
    pub fn length(&self, tolerance: f64) -> Result<f64> {
        let mut length = 0.0;
        let mut pen: Option<Point> = None;
        let mut start: Option<Point> = None;
        for element in self.flatten(tolerance)? {
            match element {
                PathElement::MoveTo(p) => {
                    pen = Some(p);
                    start = Some(p);
                }
                PathElement::LineTo(p) => {
                    if let Some(prev) = pen {
                        length += prev.distance(p);
                    }
                    pen = Some(p);
                }
                PathElement::Close => {
                    if let (Some(prev), Some(s)) = (pen, start) {
                        length += prev.distance(s);
                    }
                    pen = start;
                }
                PathElement::QuadTo(..) | PathElement::CurveTo(..) => {}
            }
        }
        Ok(length)
    }
}

/// Visit every straight edge of a straight-only element stream, adding the
/// implicit closing edge of each subpath.
fn for_each_edge<I, F>(elements: I, mut visit: F)
where
    I: Iterator<Item = PathElement>,
    F: FnMut(Point, Point),
{
    let mut start: Option<Point> = None;
    let mut pen: Option<Point> = None;

    for element in elements {
        match element {
            PathElement::MoveTo(p) => {
                close_subpath(start, pen, &mut visit);
                start = Some(p);
                pen = Some(p);
            }
            PathElement::LineTo(p) => {
                if let Some(prev) = pen {
                    visit(prev, p);
                }
                pen = Some(p);
            }
            PathElement::Close => {
                close_subpath(start, pen, &mut visit);
                pen = start;
            }
            PathElement::QuadTo(..) | PathElement::CurveTo(..) => {}
        }
    }
    close_subpath(start, pen, &mut visit);
}

fn close_subpath<F: FnMut(Point, Point)>(start: Option<Point>, pen: Option<Point>, visit: &mut F) {
    if let (Some(s), Some(p)) = (start, pen) {
        if s != p {
            visit(p, s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::PathCommand;

    fn unit_square_ccw() -> Path {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 0.0);
        path.line_to(1.0, 1.0);
        path.line_to(0.0, 1.0);
        path.close_path();
        path
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = unit_square_ccw();
        assert_eq!(ccw.signed_area().unwrap(), 1.0);

        let mut cw = Path::new();
        cw.move_to(0.0, 0.0);
        cw.line_to(0.0, 1.0);
        cw.line_to(1.0, 1.0);
        cw.line_to(1.0, 0.0);
        assert_eq!(cw.signed_area().unwrap(), -1.0);
        assert_eq!(cw.area().unwrap(), 1.0);
    }

    #[test]
    fn test_area_rejects_curves() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(1.0, 0.0);
        path.quad_to(2.0, 1.0, 0.0, 1.0);
        assert_eq!(
            path.signed_area(),
            Err(PathError::CurvedSegment {
                index: 2,
                command: PathCommand::QuadTo
            })
        );
    }

    #[test]
    fn test_contains_square() {
        let square = unit_square_ccw();
        assert!(square.contains(0.5, 0.5));
        assert!(!square.contains(1.5, 0.5));
        assert!(!square.contains(-0.1, 0.5));
    }

    #[test]
    fn test_contains_even_odd_hole() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.line_to(10.0, 0.0);
        path.line_to(10.0, 10.0);
        path.line_to(0.0, 10.0);
        path.close_path();
        path.move_to(3.0, 3.0);
        path.line_to(7.0, 3.0);
        path.line_to(7.0, 7.0);
        path.line_to(3.0, 7.0);
        path.close_path();

        assert!(path.contains(1.0, 1.0));
        assert!(!path.contains(5.0, 5.0));
    }

    #[test]
    fn test_contains_curved_outline() {
        // Half disc approximated by a cubic arch over the x axis.
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.curve_to(0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        path.close_path();
        assert!(path.contains(5.0, 7.0));
        assert!(!path.contains(5.0, 7.6));
        assert!(!path.contains(0.5, 6.0));
    }

    #[test]
    fn test_length_counts_closing_edge() {
        let square = unit_square_ccw();
        assert!((square.length(0.1).unwrap() - 4.0).abs() < 1e-12);
    }
}
