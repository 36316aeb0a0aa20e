//! Drawing instructions and the element view over a path's flat buffers.

use carto_common::Point;

/// One drawing instruction. The coordinates it consumes live in the path's
/// flat coordinate buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    QuadTo,
    CurveTo,
    Close,
}

impl PathCommand {
    /// Number of coordinate pairs this instruction consumes.
    pub const fn point_count(self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo => 2,
            Self::CurveTo => 3,
            Self::Close => 0,
        }
    }

    pub const fn is_curve(self) -> bool {
        matches!(self, Self::QuadTo | Self::CurveTo)
    }
}

/// An instruction together with its points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CurveTo(Point, Point, Point),
    Close,
}

impl PathElement {
    pub fn command(&self) -> PathCommand {
        match self {
            Self::MoveTo(_) => PathCommand::MoveTo,
            Self::LineTo(_) => PathCommand::LineTo,
            Self::QuadTo(..) => PathCommand::QuadTo,
            Self::CurveTo(..) => PathCommand::CurveTo,
            Self::Close => PathCommand::Close,
        }
    }

    /// The point the pen ends on, `None` for `Close`.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::QuadTo(_, p) | Self::CurveTo(_, _, p) => {
                Some(p)
            }
            Self::Close => None,
        }
    }
}

/// Borrowing iterator that pairs each instruction with its coordinates.
#[derive(Debug, Clone)]
pub struct Elements<'a> {
    commands: std::slice::Iter<'a, PathCommand>,
    coords: &'a [f64],
}

impl<'a> Elements<'a> {
    pub(crate) fn new(commands: &'a [PathCommand], coords: &'a [f64]) -> Self {
        Self {
            commands: commands.iter(),
            coords,
        }
    }

    fn take_point(&mut self) -> Point {
        let p = Point::new(self.coords[0], self.coords[1]);
        self.coords = &self.coords[2..];
        p
    }
}

impl Iterator for Elements<'_> {
    type Item = PathElement;

    fn next(&mut self) -> Option<PathElement> {
        let command = *self.commands.next()?;
        let element = match command {
            PathCommand::MoveTo => PathElement::MoveTo(self.take_point()),
            PathCommand::LineTo => PathElement::LineTo(self.take_point()),
            PathCommand::QuadTo => {
                let c = self.take_point();
                PathElement::QuadTo(c, self.take_point())
            }
            PathCommand::CurveTo => {
                let c1 = self.take_point();
                let c2 = self.take_point();
                PathElement::CurveTo(c1, c2, self.take_point())
            }
            PathCommand::Close => PathElement::Close,
        };
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.commands.size_hint()
    }
}

impl ExactSizeIterator for Elements<'_> {}
