//! 2D affine transformations.
//!
//! Stored as a homogeneous 3x3 matrix acting on column vectors
//! `(x, y, 1)`:
//!
//! ```text
//! | m00 m01 m02 |
//! | m10 m11 m12 |
//! |  0   0   1  |
//! ```

use nalgebra::Matrix3;

use crate::Point;

/// An affine map of the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    /// Build from the six coefficients, ordered `m00, m10, m01, m11, m02, m12`
    /// (column by column, as flattened by most 2D graphics APIs).
    pub fn from_coefficients(m00: f64, m10: f64, m01: f64, m11: f64, m02: f64, m12: f64) -> Self {
        Self {
            matrix: Matrix3::new(m00, m01, m02, m10, m11, m12, 0.0, 0.0, 1.0),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_coefficients(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::from_coefficients(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Uniform scale about the pivot `(cx, cy)`.
    pub fn scaling_about(factor: f64, cx: f64, cy: f64) -> Self {
        Self::translation(-cx, -cy)
            .then(&Self::scaling(factor, factor))
            .then(&Self::translation(cx, cy))
    }

    /// Counter-clockwise rotation about the origin, angle in radians.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::from_coefficients(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Compose: the returned transform applies `self` first, then `next`.
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        AffineTransform {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Inverse transform, `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<AffineTransform> {
        self.matrix
            .try_inverse()
            .map(|matrix| AffineTransform { matrix })
    }

    /// The six coefficients in `from_coefficients` order.
    pub fn coefficients(&self) -> [f64; 6] {
        let m = &self.matrix;
        [m[(0, 0)], m[(1, 0)], m[(0, 1)], m[(1, 1)], m[(0, 2)], m[(1, 2)]]
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix3::identity()
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.matrix;
        (
            m[(0, 0)] * x + m[(0, 1)] * y + m[(0, 2)],
            m[(1, 0)] * x + m[(1, 1)] * y + m[(1, 2)],
        )
    }

    pub fn apply_point(&self, p: Point) -> Point {
        let (x, y) = self.apply(p.x, p.y);
        Point::new(x, y)
    }
}
