//! Common value types shared by the path, raster and contour crates.

pub mod bbox;
pub mod point;
pub mod transform;

pub use bbox::BoundingBox;
pub use point::Point;
pub use transform::AffineTransform;
