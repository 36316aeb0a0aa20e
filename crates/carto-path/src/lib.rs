//! Editable 2D path geometry.
//!
//! A [`Path`] stores drawing instructions and coordinates in two flat
//! buffers. Curves are kept as quadratic/cubic beziers until a caller asks
//! for a straight-line approximation through [`Path::flatten`].
//!
//! The crate holds geometry only. Styling, change notification and undo
//! history belong to the layers that wrap a `Path`; mutators here simply
//! mutate, and the caller decides when to notify.

pub mod command;
pub mod error;
pub mod flatten;
pub mod path;
pub mod query;

pub use carto_common::{AffineTransform, BoundingBox, Point};
pub use command::{Elements, PathCommand, PathElement};
pub use error::{PathError, Result};
pub use flatten::{Flatten, CONTAINS_TOLERANCE, MAX_SUBDIVISION_DEPTH};
pub use path::Path;
