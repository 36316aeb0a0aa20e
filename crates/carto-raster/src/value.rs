//! Raster element types.

use std::fmt::Debug;

use num_traits::{NumCast, ToPrimitive};

/// A scalar type that can be stored in a [`RasterGrid`](crate::RasterGrid).
///
/// Every element type reserves one void value meaning "no data". Samples
/// cross the type boundary as `f64`, with `NaN` standing for void.
pub trait GridValue:
    Copy + Debug + PartialOrd + Send + Sync + ToPrimitive + NumCast + 'static
{
    /// The value stored for void cells.
    const VOID: Self;

    fn is_void(self) -> bool;

    /// Rounding applied before narrowing a sample into this type.
    fn round_sample(value: f64) -> f64 {
        value
    }

    /// Widen to a sample; void becomes `NaN`.
    fn to_sample(self) -> f64 {
        if self.is_void() {
            f64::NAN
        } else {
            self.to_f64().unwrap_or(f64::NAN)
        }
    }

    /// Narrow a sample; non-finite or unrepresentable values become void.
    fn from_sample(value: f64) -> Self {
        if !value.is_finite() {
            return Self::VOID;
        }
        <Self as NumCast>::from(Self::round_sample(value)).unwrap_or(Self::VOID)
    }
}

impl GridValue for f32 {
    const VOID: Self = f32::NAN;

    fn is_void(self) -> bool {
        !self.is_finite()
    }
}

impl GridValue for f64 {
    const VOID: Self = f64::NAN;

    fn is_void(self) -> bool {
        !self.is_finite()
    }
}

impl GridValue for i16 {
    const VOID: Self = i16::MIN;

    fn is_void(self) -> bool {
        self == i16::MIN
    }

    fn round_sample(value: f64) -> f64 {
        value.round()
    }
}
