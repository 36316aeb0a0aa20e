//! Configuration for contour tracing.

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};

/// Which levels to trace and how to treat the traced strands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Spacing between consecutive levels.
    pub interval: f64,

    /// First level to trace. Defaults to the first multiple of `interval`
    /// at or above the grid minimum.
    pub first_level: Option<f64>,

    /// Last level to trace. Defaults to the grid maximum.
    pub last_level: Option<f64>,

    /// Treat values as compass angles in `[0, 360)` that wrap around.
    pub cyclic: bool,

    /// Strands with fewer distinct points are dropped.
    pub min_points: usize,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            interval: 10.0,
            first_level: None,
            last_level: None,
            cyclic: false,
            min_points: 2,
        }
    }
}

impl ContourConfig {
    /// Configuration with the given interval and defaults elsewhere.
    pub fn with_interval(interval: f64) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CONTOUR_INTERVAL") {
            if let Ok(interval) = val.parse() {
                config.interval = interval;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_FIRST_LEVEL") {
            if let Ok(level) = val.parse() {
                config.first_level = Some(level);
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_LAST_LEVEL") {
            if let Ok(level) = val.parse() {
                config.last_level = Some(level);
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_CYCLIC") {
            config.cyclic = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = std::env::var("CONTOUR_MIN_POINTS") {
            if let Ok(min_points) = val.parse() {
                config.min_points = min_points;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(ContourError::InvalidInterval(self.interval));
        }

        for level in [self.first_level, self.last_level].into_iter().flatten() {
            if !level.is_finite() {
                return Err(ContourError::InvalidLevel(level));
            }
        }

        if let (Some(first), Some(last)) = (self.first_level, self.last_level) {
            if first > last {
                return Err(ContourError::InvalidLevelRange { first, last });
            }
        }

        if self.min_points < 2 {
            return Err(ContourError::InvalidMinPoints(self.min_points));
        }

        Ok(())
    }
}
