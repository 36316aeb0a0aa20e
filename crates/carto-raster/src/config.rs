//! Configuration for grid sampling.

use serde::{Deserialize, Serialize};

use crate::types::InterpolationMethod;

/// Sampling options shared by point queries and resampling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Interpolation method for point sampling and resampling.
    pub interpolation: InterpolationMethod,

    /// Target cell size for resampling; `None` keeps the source spacing.
    pub resample_cell_size: Option<f64>,
}

impl SamplingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            config.interpolation = InterpolationMethod::from_str(&val);
        }

        if let Ok(val) = std::env::var("GRID_RESAMPLE_CELL_SIZE") {
            if let Ok(size) = val.parse() {
                config.resample_cell_size = Some(size);
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(size) = self.resample_cell_size {
            if !(size.is_finite() && size > 0.0) {
                return Err(format!("resample_cell_size must be > 0, got {}", size));
            }
        }
        Ok(())
    }
}
