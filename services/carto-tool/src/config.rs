//! Tool configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use carto_contour::ContourConfig;
use carto_raster::SamplingConfig;

/// Top-level configuration: sampling and contouring sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub sampling: SamplingConfig,
    pub contour: ContourConfig,
}

impl ToolConfig {
    /// Load configuration from a YAML file. Missing sections and fields
    /// keep their defaults.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            sampling: SamplingConfig::from_env(),
            contour: ContourConfig::from_env(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.sampling.validate().map_err(anyhow::Error::msg)?;
        self.contour.validate()?;
        Ok(())
    }
}
