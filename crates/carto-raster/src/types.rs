//! Core types for grid sampling.

use serde::{Deserialize, Serialize};

/// Interpolation kernel used to sample a grid between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Nearest node (preserves exact values).
    Nearest,
    /// Bilinear blend of the four surrounding nodes.
    #[default]
    Bilinear,
    /// Separable cubic over a 4x4 neighbourhood (smoothest, more compute).
    Bicubic,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            "cubic" | "bicubic" => Self::Bicubic,
            _ => Self::Bilinear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate statistics over the non-void cells of a grid.
///
/// `mean` divides the sum of valid cells by the total cell count, void
/// cells included. Every field but `void_count` is `NaN` for an all-void
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub void_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_method_from_str() {
        assert_eq!(
            InterpolationMethod::from_str("nearest"),
            InterpolationMethod::Nearest
        );
        assert_eq!(
            InterpolationMethod::from_str("BILINEAR"),
            InterpolationMethod::Bilinear
        );
        assert_eq!(
            InterpolationMethod::from_str("cubic"),
            InterpolationMethod::Bicubic
        );
        assert_eq!(
            InterpolationMethod::from_str("unknown"),
            InterpolationMethod::Bilinear
        );
    }

    #[test]
    fn test_interpolation_method_display() {
        assert_eq!(InterpolationMethod::Bicubic.to_string(), "bicubic");
        assert_eq!(
            InterpolationMethod::from_str(&InterpolationMethod::Nearest.to_string()),
            InterpolationMethod::Nearest
        );
    }
}
