//! Contour level generation.

use crate::config::ContourConfig;
use crate::error::{ContourError, Result};

/// Upper bound on the number of levels traced in one call.
pub const MAX_LEVELS: usize = 10_000;

/// Generate contour levels automatically based on data range and interval.
///
/// Levels are the multiples of `interval` inside `[min_value, max_value]`.
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(max_value >= min_value) {
        return vec![];
    }

    // Start from first multiple of interval at or above min_value
    let first = (min_value / interval).ceil();
    let last = (max_value / interval).floor();
    if !(first.is_finite() && last.is_finite()) || first > last {
        return vec![];
    }

    let count = ((last - first) as usize).saturating_add(1).min(MAX_LEVELS);
    (0..count).map(|k| (first + k as f64) * interval).collect()
}

/// Levels `first, first + interval, ...` up to and including `last`.
pub fn stepped_levels(first: f64, last: f64, interval: f64) -> Vec<f64> {
    if !(interval > 0.0) || !(last >= first) {
        return vec![];
    }
    // Tolerate rounding when `last` sits on a step.
    let steps = ((last - first) / interval + 1e-9).floor();
    if !steps.is_finite() {
        return vec![];
    }
    let count = (steps as usize).saturating_add(1).min(MAX_LEVELS);
    (0..count).map(|k| first + k as f64 * interval).collect()
}

/// Resolve the levels to trace for a grid spanning `[min, max]`.
///
/// Cyclic configurations always include level `0`. Fails when the range
/// holds more than [`MAX_LEVELS`] levels.
pub fn resolve_levels(config: &ContourConfig, min: f64, max: f64) -> Result<Vec<f64>> {
    let first = config
        .first_level
        .unwrap_or_else(|| (min / config.interval).ceil() * config.interval);
    let last = config.last_level.unwrap_or(max);

    // NaN bounds (an all-void grid) give no levels.
    let count = ((last - first) / config.interval).floor();
    if count.is_finite() && count >= MAX_LEVELS as f64 {
        return Err(ContourError::TooManyLevels {
            count: (count as usize).saturating_add(1),
            limit: MAX_LEVELS,
        });
    }

    let mut levels = if config.first_level.is_none() && config.last_level.is_none() {
        generate_contour_levels(min, max, config.interval)
    } else {
        stepped_levels(first, last, config.interval)
    };

    if config.cyclic && !levels.contains(&0.0) {
        let at = levels.partition_point(|&l| l < 0.0);
        levels.insert(at, 0.0);
    }

    Ok(levels)
}
