//! Whole-grid statistics.

use crate::grid::RasterGrid;
use crate::types::GridStatistics;
use crate::value::GridValue;

impl<T: GridValue> RasterGrid<T> {
    pub fn void_count(&self) -> usize {
        self.data().iter().filter(|v| v.is_void()).count()
    }

    pub fn has_void(&self) -> bool {
        self.data().iter().any(|v| v.is_void())
    }

    /// Smallest and largest non-void value, `(NaN, NaN)` when all void.
    pub fn min_max(&self) -> (f64, f64) {
        let stats = self.statistics();
        (stats.min, stats.max)
    }

    /// Single pass over the grid. See [`GridStatistics`] for the mean
    /// convention.
    pub fn statistics(&self) -> GridStatistics {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut void_count = 0;

        for value in self.data() {
            if value.is_void() {
                void_count += 1;
                continue;
            }
            let v = value.to_sample();
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }

        if void_count == self.len() {
            return GridStatistics {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                void_count,
            };
        }

        GridStatistics {
            min,
            max,
            mean: sum / self.len() as f64,
            void_count,
        }
    }
}
