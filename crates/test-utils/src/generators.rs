//! Synthetic grid generators.
//!
//! Every generator returns a `Vec<f32>` in row-major order with row 0 at
//! the north edge, matching the raster layout used across the workspace.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a planar ramp rising one unit per cell eastwards and northwards.
///
/// The south-west corner is 0 and the north-east corner is
/// `(width - 1) + (height - 1)`.
pub fn create_ramp_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let from_south = height - 1 - row;
        for col in 0..width {
            data.push((col + from_south) as f32);
        }
    }
    data
}

/// Creates a cone with `peak` at the grid centre, falling one unit per
/// cell of distance.
pub fn create_cone_grid(width: usize, height: usize, peak: f32) -> Vec<f32> {
    let center_x = (width as f32 - 1.0) / 2.0;
    let center_y = (height as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let dx = col as f32 - center_x;
            let dy = row as f32 - center_y;
            data.push(peak - (dx * dx + dy * dy).sqrt());
        }
    }
    data
}

/// Creates a field of compass bearings in degrees `[0, 360)` pointing away
/// from the grid centre (north = 0, east = 90).
///
/// The field wraps from 359 to 0 along the ray due north of the centre,
/// which makes it useful for exercising cyclic contouring.
pub fn create_bearing_grid(width: usize, height: usize) -> Vec<f32> {
    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let east = col as f64 - center_x;
            let north = center_y - row as f64;
            let bearing = east.atan2(north).to_degrees().rem_euclid(360.0);
            data.push(bearing as f32);
        }
    }
    data
}

/// Creates a grid with deterministic pseudo-random values in `[0, 100)`.
///
/// Uses a simple hash-based approach for reproducibility.
pub fn create_noise_grid(width: usize, height: usize, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            data.push((hash % 10_000) as f32 / 100.0);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified `(col, row)` positions,
/// zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![0.0f32; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_grid() {
        let grid = create_test_grid(10, 5);
        assert_eq!(grid.len(), 50);
        assert_eq!(grid[0], 0.0); // col=0, row=0
        assert_eq!(grid[1], 1000.0); // col=1, row=0
        assert_eq!(grid[10], 1.0); // col=0, row=1
        assert_eq!(grid[11], 1001.0); // col=1, row=1
    }

    #[test]
    fn test_create_ramp_grid() {
        let grid = create_ramp_grid(3, 3);
        assert_eq!(grid, vec![2.0, 3.0, 4.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_create_cone_grid() {
        let grid = create_cone_grid(5, 5, 10.0);
        assert_eq!(grid[2 * 5 + 2], 10.0);
        assert_eq!(grid[2 * 5 + 4], 8.0);
        assert!(grid[0] < 8.0);
    }

    #[test]
    fn test_create_bearing_grid() {
        let grid = create_bearing_grid(5, 5);
        // Due east and due south of the centre.
        assert!((grid[2 * 5 + 4] - 90.0).abs() < 1e-4);
        assert!((grid[4 * 5 + 2] - 180.0).abs() < 1e-4);
        assert!(grid.iter().all(|&v| (0.0..360.0).contains(&v)));
    }

    #[test]
    fn test_noise_deterministic() {
        let grid1 = create_noise_grid(50, 50, 42);
        let grid2 = create_noise_grid(50, 50, 42);
        assert_eq!(grid1, grid2, "Same seed should produce same data");

        let grid3 = create_noise_grid(50, 50, 43);
        assert_ne!(grid1, grid3, "Different seed should produce different data");
    }

    #[test]
    fn test_create_constant_grid() {
        let grid = create_constant_grid(10, 10, 42.0);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_create_grid_with_nans() {
        let grid = create_grid_with_nans(10, 10, &[(5, 5), (0, 0)]);
        assert!(grid[0].is_nan());
        assert!(grid[55].is_nan());
        assert!(!grid[1].is_nan());
    }
}
