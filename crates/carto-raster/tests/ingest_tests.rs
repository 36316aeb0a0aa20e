//! Integration tests for ESRI ASCII grid ingest from disk.

use carto_raster::{read_ascii_grid_file, FloatGrid, IngestError, ShortGrid};
use test_utils::fixtures::grid::{GridSpec, GLOBAL_1DEG, SIMPLE_10X10};
use test_utils::{
    ascii_grid_text, create_grid_with_nans, create_noise_grid, create_ramp_grid, write_temp_grid,
};

#[test]
fn test_read_file_round_trips_values() {
    let data = create_ramp_grid(SIMPLE_10X10.cols, SIMPLE_10X10.rows);
    let file = write_temp_grid(&ascii_grid_text(&SIMPLE_10X10, None, &data));

    let grid: FloatGrid = read_ascii_grid_file(file.path()).unwrap();
    assert_eq!(grid.rows(), 10);
    assert_eq!(grid.cols(), 10);
    assert_eq!(grid.west(), SIMPLE_10X10.west);
    assert_eq!(grid.north(), SIMPLE_10X10.north);
    assert_eq!(grid.data(), &data[..]);
    assert!(!grid.has_void());
}

#[test]
fn test_nodata_becomes_void() {
    let spec = GridSpec {
        cols: 4,
        rows: 3,
        west: 500.0,
        north: 1000.0,
        cell_size: 25.0,
    };
    let data = create_grid_with_nans(4, 3, &[(0, 0), (3, 2)]);
    let file = write_temp_grid(&ascii_grid_text(&spec, Some(-9999.0), &data));

    let grid: FloatGrid = read_ascii_grid_file(file.path()).unwrap();
    assert_eq!(grid.void_count(), 2);
    assert!(grid.get(0, 0).unwrap().is_nan());
    assert!(grid.get(3, 2).unwrap().is_nan());
    assert_eq!(grid.south(), 950.0);

    let shorts: ShortGrid = read_ascii_grid_file(file.path()).unwrap();
    assert_eq!(shorts.get(0, 0), Some(i16::MIN));
    assert_eq!(shorts.get(1, 0), Some(0));
}

#[test]
fn test_global_grid_georeference() {
    let spec = GLOBAL_1DEG;
    let data = create_noise_grid(spec.cols, spec.rows, 5);
    let file = write_temp_grid(&ascii_grid_text(&spec, None, &data));

    let grid: FloatGrid = read_ascii_grid_file(file.path()).unwrap();
    let bounds = grid.bounds();
    assert_eq!(bounds.min_x, -180.0);
    assert_eq!(bounds.max_x, 179.0);
    assert_eq!(bounds.min_y, -90.0);
    assert_eq!(bounds.max_y, 90.0);

    assert_eq!(grid.nearest_neighbor(-180.0, 90.0), data[0] as f64);
    assert_eq!(grid.nearest_neighbor(179.0, -90.0), data[data.len() - 1] as f64);
    assert_eq!(grid.x_to_column(0.2), Some(180));
    assert_eq!(grid.y_to_row(45.0), Some(45));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = read_ascii_grid_file::<f32>(dir.path().join("absent.asc"));
    assert!(matches!(result, Err(IngestError::Io(_))));
}

#[test]
fn test_truncated_file_is_rejected() {
    let data = create_ramp_grid(SIMPLE_10X10.cols, SIMPLE_10X10.rows);
    let text = ascii_grid_text(&SIMPLE_10X10, None, &data[..95]);
    let file = write_temp_grid(&text);
    let result = read_ascii_grid_file::<f32>(file.path());
    assert!(matches!(
        result,
        Err(IngestError::TooFewSamples {
            expected: 100,
            actual: 95
        })
    ));
}
