//! Integration tests for contour tracing over synthetic grids.

use carto_contour::{ContourConfig, ContourError, ContourTracer};
use carto_path::{Path, PathCommand, Point};
use carto_raster::{FloatGrid, Georeference};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, create_bearing_grid, create_cone_grid,
    create_noise_grid,
};

/// Square grid with unit cells whose south-west node sits at the origin.
fn unit_grid(size: usize, data: Vec<f32>) -> FloatGrid {
    let georef = Georeference::new(0.0, (size - 1) as f64, 1.0).unwrap();
    FloatGrid::from_data(size, size, georef, data).unwrap()
}

fn ramp() -> FloatGrid {
    FloatGrid::from_rows(
        vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 4.0],
        ],
        Georeference::new(0.0, 2.0, 1.0).unwrap(),
    )
    .unwrap()
}

fn tracer(interval: f64) -> ContourTracer {
    ContourTracer::new(ContourConfig::with_interval(interval)).unwrap()
}

fn points(path: &Path) -> Vec<Point> {
    path.points().collect()
}

fn on_border(grid: &FloatGrid, p: Point) -> bool {
    p.x == grid.west() || p.x == grid.east() || p.y == grid.north() || p.y == grid.south()
}

// ============================================================================
// Open strands
// ============================================================================

#[test]
fn test_ramp_single_strand() {
    let paths = tracer(1.0).trace_level(&ramp(), 1.5).unwrap();
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(!path.is_closed());
    let expected = [(0.0, 0.5), (0.5, 1.0), (1.0, 1.5), (1.5, 2.0)];
    let actual = points(path);
    assert_eq!(actual.len(), expected.len());
    for (p, (x, y)) in actual.iter().zip(expected) {
        assert_coords_approx_eq!((p.x, p.y), (x, y), 1e-12);
    }
}

#[test]
fn test_levels_outside_range_produce_nothing() {
    let grid = ramp();
    let t = tracer(1.0);
    assert!(t.trace_level(&grid, 4.0).unwrap().is_empty());
    assert!(t.trace_level(&grid, 10.0).unwrap().is_empty());
    assert!(t.trace_level(&grid, -3.0).unwrap().is_empty());
    // Touches a single corner node only.
    assert!(t.trace_level(&grid, 0.0).unwrap().is_empty());
}

#[test]
fn test_trace_groups_every_level() {
    let set = tracer(1.0).trace(&ramp()).unwrap();
    assert_eq!(set.levels(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(set.path_count(), 3);
    assert!(set.paths_for(0.0).unwrap().is_empty());
    assert_eq!(set.paths_for(2.0).unwrap().len(), 1);
}

#[test]
fn test_straight_strand_through_nodes_on_level() {
    // Level 2 runs exactly along the nodes of the anti-diagonal.
    let paths = tracer(1.0).trace_level(&ramp(), 2.0).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(
        points(&paths[0]),
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0)
        ]
    );
}

#[test]
fn test_open_strands_end_on_border() {
    let grid = unit_grid(32, create_noise_grid(32, 32, 7));
    let config = ContourConfig {
        interval: 10.0,
        first_level: Some(5.123),
        ..Default::default()
    };
    let set = ContourTracer::new(config).unwrap().trace(&grid).unwrap();
    assert!(set.path_count() > 0);

    for group in &set {
        for path in &group.paths {
            if path.is_closed() {
                continue;
            }
            let start = path.start_point().unwrap();
            let end = path.end_point().unwrap();
            assert!(on_border(&grid, start), "level {} start {:?}", group.level, start);
            assert!(on_border(&grid, end), "level {} end {:?}", group.level, end);
        }
    }
}

// ============================================================================
// Closed strands
// ============================================================================

#[test]
fn test_cone_gives_closed_loop() {
    let grid = unit_grid(9, create_cone_grid(9, 9, 10.0));
    let paths = tracer(1.0).trace_level(&grid, 7.5).unwrap();
    assert_eq!(paths.len(), 1);

    let ring = &paths[0];
    assert!(ring.is_closed());
    assert_eq!(ring.commands().last(), Some(&PathCommand::Close));
    assert!(ring.contains(4.0, 4.0));
    assert!(!ring.contains(1.0, 1.0));

    // Inscribed in a circle of radius 2.5.
    let area = ring.area().unwrap();
    assert!(area > 14.0 && area < 19.7, "area {}", area);
}

#[test]
fn test_higher_values_stay_on_the_right() {
    // A clockwise ring around the peak has negative signed area.
    let grid = unit_grid(9, create_cone_grid(9, 9, 10.0));
    let ring = &tracer(1.0).trace_level(&grid, 7.5).unwrap()[0];
    assert!(ring.signed_area().unwrap() < 0.0);

    // A pit is the mirror image.
    let pit: Vec<f32> = create_cone_grid(9, 9, 10.0).iter().map(|v| -v).collect();
    let grid = unit_grid(9, pit);
    let ring = &tracer(1.0).trace_level(&grid, -7.5).unwrap()[0];
    assert!(ring.signed_area().unwrap() > 0.0);
}

#[test]
fn test_closed_strands_drop_repeated_start() {
    let grid = unit_grid(9, create_cone_grid(9, 9, 10.0));
    let ring = &tracer(1.0).trace_level(&grid, 8.5).unwrap()[0];
    let pts = points(ring);
    assert!(pts.len() >= 3);
    assert_ne!(pts.first(), pts.last());
}

// ============================================================================
// Saddles and void
// ============================================================================

#[test]
fn test_saddle_strands_never_cross() {
    let grid = FloatGrid::from_rows(
        vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        Georeference::new(0.0, 1.0, 1.0).unwrap(),
    )
    .unwrap();

    for level in [0.4, 0.6] {
        let paths = tracer(1.0).trace_level(&grid, level).unwrap();
        assert_eq!(paths.len(), 2, "level {}", level);
        let a = paths[0].bounds().unwrap();
        let b = paths[1].bounds().unwrap();
        assert!(!a.intersects(&b), "level {}: {:?} vs {:?}", level, a, b);
    }
}

#[test]
fn test_void_cells_split_strands() {
    // Values rise eastwards, so level 1.5 is the vertical line x = 1.5.
    let mut grid = FloatGrid::from_rows(
        vec![vec![0.0, 1.0, 2.0, 3.0]; 5],
        Georeference::new(0.0, 4.0, 1.0).unwrap(),
    )
    .unwrap();
    let t = tracer(1.0);

    let whole = t.trace_level(&grid, 1.5).unwrap();
    assert_eq!(whole.len(), 1);
    assert_eq!(whole[0].point_count(), 5);

    grid.set(1, 2, f32::NAN).unwrap();
    let split = t.trace_level(&grid, 1.5).unwrap();
    assert_eq!(split.len(), 2);
    for path in &split {
        assert_eq!(path.point_count(), 2);
        for p in path.points() {
            assert_approx_eq!(p.x, 1.5, 1e-12);
        }
    }
}

#[test]
fn test_all_void_grid_has_no_levels() {
    let grid = FloatGrid::filled(4, 4, Georeference::new(0.0, 3.0, 1.0).unwrap(), f32::NAN)
        .unwrap();
    let set = tracer(1.0).trace(&grid).unwrap();
    assert!(set.is_empty());
    assert!(tracer(1.0).trace_level(&grid, 0.0).unwrap().is_empty());
}

// ============================================================================
// Cyclic data
// ============================================================================

#[test]
fn test_cyclic_traces_wrap_line() {
    let grid = unit_grid(9, create_bearing_grid(9, 9));
    let config = ContourConfig {
        interval: 90.0,
        cyclic: true,
        ..Default::default()
    };
    let set = ContourTracer::new(config).unwrap().trace(&grid).unwrap();
    assert_eq!(set.levels()[0], 0.0);

    // The 359 -> 0 wrap runs due north of the centre node.
    let paths = set.paths_for(0.0).unwrap();
    assert!(!paths.is_empty());
    let mut reaches_border = false;
    for path in paths {
        for p in path.points() {
            assert_approx_eq!(p.x, 4.0, 1e-9);
            assert!(p.y >= 4.0 - 1e-9);
            reaches_border |= p.y == grid.north();
        }
    }
    assert!(reaches_border);
}

// ============================================================================
// Configuration and errors
// ============================================================================

#[test]
fn test_rejects_bad_config() {
    assert_eq!(
        ContourTracer::new(ContourConfig::with_interval(0.0)).unwrap_err(),
        ContourError::InvalidInterval(0.0)
    );
    let config = ContourConfig {
        min_points: 0,
        ..Default::default()
    };
    assert!(ContourTracer::new(config).is_err());
}

#[test]
fn test_rejects_bad_level_and_grid() {
    let t = tracer(1.0);
    assert!(matches!(
        t.trace_level(&ramp(), f64::NAN),
        Err(ContourError::InvalidLevel(_))
    ));

    let single_row =
        FloatGrid::from_rows(vec![vec![1.0, 2.0, 3.0]], Georeference::new(0.0, 0.0, 1.0).unwrap())
            .unwrap();
    assert_eq!(
        t.trace(&single_row).unwrap_err(),
        ContourError::GridTooSmall { rows: 1, cols: 3 }
    );
}

#[test]
fn test_too_many_levels() {
    let grid = unit_grid(4, create_noise_grid(4, 4, 1));
    let err = tracer(1e-4).trace(&grid).unwrap_err();
    assert!(matches!(err, ContourError::TooManyLevels { .. }));
}

#[test]
fn test_min_points_filters_short_strands() {
    let grid = unit_grid(24, create_noise_grid(24, 24, 3));
    let loose = tracer(10.0).trace(&grid).unwrap();
    let strict = ContourTracer::new(ContourConfig {
        min_points: 6,
        ..ContourConfig::with_interval(10.0)
    })
    .unwrap()
    .trace(&grid)
    .unwrap();

    assert!(strict.path_count() < loose.path_count());
    for group in &strict {
        for path in &group.paths {
            assert!(path.point_count() >= 6);
        }
    }
}

// ============================================================================
// Parallel tracing
// ============================================================================

#[test]
fn test_parallel_trace_matches_single_levels() {
    let grid = unit_grid(40, create_noise_grid(40, 40, 11));
    let t = tracer(12.5);
    let set = t.trace(&grid).unwrap();
    assert!(set.len() > 1);

    for group in &set {
        let single = t.trace_level(&grid, group.level).unwrap();
        assert_eq!(group.paths, single, "level {}", group.level);
    }
}

#[test]
fn test_short_grid_matches_float_grid() {
    let values: Vec<f32> = create_cone_grid(9, 9, 10.0).iter().map(|v| v.round()).collect();
    let float = unit_grid(9, values.clone());
    let short = carto_raster::ShortGrid::from_data(
        9,
        9,
        *float.georef(),
        values.iter().map(|&v| v as i16).collect(),
    )
    .unwrap();

    let t = tracer(1.0);
    assert_eq!(
        t.trace_level(&float, 6.5).unwrap(),
        t.trace_level(&short, 6.5).unwrap()
    );
}
