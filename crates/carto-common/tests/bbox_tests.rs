//! Tests for BoundingBox operations.

use carto_common::{BoundingBox, Point};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_from_point_is_degenerate() {
    let bbox = BoundingBox::from_point(3.0, 4.0);
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
    assert!(bbox.contains_point(3.0, 4.0));
}

// ============================================================================
// include / union tests
// ============================================================================

#[test]
fn test_include_grows_in_every_direction() {
    let mut bbox = BoundingBox::from_point(0.0, 0.0);
    bbox.include(5.0, -2.0);
    bbox.include(-1.0, 7.0);
    assert_eq!(bbox, BoundingBox::new(-1.0, -2.0, 5.0, 7.0));
}

#[test]
fn test_include_order_independent() {
    let points = [(1.0, 2.0), (-3.0, 0.5), (4.0, -6.0), (0.0, 9.0)];

    let mut forward = BoundingBox::from_point(points[0].0, points[0].1);
    for &(x, y) in &points[1..] {
        forward.include(x, y);
    }

    let reversed = BoundingBox::from_points(points.iter().rev().map(|&p| Point::from(p))).unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn test_union() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(2.0, -1.0, 3.0, 0.5);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, -1.0, 3.0, 1.0));
}

// ============================================================================
// Query tests
// ============================================================================

#[test]
fn test_contains_point_edges_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains_point(0.0, 0.0));
    assert!(bbox.contains_point(10.0, 10.0));
    assert!(bbox.contains_point(5.0, 5.0));
    assert!(!bbox.contains_point(10.000001, 5.0));
    assert!(!bbox.contains_point(5.0, -0.000001));
}

#[test]
fn test_center() {
    let bbox = BoundingBox::new(-2.0, 4.0, 6.0, 8.0);
    assert_eq!(bbox.center(), Point::new(2.0, 6.0));
}

#[test]
fn test_no_intersection() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(1.5, 1.5, 2.0, 2.0);
    assert!(a.intersection(&b).is_none());
}
