use super::*;
use nalgebra::vector;
use ::rand::{rngs::StdRng, Rng, SeedableRng};

fn unit_square(side: f64) -> Vec<Point> {
    vec![
        vector![0.0, 0.0],
        vector![side, 0.0],
        vector![side, side],
        vector![0.0, side],
    ]
}

#[test]
fn distance_and_epsilon_equality() {
    assert!((distance(vector![0.0, 0.0], vector![3.0, 4.0]) - 5.0).abs() < 1e-12);
    assert!(points_equal(vector![1.0, 1.0], vector![1.0005, 0.9995], POINT_EPS));
    assert!(!points_equal(vector![1.0, 1.0], vector![1.002, 1.0], POINT_EPS));
    // strict comparison on the boundary
    assert!(!points_equal(vector![0.0, 0.0], vector![0.5, 0.0], 0.5));
}

#[test]
fn crossing_segments_meet_once() {
    let p = segment_intersection(
        vector![0.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
        vector![10.0, 0.0],
    )
    .unwrap();
    assert!(points_equal(p, vector![5.0, 5.0], 1e-12));
}

#[test]
fn parallel_and_collinear_segments_do_not_intersect() {
    // parallel
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![0.0, 1.0],
        vector![10.0, 1.0]
    )
    .is_none());
    // overlapping collinear: denominator is exactly zero
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![5.0, 0.0],
        vector![15.0, 0.0]
    )
    .is_none());
}

#[test]
fn endpoint_contact_counts() {
    // T-junction: second segment ends on the first
    let p = segment_intersection(
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![5.0, 5.0],
        vector![5.0, 0.0],
    )
    .unwrap();
    assert!(points_equal(p, vector![5.0, 0.0], 1e-12));
    // shared endpoint
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![1.0, 1.0],
        vector![1.0, 1.0],
        vector![2.0, 0.0]
    )
    .is_some());
}

#[test]
fn short_segment_misses() {
    assert!(segment_intersection(
        vector![0.0, 0.0],
        vector![4.0, 0.0],
        vector![5.0, -1.0],
        vector![5.0, 1.0]
    )
    .is_none());
}

#[test]
fn parameter_slack_is_configurable() {
    // ua lands a hair beyond 1; exact bounds reject, default slack accepts
    let p1 = vector![0.0, 0.0];
    let p2 = vector![1.0 - 1e-12, 0.0];
    let p3 = vector![1.0, -1.0];
    let p4 = vector![1.0, 1.0];
    assert!(segment_intersection_eps(p1, p2, p3, p4, 0.0).is_none());
    assert!(segment_intersection(p1, p2, p3, p4).is_some());
}

#[test]
fn zero_length_segment_has_no_intersection() {
    let p = vector![5.0, 0.0];
    assert!(segment_intersection(p, p, vector![0.0, 0.0], vector![10.0, 0.0]).is_none());
    assert!(segment_intersection(p, p, vector![5.0, -1.0], vector![5.0, 1.0]).is_none());
}

#[test]
fn triangle_containment() {
    let tri = vec![vector![0.0, 0.0], vector![10.0, 0.0], vector![5.0, 10.0]];
    assert!(polygon_contains(&tri, vector![5.0, 3.0]));
    assert!(!polygon_contains(&tri, vector![5.0, 11.0]));
    assert!(!polygon_contains(&tri, vector![-1.0, 1.0]));
    assert!(!polygon_contains(&[], vector![0.0, 0.0]));
}

#[test]
fn containment_boundary_asymmetry() {
    // Left and bottom edges count as inside, right and top as outside.
    let sq = unit_square(10.0);
    assert!(polygon_contains(&sq, vector![0.0, 5.0]));
    assert!(!polygon_contains(&sq, vector![10.0, 5.0]));
    assert!(polygon_contains(&sq, vector![5.0, 0.0]));
    assert!(!polygon_contains(&sq, vector![5.0, 10.0]));
}

#[test]
fn concave_containment() {
    // U shape opening upwards (y down in screen space does not matter here)
    let u = vec![
        vector![0.0, 0.0],
        vector![30.0, 0.0],
        vector![30.0, 30.0],
        vector![20.0, 30.0],
        vector![20.0, 10.0],
        vector![10.0, 10.0],
        vector![10.0, 30.0],
        vector![0.0, 30.0],
    ];
    assert!(polygon_contains(&u, vector![5.0, 20.0]));
    assert!(polygon_contains(&u, vector![25.0, 20.0]));
    assert!(!polygon_contains(&u, vector![15.0, 20.0]));
    assert!(polygon_contains(&u, vector![15.0, 5.0]));
}

#[test]
fn center_and_area() {
    let sq = unit_square(100.0);
    let c = polygon_center(&sq).unwrap();
    assert!(points_equal(c, vector![50.0, 50.0], 1e-12));
    assert!((polygon_area(&sq) - 10_000.0).abs() < 1e-9);
    // winding does not change the unsigned area
    let mut rev = sq.clone();
    rev.reverse();
    assert!((polygon_area(&rev) - 10_000.0).abs() < 1e-9);
    assert!(polygon_center(&[]).is_none());
    assert_eq!(polygon_area(&sq[..2]), 0.0);
}

#[test]
fn vertex_center_differs_from_area_centroid() {
    // Extra collinear vertex pulls the vertex mean but not the area.
    let pts = vec![
        vector![0.0, 0.0],
        vector![5.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 10.0],
        vector![0.0, 10.0],
    ];
    let c = polygon_center(&pts).unwrap();
    assert!(points_equal(c, vector![5.0, 4.0], 1e-12));
    assert!((polygon_area(&pts) - 100.0).abs() < 1e-12);
}

#[test]
fn bounds_cover_all_points() {
    let mut rng = StdRng::seed_from_u64(42);
    let pts: Vec<Point> = (0..12)
        .map(|_| vector![rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)])
        .collect();
    let (lo, hi) = polygon_bounds(&pts).unwrap();
    for p in &pts {
        assert!(p.x >= lo.x && p.x <= hi.x && p.y >= lo.y && p.y <= hi.y);
    }
    assert!(polygon_bounds(&[]).is_none());
}

#[test]
fn segment_helpers() {
    let s = Segment::from_coords(0.0, 0.0, 30.0, 40.0);
    assert!((s.length() - 50.0).abs() < 1e-12);
    assert!(!s.is_degenerate());
    assert!(Segment::new(s.start, s.start).is_degenerate());
    assert_eq!(Arena::default().center(), vector![400.0, 300.0]);
}
