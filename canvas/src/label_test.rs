use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// =============================================================
// Centroids
// =============================================================

#[test]
fn centroid_3d_of_empty_is_origin() {
    assert_eq!(centroid_3d(&[]), Point3::default());
}

#[test]
fn centroid_3d_is_mean() {
    let c = centroid_3d(&[Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 3.0), Point3::new(0.0, 6.0, 0.0)]);
    assert!(approx_eq(c.x, 1.0));
    assert!(approx_eq(c.y, 2.0));
    assert!(approx_eq(c.z, 1.0));
}

#[test]
fn centroid_2d_of_empty_is_origin() {
    assert_eq!(centroid_2d(&[]), Point::default());
}

#[test]
fn centroid_2d_is_mean() {
    let c = centroid_2d(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0), Point::new(0.0, 4.0)]);
    assert!(point_approx_eq(c, Point::new(2.0, 2.0)));
}

// =============================================================
// smart_label_direction
// =============================================================

#[test]
fn direction_is_unit_length() {
    let d = smart_label_direction(
        Point::new(10.0, 10.0),
        &[Point::new(50.0, 13.0), Point::new(-4.0, 80.0)],
        Point::new(0.0, 0.0),
    );
    assert!(approx_eq(d.length(), 1.0));
}

#[test]
fn single_neighbor_pushes_label_away() {
    let d = smart_label_direction(Point::new(0.0, 0.0), &[Point::new(100.0, 0.0)], Point::new(50.0, 50.0));
    assert!(point_approx_eq(d, Point::new(-1.0, 0.0)));
}

#[test]
fn right_angle_corner_points_outward_along_bisector() {
    let d = smart_label_direction(
        Point::new(0.0, 0.0),
        &[Point::new(10.0, 0.0), Point::new(0.0, 30.0)],
        Point::new(0.0, 0.0),
    );
    let expected = Point::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2);
    assert!(point_approx_eq(d, expected));
}

#[test]
fn isolated_point_faces_away_from_centroid() {
    let d = smart_label_direction(Point::new(10.0, 0.0), &[], Point::new(0.0, 0.0));
    assert!(point_approx_eq(d, Point::new(1.0, 0.0)));
}

#[test]
fn isolated_point_at_centroid_uses_fallback() {
    let d = smart_label_direction(Point::new(5.0, 5.0), &[], Point::new(5.0, 5.0));
    assert_eq!(d, FALLBACK_LABEL_DIRECTION);
}

#[test]
fn symmetric_neighbors_use_fallback() {
    // Midpoint of a straight segment: unit vectors cancel exactly.
    let d = smart_label_direction(
        Point::new(0.0, 0.0),
        &[Point::new(-20.0, 0.0), Point::new(20.0, 0.0)],
        Point::new(0.0, 100.0),
    );
    assert_eq!(d, FALLBACK_LABEL_DIRECTION);
}

#[test]
fn coincident_neighbor_contributes_nothing() {
    let d = smart_label_direction(
        Point::new(0.0, 0.0),
        &[Point::new(0.0, 0.0), Point::new(0.0, 40.0)],
        Point::new(0.0, 0.0),
    );
    assert!(point_approx_eq(d, Point::new(0.0, -1.0)));
}

#[test]
fn fallback_points_up_and_right_on_screen() {
    assert!(FALLBACK_LABEL_DIRECTION.x > 0.0);
    assert!(FALLBACK_LABEL_DIRECTION.y < 0.0);
    assert!(approx_eq(FALLBACK_LABEL_DIRECTION.length(), 1.0));
}

// =============================================================
// label_position
// =============================================================

#[test]
fn automatic_label_sits_at_fixed_distance() {
    let p = Point::new(100.0, 100.0);
    let at = label_position(p, &[Point::new(140.0, 100.0)], Point::new(0.0, 0.0), None);
    assert!(point_approx_eq(at, Point::new(100.0 - LABEL_DISTANCE_PX, 100.0)));
    assert!(approx_eq(at.distance(p), LABEL_DISTANCE_PX));
}

#[test]
fn manual_offset_is_exact() {
    let p = Point::new(100.0, 100.0);
    let at = label_position(p, &[Point::new(140.0, 100.0)], Point::new(0.0, 0.0), Some(Point::new(10.0, -5.0)));
    assert_eq!(at, Point::new(110.0, 95.0));
}

#[test]
fn zero_manual_offset_sits_on_the_point() {
    let p = Point::new(7.0, 8.0);
    let at = label_position(p, &[], Point::new(0.0, 0.0), Some(Point::new(0.0, 0.0)));
    assert_eq!(at, p);
}
