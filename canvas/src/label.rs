//! Centroids and label placement.
//!
//! Point labels are pushed away from the edges that meet at the point: the
//! label direction is the negated sum of unit vectors toward each neighbor.
//! Isolated points push away from the figure's centroid instead. A manual
//! `label_offset` on the point always wins.

#[cfg(test)]
#[path = "label_test.rs"]
mod label_test;

use std::f64::consts::FRAC_1_SQRT_2;

use crate::consts::LABEL_DISTANCE_PX;
use crate::projection::Point3;
use crate::view::Point;

/// Up-and-right at 45°, in y-down screen space.
pub const FALLBACK_LABEL_DIRECTION: Point = Point { x: FRAC_1_SQRT_2, y: -FRAC_1_SQRT_2 };

/// Arithmetic mean of model-space points; the origin when empty.
#[must_use]
pub fn centroid_3d(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::default();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let (sx, sy, sz) = points
        .iter()
        .fold((0.0, 0.0, 0.0), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
    Point3::new(sx / n, sy / n, sz / n)
}

/// Arithmetic mean of screen-space points; the origin when empty.
#[must_use]
pub fn centroid_2d(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::default();
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::default(), |acc, &p| acc + p);
    sum * (1.0 / n)
}

/// Unit direction in which to place a point's label.
///
/// `neighbors` are the projected positions of every point joined to `point`
/// by an edge. Neighbors coincident with the point contribute nothing.
#[must_use]
pub fn smart_label_direction(point: Point, neighbors: &[Point], centroid: Point) -> Point {
    if neighbors.is_empty() {
        return (point - centroid).normalized().unwrap_or(FALLBACK_LABEL_DIRECTION);
    }

    let sum = neighbors
        .iter()
        .filter_map(|&n| (n - point).normalized())
        .fold(Point::default(), |acc, u| acc + u);

    (-sum).normalized().unwrap_or(FALLBACK_LABEL_DIRECTION)
}

/// Final on-screen label anchor for a point.
///
/// A manual offset is added verbatim to the projected position; otherwise the
/// label sits `LABEL_DISTANCE_PX` along [`smart_label_direction`].
#[must_use]
pub fn label_position(point: Point, neighbors: &[Point], centroid: Point, manual_offset: Option<Point>) -> Point {
    if let Some(offset) = manual_offset {
        return point + offset;
    }
    point + smart_label_direction(point, neighbors, centroid) * LABEL_DISTANCE_PX
}
