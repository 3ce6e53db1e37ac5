//! Projection from 3D model space to 2D screen space.
//!
//! The projection is a fixed turntable rotation (vertical axis first, then
//! horizontal axis) followed by an orthographic drop of depth. There is no
//! perspective divide and no depth sorting.
//!
//! [`ProjectedScene`] is the per-frame projected view of a document: every
//! point's screen position and label anchor, and every edge whose endpoints
//! resolve. Hit-testing and the scene builder both consume it. It is
//! recomputed from `(document, view)` on demand, never cached.

#[cfg(test)]
#[path = "projection_test.rs"]
mod projection_test;

use serde::{Deserialize, Serialize};

use crate::doc::{GeometryDocument, ObjectId};
use crate::label;
use crate::view::{Point, ViewTransform, Viewport};

/// A point in 3D model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Map a model-space point to screen space.
///
/// Rotates by `angle_y` degrees about the vertical axis, then by `angle_x`
/// degrees about the horizontal axis, drops depth, scales, centers in the
/// viewport, and flips y so model-up is screen-up. Pan is not applied here.
#[must_use]
pub fn project(p: Point3, angle_x: f64, angle_y: f64, scale: f64, viewport_width: f64, viewport_height: f64) -> Point {
    let (sin_y, cos_y) = angle_y.to_radians().sin_cos();
    let (sin_x, cos_x) = angle_x.to_radians().sin_cos();

    // Turn about the vertical axis.
    let x1 = p.x * cos_y + p.z * sin_y;
    let z1 = -p.x * sin_y + p.z * cos_y;

    // Tilt about the horizontal axis. Depth (y1 * sin_x + z1 * cos_x) is dropped.
    let y2 = p.y * cos_x - z1 * sin_x;

    Point {
        x: x1 * scale + viewport_width * 0.5,
        y: -y2 * scale + viewport_height * 0.5,
    }
}

/// A document point after projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub id: ObjectId,
    /// Screen position of the point itself.
    pub screen: Point,
    /// Screen position of the label anchor, present only for labelled points.
    pub label: Option<Point>,
}

/// A document edge whose endpoints both resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedEdge {
    pub id: ObjectId,
    pub from: Point,
    pub to: Point,
}

/// Screen-space geometry for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectedScene {
    /// Points in declaration order.
    pub points: Vec<ProjectedPoint>,
    /// Edges in declaration order; dangling edges are skipped.
    pub edges: Vec<ProjectedEdge>,
    /// Mean of all projected point positions.
    pub centroid: Point,
}

impl ProjectedScene {
    /// Project every point and edge of `doc` through `view`.
    #[must_use]
    pub fn build(doc: &GeometryDocument, view: &ViewTransform, viewport: Viewport) -> Self {
        let screens: Vec<Point> = doc.points.iter().map(|p| view.project(p.position(), viewport)).collect();
        let centroid = label::centroid_2d(&screens);

        let points = doc
            .points
            .iter()
            .zip(&screens)
            .map(|(p, &screen)| {
                let label = p.label.as_ref().map(|_| {
                    let neighbors: Vec<Point> =
                        doc.neighbors(&p.id).map(|n| view.project(n.position(), viewport)).collect();
                    label::label_position(screen, &neighbors, centroid, p.label_offset)
                });
                ProjectedPoint { id: p.id.clone(), screen, label }
            })
            .collect();

        let edges = doc
            .edges
            .iter()
            .filter_map(|e| {
                let from = doc.point(&e.from)?;
                let to = doc.point(&e.to)?;
                Some(ProjectedEdge {
                    id: e.id.clone(),
                    from: view.project(from.position(), viewport),
                    to: view.project(to.position(), viewport),
                })
            })
            .collect();

        Self { points, edges, centroid }
    }

    /// Projected position of the point with `id`, if present.
    #[must_use]
    pub fn point(&self, id: &str) -> Option<&ProjectedPoint> {
        self.points.iter().find(|p| p.id == id)
    }
}
