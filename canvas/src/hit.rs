#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{EDGE_HIT_TOLERANCE_PX, LABEL_HIT_HALF_HEIGHT_PX, LABEL_HIT_HALF_WIDTH_PX, POINT_HIT_RADIUS_PX};
use crate::doc::ObjectId;
use crate::projection::ProjectedScene;
use crate::selection::{ElementKind, ElementRef};
use crate::view::Point;

/// Which part of the figure was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The label box of a point.
    Label,
    /// The disc around a point.
    Point,
    /// The body of an edge.
    Edge,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub part: HitPart,
}

impl Hit {
    /// The hit as a kind-tagged selection target.
    #[must_use]
    pub fn element(&self) -> ElementRef {
        let kind = match self.part {
            HitPart::Label => ElementKind::Label,
            HitPart::Point => ElementKind::Point,
            HitPart::Edge => ElementKind::Edge,
        };
        ElementRef::new(self.object_id.clone(), kind)
    }
}

/// Resolve the topmost target under `screen_pt`.
///
/// Priority is labels, then points, then edges. Within a category the first
/// declared element wins.
#[must_use]
pub fn hit_test(screen_pt: Point, scene: &ProjectedScene) -> Option<Hit> {
    hit_label(screen_pt, scene)
        .or_else(|| hit_point(screen_pt, scene))
        .or_else(|| hit_edge(screen_pt, scene))
}

fn hit_label(screen_pt: Point, scene: &ProjectedScene) -> Option<Hit> {
    scene.points.iter().find_map(|p| {
        let anchor = p.label?;
        let inside = (screen_pt.x - anchor.x).abs() <= LABEL_HIT_HALF_WIDTH_PX
            && (screen_pt.y - anchor.y).abs() <= LABEL_HIT_HALF_HEIGHT_PX;
        inside.then(|| Hit { object_id: p.id.clone(), part: HitPart::Label })
    })
}

fn hit_point(screen_pt: Point, scene: &ProjectedScene) -> Option<Hit> {
    scene
        .points
        .iter()
        .find(|p| p.screen.distance(screen_pt) <= POINT_HIT_RADIUS_PX)
        .map(|p| Hit { object_id: p.id.clone(), part: HitPart::Point })
}

fn hit_edge(screen_pt: Point, scene: &ProjectedScene) -> Option<Hit> {
    scene
        .edges
        .iter()
        .find(|e| point_segment_distance(screen_pt, e.from, e.to) <= EDGE_HIT_TOLERANCE_PX)
        .map(|e| Hit { object_id: e.id.clone(), part: HitPart::Edge })
}

/// Distance from `p` to the segment `a`–`b`, with the projection parameter
/// clamped to the segment. A zero-length segment measures to its endpoint.
#[must_use]
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
