//! Scene building: turns document, view, and UI state into a flat display list.
//!
//! This module decides *what* is drawn and where, in screen pixels. It never
//! touches a drawing surface; [`crate::render`] replays the resulting
//! [`Scene`] onto a `Canvas2D` context. Keeping the two apart lets marker
//! geometry and draw order be tested natively.
//!
//! Draw order (bottom first): faces, edges, edge markers, edge labels, angle
//! markers and labels, points, point labels, freehand strokes.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashSet;
use std::f64::consts::PI;

use crate::consts::{
    ANGLE_ARC_GAP_PX, ANGLE_ARC_RADIUS_PX, ANGLE_LABEL_DISTANCE_PX, ARROW_MARK_SIZE_PX, DOUBLE_MARK_GAP_PX,
    EDGE_LABEL_OFFSET_PX, POINT_RADIUS_PX, RIGHT_ANGLE_SIZE_PX, TICK_HALF_LEN_PX,
};
use crate::doc::{Angle, AngleMarker, Edge, EdgeMarker, Face, GeometryDocument};
use crate::projection::ProjectedScene;
use crate::selection::{ElementKind, SelectionSet};
use crate::stroke::StrokeCapture;
use crate::view::{Point, ViewTransform, Viewport};

const INK: &str = "#1F1A17";
const EDGE_COLOR: &str = "#334155";
const SELECTED_COLOR: &str = "#2563EB";
const HIGHLIGHT_COLOR: &str = "#F59E0B";
const FACE_FILL: &str = "#93C5FD";
const FACE_OPACITY: f64 = 0.25;
const EDGE_WIDTH: f64 = 2.0;
const EMPHASIS_WIDTH: f64 = 4.0;
const MARKER_WIDTH: f64 = 1.5;

/// One drawing primitive in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Filled closed polygon.
    Polygon { points: Vec<Point>, fill: String, opacity: f64 },
    /// Straight segment.
    Line { from: Point, to: Point, color: String, width: f64 },
    /// Open polyline.
    Polyline { points: Vec<Point>, color: String, width: f64 },
    /// Circular arc; angles in radians, measured in y-down screen space.
    Arc { center: Point, radius: f64, start: f64, end: f64, anticlockwise: bool, color: String, width: f64 },
    /// Filled disc, optionally ringed.
    Dot { center: Point, radius: f64, fill: String, ring: Option<String> },
    /// Centered text.
    Text { text: String, at: Point, color: String, bold: bool },
}

/// A complete frame's display list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub commands: Vec<DrawCmd>,
}

impl Scene {
    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

struct Style<'a> {
    selection: &'a SelectionSet,
    highlighted: HashSet<&'a str>,
}

impl Style<'_> {
    fn color_for(&self, id: &str, kind: ElementKind, own: Option<&str>, fallback: &str) -> String {
        if self.selection.contains(id, kind) {
            SELECTED_COLOR.to_owned()
        } else if self.highlighted.contains(id) {
            HIGHLIGHT_COLOR.to_owned()
        } else {
            own.unwrap_or(fallback).to_owned()
        }
    }

    fn emphasized(&self, id: &str, kind: ElementKind) -> bool {
        self.selection.contains(id, kind) || self.highlighted.contains(id)
    }
}

/// Build the display list for one frame.
#[must_use]
pub fn build(
    doc: Option<&GeometryDocument>,
    view: &ViewTransform,
    viewport: Viewport,
    selection: &SelectionSet,
    step_index: usize,
    in_progress: Option<&StrokeCapture>,
) -> Scene {
    let mut scene = Scene::default();

    if let Some(doc) = doc {
        let projected = ProjectedScene::build(doc, view, viewport);
        let highlighted: HashSet<&str> = doc
            .step(step_index)
            .map(|s| s.highlight.iter().map(String::as_str).collect())
            .unwrap_or_default();
        let style = Style { selection, highlighted };

        for face in &doc.faces {
            push_face(&mut scene, face, &projected, &style);
        }
        for edge in &doc.edges {
            push_edge(&mut scene, edge, &projected, &style);
        }
        for angle in &doc.angles {
            push_angle(&mut scene, angle, &projected, &style);
        }
        push_points(&mut scene, doc, &projected, &style);

        for stroke in &doc.strokes {
            let points = stroke.points.iter().map(|&w| view.to_screen(w)).collect();
            scene.push(DrawCmd::Polyline { points, color: stroke.color.clone(), width: stroke.width });
        }
    }

    if let Some(stroke) = in_progress.filter(|s| !s.is_empty()) {
        let points = stroke.points().iter().map(|&w| view.to_screen(w)).collect();
        scene.push(DrawCmd::Polyline { points, color: stroke.color().to_owned(), width: stroke.width() });
    }

    scene
}

fn push_face(scene: &mut Scene, face: &Face, projected: &ProjectedScene, style: &Style<'_>) {
    if face.point_ids.len() < 3 {
        return;
    }
    let Some(points) = face
        .point_ids
        .iter()
        .map(|id| projected.point(id).map(|p| p.screen))
        .collect::<Option<Vec<Point>>>()
    else {
        return;
    };
    let fill = style.color_for(&face.id, ElementKind::Face, face.fill.as_deref(), FACE_FILL);
    scene.push(DrawCmd::Polygon { points, fill, opacity: face.opacity.unwrap_or(FACE_OPACITY) });
}

fn push_edge(scene: &mut Scene, edge: &Edge, projected: &ProjectedScene, style: &Style<'_>) {
    let (Some(a), Some(b)) = (projected.point(&edge.from), projected.point(&edge.to)) else {
        return;
    };
    let (from, to) = (a.screen, b.screen);
    let color = style.color_for(&edge.id, ElementKind::Edge, edge.color.as_deref(), EDGE_COLOR);
    let width = if style.emphasized(&edge.id, ElementKind::Edge) { EMPHASIS_WIDTH } else { EDGE_WIDTH };
    scene.push(DrawCmd::Line { from, to, color: color.clone(), width });

    if let Some(marker) = edge.marker {
        for points in edge_marker_paths(from, to, marker) {
            scene.push(DrawCmd::Polyline { points, color: color.clone(), width: MARKER_WIDTH });
        }
    }

    if let Some(text) = &edge.label {
        let normal = (to - from).normalized().map_or(Point::new(0.0, -1.0), Point::perp);
        let at = from.midpoint(to) + normal * EDGE_LABEL_OFFSET_PX;
        scene.push(DrawCmd::Text { text: text.clone(), at, color, bold: false });
    }
}

/// Marker strokes for an edge from `from` to `to`. Empty for a zero-length edge.
#[must_use]
pub fn edge_marker_paths(from: Point, to: Point, marker: EdgeMarker) -> Vec<Vec<Point>> {
    let Some(dir) = (to - from).normalized() else {
        return Vec::new();
    };
    let normal = dir.perp();
    let mid = from.midpoint(to);
    let half_gap = DOUBLE_MARK_GAP_PX * 0.5;

    let tick = |at: Point| vec![at - normal * TICK_HALF_LEN_PX, at + normal * TICK_HALF_LEN_PX];
    let chevron = |at: Point| {
        let tip = at + dir * (ARROW_MARK_SIZE_PX * 0.5);
        let back = tip - dir * ARROW_MARK_SIZE_PX;
        let spread = normal * (ARROW_MARK_SIZE_PX * 0.6);
        vec![back + spread, tip, back - spread]
    };

    match marker {
        EdgeMarker::Tick => vec![tick(mid)],
        EdgeMarker::DoubleTick => vec![tick(mid - dir * half_gap), tick(mid + dir * half_gap)],
        EdgeMarker::Arrow => vec![chevron(mid)],
        EdgeMarker::DoubleArrow => vec![chevron(mid - dir * half_gap), chevron(mid + dir * half_gap)],
    }
}

fn push_angle(scene: &mut Scene, angle: &Angle, projected: &ProjectedScene, style: &Style<'_>) {
    let (Some(c), Some(a), Some(b)) =
        (projected.point(&angle.center), projected.point(&angle.start), projected.point(&angle.end))
    else {
        return;
    };
    let color = if style.highlighted.contains(angle.id.as_str()) { HIGHLIGHT_COLOR } else { INK };

    for cmd in angle_marker_cmds(c.screen, a.screen, b.screen, angle.marker, color) {
        scene.push(cmd);
    }

    if let Some(text) = &angle.label {
        if let (Some(u), Some(v)) = ((a.screen - c.screen).normalized(), (b.screen - c.screen).normalized()) {
            let bisector = (u + v).normalized().unwrap_or_else(|| u.perp());
            let at = c.screen + bisector * ANGLE_LABEL_DISTANCE_PX;
            scene.push(DrawCmd::Text { text: text.clone(), at, color: color.to_owned(), bold: false });
        }
    }
}

/// Marker primitives for the angle at `c` between arms toward `a` and `b`.
///
/// Empty when either arm has zero length.
#[must_use]
pub fn angle_marker_cmds(c: Point, a: Point, b: Point, marker: AngleMarker, color: &str) -> Vec<DrawCmd> {
    let (Some(u), Some(v)) = ((a - c).normalized(), (b - c).normalized()) else {
        return Vec::new();
    };

    if marker == AngleMarker::Right {
        let s = RIGHT_ANGLE_SIZE_PX;
        let points = vec![c + u * s, c + u * s + v * s, c + v * s];
        return vec![DrawCmd::Polyline { points, color: color.to_owned(), width: MARKER_WIDTH }];
    }

    let start = u.y.atan2(u.x);
    let mut sweep = v.y.atan2(v.x) - start;
    if sweep > PI {
        sweep -= 2.0 * PI;
    } else if sweep <= -PI {
        sweep += 2.0 * PI;
    }
    let arc = |radius: f64| DrawCmd::Arc {
        center: c,
        radius,
        start,
        end: start + sweep,
        anticlockwise: sweep < 0.0,
        color: color.to_owned(),
        width: MARKER_WIDTH,
    };

    match marker {
        AngleMarker::DoubleArc => vec![arc(ANGLE_ARC_RADIUS_PX), arc(ANGLE_ARC_RADIUS_PX + ANGLE_ARC_GAP_PX)],
        _ => vec![arc(ANGLE_ARC_RADIUS_PX)],
    }
}

fn push_points(scene: &mut Scene, doc: &GeometryDocument, projected: &ProjectedScene, style: &Style<'_>) {
    for (point, p) in doc.points.iter().zip(&projected.points) {
        let ring = style
            .emphasized(&point.id, ElementKind::Point)
            .then(|| style.color_for(&point.id, ElementKind::Point, None, HIGHLIGHT_COLOR));
        let fill = point.color.clone().unwrap_or_else(|| INK.to_owned());
        scene.push(DrawCmd::Dot { center: p.screen, radius: POINT_RADIUS_PX, fill, ring });
    }

    for (point, p) in doc.points.iter().zip(&projected.points) {
        let (Some(text), Some(at)) = (&point.label, p.label) else {
            continue;
        };
        let selected = style.selection.contains(&point.id, ElementKind::Label);
        let color = if selected { SELECTED_COLOR } else { INK };
        scene.push(DrawCmd::Text { text: text.clone(), at, color: color.to_owned(), bold: selected });
    }
}
