use super::*;
use crate::doc::{DocMode, FreehandStroke, GeoPoint, Step};
use crate::selection::ElementRef;

fn gp(id: &str, x: f64, y: f64) -> GeoPoint {
    GeoPoint {
        id: id.into(),
        x,
        y,
        z: 0.0,
        label: Some(id.into()),
        color: None,
        label_offset: None,
        linked_ids: Vec::new(),
    }
}

fn edge(id: &str, from: &str, to: &str) -> Edge {
    Edge { id: id.into(), from: from.into(), to: to.into(), color: None, label: None, marker: None }
}

fn figure() -> GeometryDocument {
    GeometryDocument {
        mode: DocMode::TwoD,
        points: vec![gp("A", 0.0, 0.0), gp("B", 3.0, 0.0), gp("C", 0.0, 4.0)],
        edges: vec![edge("AB", "A", "B"), edge("AC", "A", "C")],
        faces: vec![Face { id: "F".into(), point_ids: vec!["A".into(), "B".into(), "C".into()], fill: None, opacity: None }],
        angles: vec![Angle {
            id: "rA".into(),
            center: "A".into(),
            start: "B".into(),
            end: "C".into(),
            marker: AngleMarker::Right,
            label: None,
        }],
        steps: vec![Step { description: "Legs".into(), highlight: vec!["AB".into()] }],
        ..Default::default()
    }
}

fn build_plain(doc: &GeometryDocument) -> Scene {
    build(Some(doc), &ViewTransform::default(), Viewport::new(800.0, 600.0), &SelectionSet::new(), usize::MAX, None)
}

fn kind(cmd: &DrawCmd) -> &'static str {
    match cmd {
        DrawCmd::Polygon { .. } => "polygon",
        DrawCmd::Line { .. } => "line",
        DrawCmd::Polyline { .. } => "polyline",
        DrawCmd::Arc { .. } => "arc",
        DrawCmd::Dot { .. } => "dot",
        DrawCmd::Text { .. } => "text",
    }
}

fn line_color<'a>(scene: &'a Scene, from: Point, to: Point) -> Option<(&'a str, f64)> {
    scene.commands.iter().find_map(|c| match c {
        DrawCmd::Line { from: f, to: t, color, width } if *f == from && *t == to => Some((color.as_str(), *width)),
        _ => None,
    })
}

// =============================================================
// Draw order
// =============================================================

#[test]
fn empty_without_document() {
    let scene = build(None, &ViewTransform::default(), Viewport::new(800.0, 600.0), &SelectionSet::new(), 0, None);
    assert!(scene.commands.is_empty());
}

#[test]
fn draw_order_is_faces_edges_angles_points_labels() {
    let scene = build_plain(&figure());
    let kinds: Vec<&str> = scene.commands.iter().map(kind).collect();
    assert_eq!(kinds, ["polygon", "line", "line", "polyline", "dot", "dot", "dot", "text", "text", "text"]);
}

#[test]
fn strokes_draw_last_through_pan_and_scale() {
    let mut doc = figure();
    doc.strokes.push(FreehandStroke {
        id: uuid::Uuid::new_v4(),
        points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        color: "#E0483E".into(),
        width: 3.0,
    });
    let view = ViewTransform { pan_x: 10.0, pan_y: 20.0, ..ViewTransform::default() };
    let scene = build(Some(&doc), &view, Viewport::new(800.0, 600.0), &SelectionSet::new(), 0, None);
    let Some(DrawCmd::Polyline { points, color, .. }) = scene.commands.last() else {
        panic!("expected stroke polyline last");
    };
    assert_eq!(points, &vec![Point::new(10.0, 20.0), Point::new(50.0, 60.0)]);
    assert_eq!(color, "#E0483E");
}

#[test]
fn in_progress_stroke_follows_document_strokes() {
    let mut capture = StrokeCapture::new("#123456", 2.0);
    capture.push(Point::new(1.0, 0.0));
    let scene = build(
        Some(&figure()),
        &ViewTransform::default(),
        Viewport::new(800.0, 600.0),
        &SelectionSet::new(),
        0,
        Some(&capture),
    );
    assert!(matches!(scene.commands.last(), Some(DrawCmd::Polyline { color, .. }) if color == "#123456"));
}

#[test]
fn empty_in_progress_stroke_is_not_drawn() {
    let capture = StrokeCapture::new("#123456", 2.0);
    let with = build(None, &ViewTransform::default(), Viewport::new(800.0, 600.0), &SelectionSet::new(), 0, Some(&capture));
    assert!(with.commands.is_empty());
}

#[test]
fn dangling_references_are_skipped() {
    let mut doc = figure();
    doc.edges.push(edge("AZ", "A", "Z"));
    doc.faces.push(Face { id: "G".into(), point_ids: vec!["A".into(), "B".into(), "Z".into()], fill: None, opacity: None });
    doc.angles.push(Angle {
        id: "z".into(),
        center: "Z".into(),
        start: "A".into(),
        end: "B".into(),
        marker: AngleMarker::Arc,
        label: Some("x".into()),
    });
    assert_eq!(build_plain(&doc), build_plain(&figure()));
}

#[test]
fn faces_with_fewer_than_three_points_are_skipped() {
    let mut doc = figure();
    doc.faces[0].point_ids.truncate(2);
    let scene = build_plain(&doc);
    assert!(!scene.commands.iter().any(|c| matches!(c, DrawCmd::Polygon { .. })));
}

// =============================================================
// Emphasis
// =============================================================

#[test]
fn selected_edge_is_colored_and_thickened() {
    let doc = figure();
    let mut selection = SelectionSet::new();
    selection.replace(ElementRef::new("AB", ElementKind::Edge));
    let view = ViewTransform::default();
    let viewport = Viewport::new(800.0, 600.0);
    let scene = build(Some(&doc), &view, viewport, &selection, usize::MAX, None);
    let (a, b) = (Point::new(400.0, 300.0), Point::new(520.0, 300.0));
    assert_eq!(line_color(&scene, a, b), Some((SELECTED_COLOR, EMPHASIS_WIDTH)));
    assert_eq!(line_color(&scene, a, Point::new(400.0, 140.0)), Some((EDGE_COLOR, EDGE_WIDTH)));
}

#[test]
fn step_highlight_colors_edge() {
    let doc = figure();
    let scene = build(Some(&doc), &ViewTransform::default(), Viewport::new(800.0, 600.0), &SelectionSet::new(), 0, None);
    let (a, b) = (Point::new(400.0, 300.0), Point::new(520.0, 300.0));
    assert_eq!(line_color(&scene, a, b), Some((HIGHLIGHT_COLOR, EMPHASIS_WIDTH)));
}

#[test]
fn selected_label_is_bold() {
    let doc = figure();
    let mut selection = SelectionSet::new();
    selection.replace(ElementRef::new("C", ElementKind::Label));
    let scene = build(Some(&doc), &ViewTransform::default(), Viewport::new(800.0, 600.0), &selection, usize::MAX, None);
    let bold: Vec<&str> = scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Text { text, bold: true, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(bold, ["C"]);
}

#[test]
fn point_color_is_used_as_fill() {
    let mut doc = figure();
    doc.points[0].color = Some("#10B981".into());
    let scene = build_plain(&doc);
    assert!(scene.commands.iter().any(|c| matches!(c, DrawCmd::Dot { fill, ring: None, .. } if fill == "#10B981")));
}

// =============================================================
// Edge markers
// =============================================================

#[test]
fn tick_crosses_edge_at_midpoint() {
    let paths = edge_marker_paths(Point::new(0.0, 0.0), Point::new(100.0, 0.0), EdgeMarker::Tick);
    assert_eq!(paths.len(), 1);
    let tick = &paths[0];
    assert_eq!(tick.len(), 2);
    assert!((tick[0].x - 50.0).abs() < 1e-9 && (tick[1].x - 50.0).abs() < 1e-9);
    assert!(((tick[0].y - tick[1].y).abs() - 2.0 * TICK_HALF_LEN_PX).abs() < 1e-9);
}

#[test]
fn double_marks_are_two_paths() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(0.0, 80.0);
    assert_eq!(edge_marker_paths(from, to, EdgeMarker::DoubleTick).len(), 2);
    assert_eq!(edge_marker_paths(from, to, EdgeMarker::Arrow).len(), 1);
    assert_eq!(edge_marker_paths(from, to, EdgeMarker::DoubleArrow).len(), 2);
}

#[test]
fn arrow_points_along_edge() {
    let paths = edge_marker_paths(Point::new(0.0, 0.0), Point::new(100.0, 0.0), EdgeMarker::Arrow);
    let chevron = &paths[0];
    assert_eq!(chevron.len(), 3);
    assert!(chevron[1].x > chevron[0].x && chevron[1].x > chevron[2].x);
}

#[test]
fn zero_length_edge_has_no_marker() {
    let p = Point::new(5.0, 5.0);
    assert!(edge_marker_paths(p, p, EdgeMarker::DoubleArrow).is_empty());
}

// =============================================================
// Angle markers
// =============================================================

#[test]
fn right_angle_marker_is_a_square_corner() {
    let c = Point::new(0.0, 0.0);
    let cmds = angle_marker_cmds(c, Point::new(50.0, 0.0), Point::new(0.0, -50.0), AngleMarker::Right, INK);
    let [DrawCmd::Polyline { points, .. }] = cmds.as_slice() else {
        panic!("expected one polyline");
    };
    let s = RIGHT_ANGLE_SIZE_PX;
    assert_eq!(points, &vec![Point::new(s, 0.0), Point::new(s, -s), Point::new(0.0, -s)]);
}

#[test]
fn arc_marker_sweeps_the_short_way() {
    let c = Point::new(0.0, 0.0);
    let cmds = angle_marker_cmds(c, Point::new(50.0, 0.0), Point::new(0.0, -50.0), AngleMarker::Arc, INK);
    let [DrawCmd::Arc { start, end, anticlockwise, radius, .. }] = cmds.as_slice() else {
        panic!("expected one arc");
    };
    assert!((start - 0.0).abs() < 1e-9);
    assert!((end + PI / 2.0).abs() < 1e-9);
    assert!(*anticlockwise);
    assert!((radius - ANGLE_ARC_RADIUS_PX).abs() < 1e-9);
}

#[test]
fn double_arc_marker_has_two_radii() {
    let c = Point::new(0.0, 0.0);
    let cmds = angle_marker_cmds(c, Point::new(-50.0, 0.0), Point::new(0.0, 50.0), AngleMarker::DoubleArc, INK);
    let radii: Vec<f64> = cmds
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Arc { radius, .. } => Some(*radius),
            _ => None,
        })
        .collect();
    assert_eq!(radii, vec![ANGLE_ARC_RADIUS_PX, ANGLE_ARC_RADIUS_PX + ANGLE_ARC_GAP_PX]);
}

#[test]
fn degenerate_angle_has_no_marker() {
    let c = Point::new(1.0, 1.0);
    assert!(angle_marker_cmds(c, c, Point::new(5.0, 5.0), AngleMarker::Arc, INK).is_empty());
    assert!(angle_marker_cmds(c, Point::new(5.0, 5.0), c, AngleMarker::Right, INK).is_empty());
}

#[test]
fn angle_label_sits_on_bisector() {
    let mut doc = figure();
    doc.angles[0].label = Some("90".into());
    let scene = build_plain(&doc);
    let at = scene
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCmd::Text { text, at, .. } if text == "90" => Some(*at),
            _ => None,
        })
        .unwrap();
    // A projects to (400, 300); B is to the right and C is above.
    assert!(at.x > 400.0 && at.y < 300.0);
    assert!((at.distance(Point::new(400.0, 300.0)) - ANGLE_LABEL_DISTANCE_PX).abs() < 1e-9);
}
