use super::*;
use geocanvas::consts::DEFAULT_SCALE_2D;
use geocanvas::doc::{DocMode, GeoPoint, GeometryDocument};

fn gp(id: &str, x: f64, y: f64, label: Option<&str>) -> GeoPoint {
    GeoPoint {
        id: id.into(),
        x,
        y,
        z: 0.0,
        label: label.map(Into::into),
        color: None,
        label_offset: None,
        linked_ids: Vec::new(),
    }
}

#[test]
fn empty_canvas_has_default_view_and_no_points() {
    let core = EngineCore::new();
    let snap = snapshot(&core);
    assert!(snap.points.is_empty());
    assert!(snap.centroid.is_none());
    assert!((snap.view.scale - DEFAULT_SCALE_2D).abs() < 1e-9);
}

#[test]
fn fitted_document_is_centered() {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 1.0);
    core.set_document(Some(GeometryDocument {
        mode: DocMode::TwoD,
        points: vec![gp("A", 0.0, 0.0, Some("A")), gp("B", 2.0, 0.0, None), gp("C", 1.0, 3.0, Some("C"))],
        ..Default::default()
    }));

    let snap = snapshot(&core);
    assert_eq!(snap.points.len(), 3);
    let centroid = snap.centroid.unwrap();
    assert!((centroid.x - 400.0).abs() < 1e-9 && (centroid.y - 300.0).abs() < 1e-9, "{centroid:?}");
    assert!(snap.points[0].label.is_some());
    assert!(snap.points[1].label.is_none());
}

#[test]
fn json_omits_missing_labels() {
    let mut core = EngineCore::new();
    core.set_viewport(800.0, 600.0, 1.0);
    core.set_document(Some(GeometryDocument { points: vec![gp("P", 1.0, 1.0, None)], ..Default::default() }));

    let json = serde_json::to_value(snapshot(&core)).unwrap();
    assert_eq!(json["points"][0]["id"], "P");
    assert!(json["points"][0].get("label").is_none());
    assert!(json["view"]["scale"].is_number());
}
