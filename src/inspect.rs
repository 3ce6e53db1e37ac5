//! Read-only snapshot of what the canvas would draw for a stored document.

use geocanvas::engine::EngineCore;
use geocanvas::view::Point;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub angle_x: f64,
    pub angle_y: f64,
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSnapshot {
    pub id: String,
    pub screen: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub view: ViewSnapshot,
    pub points: Vec<PointSnapshot>,
    pub centroid: Option<Point>,
}

/// Capture the view and projected points of `core`.
#[must_use]
pub fn snapshot(core: &EngineCore) -> Snapshot {
    let view = core.view();
    let projected = core.projected();
    let points = projected
        .as_ref()
        .map(|scene| {
            scene
                .points
                .iter()
                .map(|p| PointSnapshot { id: p.id.clone(), screen: p.screen, label: p.label })
                .collect()
        })
        .unwrap_or_default();

    Snapshot {
        view: ViewSnapshot {
            angle_x: view.angle_x,
            angle_y: view.angle_y,
            scale: view.scale,
            pan_x: view.pan_x,
            pan_y: view.pan_y,
        },
        points,
        centroid: projected.map(|scene| scene.centroid),
    }
}

#[cfg(test)]
#[path = "inspect_test.rs"]
mod tests;
