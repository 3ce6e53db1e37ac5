//! Document model: geometry elements, narrative steps, and freehand strokes.
//!
//! A [`GeometryDocument`] arrives from the surrounding application (usually
//! decoded from generated JSON) and is never patched in place by the canvas.
//! Every edit goes through one of the `with_*` / `without_*` builders, which
//! return a fresh document for the owner to persist and hand back.
//!
//! References between elements are plain ids. An edge, face, or angle naming a
//! missing point is tolerated everywhere: lookups return `None` and callers
//! skip the element.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::label;
use crate::projection::Point3;
use crate::selection::{ElementKind, SelectionSet};
use crate::view::Point;

/// Identifier of a point, edge, face, or angle.
pub type ObjectId = String;

/// Errors produced while decoding a document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// The payload was not a valid document.
    #[error("invalid geometry document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whether a document is drawn flat or as a rotatable solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocMode {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

/// A vertex of the figure in model space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Manual label offset in screen pixels, relative to the projected point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_offset: Option<Point>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_ids: Vec<ObjectId>,
}

impl GeoPoint {
    #[must_use]
    pub fn position(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Decoration drawn at an edge midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeMarker {
    /// Equal-length mark.
    Tick,
    /// Second equal-length class.
    DoubleTick,
    /// Parallel mark.
    Arrow,
    /// Second parallel class.
    DoubleArrow,
}

/// A segment between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: ObjectId,
    pub from: ObjectId,
    pub to: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<EdgeMarker>,
}

/// A filled polygon over three or more points, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Face {
    pub id: ObjectId,
    pub point_ids: Vec<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// Marker drawn inside an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleMarker {
    Right,
    #[default]
    Arc,
    DoubleArc,
}

/// An angle at `center` spanned by the arms toward `start` and `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub id: ObjectId,
    pub center: ObjectId,
    pub start: ObjectId,
    pub end: ObjectId,
    #[serde(default)]
    pub marker: AngleMarker,
    /// Text or numeric label; numbers are kept in their decimal form.
    #[serde(default, deserialize_with = "text_or_number", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One narrative step of the solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,
    /// Ids of elements to emphasize while this step is active.
    #[serde(default)]
    pub highlight: Vec<ObjectId>,
}

/// One entry of the generated reasoning trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
}

/// A source cited by the generated solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A finished freehand stroke in 2D world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreehandStroke {
    pub id: Uuid,
    /// Samples in drawing order.
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
}

/// Aggregate root handed to the canvas by its owner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryDocument {
    #[serde(default)]
    pub mode: DocMode,
    #[serde(default)]
    pub points: Vec<GeoPoint>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub faces: Vec<Face>,
    #[serde(default)]
    pub angles: Vec<Angle>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Vec<ReasoningEntry>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strokes: Vec<FreehandStroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citations: Option<Vec<Citation>>,
}

impl GeometryDocument {
    /// Decode a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] when the payload is malformed or misses a
    /// required field.
    pub fn from_json(raw: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Encode the document as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.mode == DocMode::ThreeD
    }

    #[must_use]
    pub fn point(&self, id: &str) -> Option<&GeoPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Points joined to `id` by an edge. Dangling edges are skipped.
    pub fn neighbors<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GeoPoint> + 'a {
        self.edges.iter().filter_map(move |e| {
            if e.from == id {
                self.point(&e.to)
            } else if e.to == id {
                self.point(&e.from)
            } else {
                None
            }
        })
    }

    /// Mean model-space position of all points.
    #[must_use]
    pub fn model_centroid(&self) -> Point3 {
        let positions: Vec<Point3> = self.points.iter().map(GeoPoint::position).collect();
        label::centroid_3d(&positions)
    }

    /// The step at `index`, if any.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Whether `other` has the same mode and the same point ids and coordinates.
    ///
    /// The view is reset whenever this returns false for an incoming document.
    #[must_use]
    pub fn same_layout(&self, other: &GeometryDocument) -> bool {
        self.mode == other.mode
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.id == b.id && a.position() == b.position())
    }

    /// Copy of the document with a manual label offset on point `id`.
    #[must_use]
    pub fn with_label_offset(&self, id: &str, offset: Point) -> Self {
        let mut next = self.clone();
        if let Some(p) = next.points.iter_mut().find(|p| p.id == id) {
            p.label_offset = Some(offset);
        }
        next
    }

    /// Copy of the document with `stroke` appended.
    #[must_use]
    pub fn with_stroke(&self, stroke: FreehandStroke) -> Self {
        let mut next = self.clone();
        next.strokes.push(stroke);
        next
    }

    /// Copy of the document with every freehand stroke removed.
    #[must_use]
    pub fn without_strokes(&self) -> Self {
        let mut next = self.clone();
        next.strokes.clear();
        next
    }

    /// Copy of the document with `color` applied to every selected element.
    ///
    /// Label selections color their point; faces take the color as fill.
    #[must_use]
    pub fn with_color(&self, targets: &SelectionSet, color: &str) -> Self {
        let mut next = self.clone();
        for target in targets.iter() {
            match target.kind {
                ElementKind::Point | ElementKind::Label => {
                    if let Some(p) = next.points.iter_mut().find(|p| p.id == target.id) {
                        p.color = Some(color.to_owned());
                    }
                }
                ElementKind::Edge => {
                    if let Some(e) = next.edges.iter_mut().find(|e| e.id == target.id) {
                        e.color = Some(color.to_owned());
                    }
                }
                ElementKind::Face => {
                    if let Some(f) = next.faces.iter_mut().find(|f| f.id == target.id) {
                        f.fill = Some(color.to_owned());
                    }
                }
            }
        }
        next
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
