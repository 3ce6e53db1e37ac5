//! Freehand stroke capture.
//!
//! A stroke records raw pointer samples in 2D world space, in arrival order,
//! with no resampling or smoothing. It is only turned into a
//! [`FreehandStroke`] if at least one sample was recorded.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use uuid::Uuid;

use crate::doc::FreehandStroke;
use crate::view::Point;

/// An in-progress freehand stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeCapture {
    color: String,
    width: f64,
    points: Vec<Point>,
}

impl StrokeCapture {
    /// Start an empty stroke with the given style.
    #[must_use]
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width, points: Vec::new() }
    }

    /// Append one world-space sample.
    pub fn push(&mut self, world: Point) {
        self.points.push(world);
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finalize into an immutable stroke, or `None` if nothing was recorded.
    #[must_use]
    pub fn finish(self) -> Option<FreehandStroke> {
        if self.points.is_empty() {
            return None;
        }
        Some(FreehandStroke { id: Uuid::new_v4(), points: self.points, color: self.color, width: self.width })
    }
}
