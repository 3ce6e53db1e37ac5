//! View transform: scale, rotation, and pan, plus the coordinate mappings
//! derived from them.
//!
//! Two coordinate systems hang off the same transform. Geometry goes through
//! the full 3D projection ([`ViewTransform::project`]); freehand strokes live
//! in a flat 2D world plane that only scales and pans ([`ViewTransform::to_screen`]
//! / [`ViewTransform::to_world`]) and never rotates.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ANGLE_X_3D, DEFAULT_ANGLE_Y_3D, DEFAULT_SCALE_2D, DEFAULT_SCALE_3D, FIT_SCALE_CAP, FIT_SCALE_MULTIPLIER,
    SCALE_MAX, SCALE_MIN,
};
use crate::projection::{self, Point3};

/// A point or vector in screen space or 2D world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    #[must_use]
    pub fn normalized(self) -> Option<Point> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            return None;
        }
        Some(self * (1.0 / len))
    }

    /// Counter-clockwise perpendicular (in y-down screen space this turns left).
    #[must_use]
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }

    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Size of the rendering surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Visual center of the surface.
    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether layout has produced a usable surface yet.
    #[must_use]
    pub fn is_laid_out(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Clamp a scale into the allowed `[SCALE_MIN, SCALE_MAX]` range.
#[must_use]
pub fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return SCALE_MIN;
    }
    scale.clamp(SCALE_MIN, SCALE_MAX)
}

/// Camera state for the geometry canvas.
///
/// `angle_x` / `angle_y` are in degrees. `scale` is screen pixels per model
/// unit. `pan_x` / `pan_y` are in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub angle_x: f64,
    pub angle_y: f64,
    pub scale: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::for_mode(false)
    }
}

impl ViewTransform {
    /// Mode-dependent framing: flat top-down for 2D, oblique for 3D. Pan is zero.
    #[must_use]
    pub fn for_mode(is_3d: bool) -> Self {
        if is_3d {
            Self {
                angle_x: DEFAULT_ANGLE_X_3D,
                angle_y: DEFAULT_ANGLE_Y_3D,
                scale: DEFAULT_SCALE_3D,
                pan_x: 0.0,
                pan_y: 0.0,
            }
        } else {
            Self { angle_x: 0.0, angle_y: 0.0, scale: DEFAULT_SCALE_2D, pan_x: 0.0, pan_y: 0.0 }
        }
    }

    /// The pan offset as a vector.
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Convert a screen-space point to the 2D drawing plane.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.scale,
            y: (screen.y - self.pan_y) / self.scale,
        }
    }

    /// Convert a point on the 2D drawing plane to screen space.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.pan_x,
            y: world.y * self.scale + self.pan_y,
        }
    }

    /// Project a model-space point to screen space, including the pan offset.
    #[must_use]
    pub fn project(&self, p: Point3, viewport: Viewport) -> Point {
        projection::project(p, self.angle_x, self.angle_y, self.scale, viewport.width, viewport.height) + self.pan()
    }

    /// Set the scale, clamped to the allowed range.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = clamp_scale(scale);
    }

    /// Multiply the scale by `factor`, clamped to the allowed range.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Translate the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Advance the vertical-axis rotation, wrapping into `[0, 360)`.
    pub fn rotate_y_by(&mut self, degrees: f64) {
        self.angle_y = (self.angle_y + degrees).rem_euclid(360.0);
    }

    /// Enlarge the scale by the fit multiplier (capped) and pan so `centroid`
    /// lands on the viewport's visual center.
    pub fn fit_to(&mut self, centroid: Point3, viewport: Viewport) {
        let fitted = (self.scale * FIT_SCALE_MULTIPLIER).min(FIT_SCALE_CAP.max(self.scale));
        self.set_scale(fitted);
        let projected =
            projection::project(centroid, self.angle_x, self.angle_y, self.scale, viewport.width, viewport.height);
        let offset = viewport.center() - projected;
        self.pan_x = offset.x;
        self.pan_y = offset.y;
    }
}
