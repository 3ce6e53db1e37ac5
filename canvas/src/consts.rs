//! Shared numeric constants for the geometry canvas.

// ── View transform ──────────────────────────────────────────────

/// Smallest allowed scale, in screen pixels per model unit.
pub const SCALE_MIN: f64 = 5.0;

/// Largest allowed scale, in screen pixels per model unit.
pub const SCALE_MAX: f64 = 200.0;

/// Default scale for flat (2D) documents.
pub const DEFAULT_SCALE_2D: f64 = 40.0;

/// Default scale for 3D documents.
pub const DEFAULT_SCALE_3D: f64 = 30.0;

/// Default tilt about the horizontal axis for 3D documents, in degrees.
pub const DEFAULT_ANGLE_X_3D: f64 = 20.0;

/// Default turn about the vertical axis for 3D documents, in degrees.
pub const DEFAULT_ANGLE_Y_3D: f64 = -30.0;

/// Multiplier applied to the default scale when fitting the figure on reset.
pub const FIT_SCALE_MULTIPLIER: f64 = 1.5;

/// Upper bound for the fitted scale.
pub const FIT_SCALE_CAP: f64 = 80.0;

/// Zoom factor for a single zoom-in / zoom-out button press.
pub const ZOOM_BUTTON_FACTOR: f64 = 1.2;

/// Exponential wheel sensitivity: `scale *= exp(-dy * WHEEL_ZOOM_SENSITIVITY)`.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Relative scale change per screen pixel of inter-pointer distance change.
pub const PINCH_ZOOM_SENSITIVITY: f64 = 0.01;

// ── Labels ──────────────────────────────────────────────────────

/// Distance from a projected point to its automatically placed label, in pixels.
pub const LABEL_DISTANCE_PX: f64 = 25.0;

/// Half-width of the approximate label hit box, in pixels.
pub const LABEL_HIT_HALF_WIDTH_PX: f64 = 14.0;

/// Half-height of the approximate label hit box, in pixels.
pub const LABEL_HIT_HALF_HEIGHT_PX: f64 = 11.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Radius of the drawn point dot, in pixels.
pub const POINT_RADIUS_PX: f64 = 5.0;

/// Touch-friendly hit radius around a projected point, in pixels.
pub const POINT_HIT_RADIUS_PX: f64 = 15.0;

/// Maximum point-to-segment distance that counts as an edge hit, in pixels.
pub const EDGE_HIT_TOLERANCE_PX: f64 = 8.0;

// ── Auto-rotation ───────────────────────────────────────────────

/// Degrees added to the vertical rotation angle per timer tick.
pub const AUTO_ROTATE_STEP_DEG: f64 = 1.0;

/// Auto-rotation timer interval in milliseconds.
pub const AUTO_ROTATE_INTERVAL_MS: u64 = 50;

// ── Markers ─────────────────────────────────────────────────────

/// Half-length of an equal-length tick mark, in pixels.
pub const TICK_HALF_LEN_PX: f64 = 6.0;

/// Spacing between the two marks of a double tick or double arrow, in pixels.
pub const DOUBLE_MARK_GAP_PX: f64 = 5.0;

/// Size of a parallel-arrow chevron, in pixels.
pub const ARROW_MARK_SIZE_PX: f64 = 7.0;

/// Side length of a right-angle square marker, in pixels.
pub const RIGHT_ANGLE_SIZE_PX: f64 = 12.0;

/// Radius of the inner angle arc, in pixels.
pub const ANGLE_ARC_RADIUS_PX: f64 = 18.0;

/// Extra radius of the outer arc of a double-arc marker, in pixels.
pub const ANGLE_ARC_GAP_PX: f64 = 5.0;

/// Distance of an angle label from its vertex, in pixels.
pub const ANGLE_LABEL_DISTANCE_PX: f64 = 32.0;

/// Perpendicular offset of an edge label from the edge midpoint, in pixels.
pub const EDGE_LABEL_OFFSET_PX: f64 = 12.0;

// ── Strokes ─────────────────────────────────────────────────────

/// Default freehand stroke color.
pub const DEFAULT_STROKE_COLOR: &str = "#E0483E";

/// Default freehand stroke width, in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;
