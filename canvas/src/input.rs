//! Input model: tools, modifier keys, pointers, and the gesture state machine.
//!
//! This module defines the types consumed by the input engine. `Tool` and
//! `Modifiers` capture the student's intent at the time of a pointer event.
//! `ActivePointers` tracks every pointer currently down with its last known
//! position, which is what all move deltas are computed from. `InputState` is
//! the gesture being tracked between pointer-down and pointer-up.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH};
use crate::doc::ObjectId;
use crate::selection::SelectionSet;
use crate::view::Point;

/// Which exclusive tool mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Select, drag labels, and pan on empty space with modifiers (default).
    #[default]
    Select,
    /// Every primary drag pans the view.
    Pan,
    /// Every primary drag records a freehand stroke.
    Draw,
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button, pen, or a touch contact.
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `" "`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the space bar.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space" || self.0 == "Spacebar"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Browser pointer id.
pub type PointerId = i32;

/// Pointers currently down, with their last known screen positions.
#[derive(Debug, Clone, Default)]
pub struct ActivePointers {
    pointers: Vec<(PointerId, Point)>,
}

impl ActivePointers {
    /// Record a pointer going down (or re-seat one that is already tracked).
    pub fn press(&mut self, id: PointerId, pos: Point) {
        if let Some(slot) = self.pointers.iter_mut().find(|(pid, _)| *pid == id) {
            slot.1 = pos;
        } else {
            self.pointers.push((id, pos));
        }
    }

    /// Move a tracked pointer, returning its previous position.
    pub fn move_to(&mut self, id: PointerId, pos: Point) -> Option<Point> {
        let slot = self.pointers.iter_mut().find(|(pid, _)| *pid == id)?;
        let prev = slot.1;
        slot.1 = pos;
        Some(prev)
    }

    /// Forget a pointer. Returns true if it was tracked.
    pub fn release(&mut self, id: PointerId) -> bool {
        let before = self.pointers.len();
        self.pointers.retain(|(pid, _)| *pid != id);
        self.pointers.len() != before
    }

    /// Positions of the first two pointers, if at least two are down.
    #[must_use]
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.pointers.as_slice() {
            [(_, a), (_, b), ..] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Distance between the first two pointers.
    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        self.pair().map(|(a, b)| a.distance(b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Active tool mode.
    pub tool: Tool,
    /// Selected elements.
    pub selection: SelectionSet,
    /// Space bar is held (temporary pan).
    pub space_held: bool,
    /// Color for new freehand strokes.
    pub stroke_color: String,
    /// Width for new freehand strokes.
    pub stroke_width: f64,
    /// Index of the narrative step being shown.
    pub step_index: usize,
    /// The owner is waiting on document generation. Never gates input.
    pub loading: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            selection: SelectionSet::default(),
            space_held: false,
            stroke_color: DEFAULT_STROKE_COLOR.to_owned(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            step_index: 0,
            loading: false,
        }
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Pointer drags translate the pan offset.
    Panning,
    /// Pointer moves append to the in-progress stroke.
    Drawing,
    /// The label of a point follows the pointer.
    DraggingLabel {
        /// Point whose label is being dragged.
        point_id: ObjectId,
        /// Pointer that grabbed the label.
        pointer: PointerId,
    },
    /// Two pointers zoom (by spread) and pan (by midpoint drift) together.
    PinchZooming,
}

impl InputState {
    /// Whether this gesture suspends auto-rotation.
    #[must_use]
    pub fn blocks_auto_rotate(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
