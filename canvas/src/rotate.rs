//! Auto-rotation timer state.
//!
//! The host drives the timer by calling [`AutoRotate::tick`] every
//! [`AUTO_ROTATE_INTERVAL_MS`](crate::consts::AUTO_ROTATE_INTERVAL_MS). Each
//! tick turns the view about the vertical axis by a fixed step, but only for
//! 3D documents and only while no gesture is in progress.

#[cfg(test)]
#[path = "rotate_test.rs"]
mod rotate_test;

use crate::consts::AUTO_ROTATE_STEP_DEG;
use crate::input::InputState;
use crate::view::ViewTransform;

/// Turntable auto-rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRotate {
    /// The student has switched auto-rotation on.
    pub enabled: bool,
    /// Degrees per tick.
    pub step_deg: f64,
}

impl Default for AutoRotate {
    fn default() -> Self {
        Self { enabled: false, step_deg: AUTO_ROTATE_STEP_DEG }
    }
}

impl AutoRotate {
    /// Flip the switch. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    /// Whether a tick would rotate right now.
    #[must_use]
    pub fn is_running(&self, is_3d: bool, input: &InputState) -> bool {
        self.enabled && is_3d && !input.blocks_auto_rotate()
    }

    /// Advance one timer tick. Returns true if the view changed.
    pub fn tick(&self, view: &mut ViewTransform, is_3d: bool, input: &InputState) -> bool {
        if !self.is_running(is_3d, input) {
            return false;
        }
        view.rotate_y_by(self.step_deg);
        true
    }
}
