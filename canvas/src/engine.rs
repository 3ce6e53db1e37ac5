use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{PINCH_ZOOM_SENSITIVITY, WHEEL_ZOOM_SENSITIVITY, ZOOM_BUTTON_FACTOR};
use crate::doc::{GeometryDocument, ObjectId};
use crate::hit::{self, HitPart};
use crate::input::{ActivePointers, Button, InputState, Key, Modifiers, PointerId, Tool, UiState, WheelDelta};
use crate::projection::ProjectedScene;
use crate::render;
use crate::rotate::AutoRotate;
use crate::scene::{self, Scene};
use crate::selection::SelectionSet;
use crate::stroke::StrokeCapture;
use crate::view::{Point, ViewTransform, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A full replacement document for the owner to persist and hand back.
    DataUpdate(GeometryDocument),
    /// A short phrase to narrate, if the owner has narration enabled.
    Speak(String),
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    /// Last document supplied by the owner or produced by an edit.
    pub doc: Option<GeometryDocument>,
    pub view: ViewTransform,
    pub ui: UiState,
    pub input: InputState,
    pub pointers: ActivePointers,
    /// Stroke being recorded in draw mode.
    pub stroke: Option<StrokeCapture>,
    /// Inter-pointer distance at the previous two-pointer event.
    pub pinch_spread: Option<f64>,
    pub auto_rotate: AutoRotate,
    pub viewport: Viewport,
    pub dpr: f64,
    fit_pending: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: None,
            view: ViewTransform::default(),
            ui: UiState::default(),
            input: InputState::default(),
            pointers: ActivePointers::default(),
            stroke: None,
            pinch_spread: None,
            auto_rotate: AutoRotate::default(),
            viewport: Viewport::default(),
            dpr: 1.0,
            fit_pending: false,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Load the owner's current document.
    ///
    /// The view resets when the mode or the point set changes, or when a
    /// document appears or disappears. Edits that keep the layout (label
    /// offsets, strokes, colors) leave the view alone.
    pub fn set_document(&mut self, doc: Option<GeometryDocument>) -> Vec<Action> {
        let relayout = match (&self.doc, &doc) {
            (Some(old), Some(new)) => !old.same_layout(new),
            (None, None) => false,
            _ => true,
        };
        self.doc = doc;
        self.clamp_step();
        if relayout {
            self.reset_view();
        }
        vec![Action::RenderNeeded]
    }

    /// Apply the outcome of an external generation request.
    ///
    /// On failure the last-known document stays on screen.
    pub fn on_generation_result<E: std::fmt::Display>(&mut self, result: Result<GeometryDocument, E>) -> Vec<Action> {
        match result {
            Ok(doc) => self.set_document(Some(doc)),
            Err(e) => {
                tracing::warn!(error = %e, has_document = self.doc.is_some(), "document generation failed; keeping current document");
                Vec::new()
            }
        }
    }

    /// Record the owner's loading flag. Interaction is never gated on it.
    pub fn set_loading(&mut self, loading: bool) {
        self.ui.loading = loading;
    }

    /// Select the narrative step to show, clamped to the available steps.
    pub fn set_step(&mut self, index: usize) -> Vec<Action> {
        self.ui.step_index = index;
        self.clamp_step();
        vec![Action::RenderNeeded]
    }

    fn clamp_step(&mut self) {
        let count = self.doc.as_ref().map_or(0, |d| d.steps.len());
        self.ui.step_index = self.ui.step_index.min(count.saturating_sub(1));
    }

    // --- Viewport / view ---

    /// Update viewport dimensions and device pixel ratio.
    ///
    /// A fit-to-figure requested by [`Self::reset_view`] before layout was
    /// available completes here.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport = Viewport::new(width_css, height_css);
        self.dpr = dpr;
        self.settle_layout();
    }

    /// Reset pan, rotation, and scale to the document's mode defaults, clear
    /// the selection, leave pan/draw tools, then fit the figure once layout
    /// has settled.
    pub fn reset_view(&mut self) {
        let is_3d = self.doc.as_ref().is_some_and(GeometryDocument::is_3d);
        self.view = ViewTransform::for_mode(is_3d);
        self.ui.selection.clear();
        self.ui.tool = Tool::Select;
        self.fit_pending = true;
        tracing::debug!(is_3d, "view reset");
        self.settle_layout();
    }

    fn settle_layout(&mut self) {
        if !self.fit_pending || !self.viewport.is_laid_out() {
            return;
        }
        self.fit_pending = false;
        if let Some(doc) = &self.doc {
            self.view.fit_to(doc.model_centroid(), self.viewport);
            tracing::debug!(scale = self.view.scale, pan_x = self.view.pan_x, pan_y = self.view.pan_y, "view fitted");
        }
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.view.zoom_by(ZOOM_BUTTON_FACTOR);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.view.zoom_by(1.0 / ZOOM_BUTTON_FACTOR);
        vec![Action::RenderNeeded]
    }

    // --- Tools / editing ---

    /// Set the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        self.ui.tool = tool;
    }

    /// Style for strokes started from now on.
    pub fn set_stroke_style(&mut self, color: impl Into<String>, width: f64) {
        self.ui.stroke_color = color.into();
        self.ui.stroke_width = width;
    }

    /// Apply `color` to every selected element.
    pub fn set_selection_color(&mut self, color: &str) -> Vec<Action> {
        let Some(doc) = &self.doc else {
            return Vec::new();
        };
        if self.ui.selection.is_empty() {
            return Vec::new();
        }
        let next = doc.with_color(&self.ui.selection, color);
        self.publish(next)
    }

    /// Remove every freehand stroke.
    pub fn clear_strokes(&mut self) -> Vec<Action> {
        let Some(doc) = &self.doc else {
            return Vec::new();
        };
        let next = doc.without_strokes();
        self.publish(next)
    }

    fn publish(&mut self, next: GeometryDocument) -> Vec<Action> {
        self.doc = Some(next.clone());
        vec![Action::DataUpdate(next), Action::RenderNeeded]
    }

    // --- Auto-rotation ---

    /// Switch auto-rotation on or off. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate.toggle()
    }

    /// One auto-rotation timer tick.
    pub fn tick_auto_rotate(&mut self) -> Vec<Action> {
        let is_3d = self.doc.as_ref().is_some_and(GeometryDocument::is_3d);
        if self.auto_rotate.tick(&mut self.view, is_3d, &self.input) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Whether a timer tick would rotate right now.
    #[must_use]
    pub fn is_auto_rotating(&self) -> bool {
        let is_3d = self.doc.as_ref().is_some_and(GeometryDocument::is_3d);
        self.auto_rotate.is_running(is_3d, &self.input)
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        pointer: PointerId,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if button == Button::Secondary {
            return Vec::new();
        }
        self.pointers.press(pointer, screen_pt);
        let mut actions = Vec::new();

        if button == Button::Middle || self.ui.tool == Tool::Pan {
            if self.pointers.len() >= 2 {
                self.begin_pinch();
            } else {
                self.input = InputState::Panning;
            }
            actions.push(Action::SetCursor("grabbing".into()));
            return actions;
        }

        if self.ui.tool == Tool::Select && self.pointers.len() == 1 {
            if let Some(hit) = self.projected().and_then(|scene| hit::hit_test(screen_pt, &scene)) {
                match hit.part {
                    HitPart::Label => {
                        self.ui.selection.replace(hit.element());
                        tracing::debug!(point_id = %hit.object_id, "label drag started");
                        self.input = InputState::DraggingLabel { point_id: hit.object_id, pointer };
                        actions.push(Action::SetCursor("grabbing".into()));
                    }
                    HitPart::Point | HitPart::Edge => {
                        let selected = self.ui.selection.toggle_single(hit.element());
                        if selected && hit.part == HitPart::Point {
                            actions.push(Action::Speak(self.point_phrase(&hit.object_id)));
                        }
                    }
                }
                actions.push(Action::RenderNeeded);
                return actions;
            }
            if !self.ui.selection.is_empty() {
                self.ui.selection.clear();
                actions.push(Action::RenderNeeded);
            }
        }

        let pan_held = self.ui.space_held || modifiers.alt;
        if self.pointers.len() >= 2 {
            self.begin_pinch();
        } else if pan_held {
            self.input = InputState::Panning;
            actions.push(Action::SetCursor("grabbing".into()));
        } else if self.ui.tool == Tool::Draw {
            self.stroke = Some(StrokeCapture::new(self.ui.stroke_color.clone(), self.ui.stroke_width));
            self.input = InputState::Drawing;
        }
        actions
    }

    pub fn on_pointer_move(&mut self, pointer: PointerId, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let Some(prev) = self.pointers.move_to(pointer, screen_pt) else {
            return Vec::new();
        };
        let delta = screen_pt - prev;

        if self.pointers.len() == 2 {
            if let (Some(last), Some(spread)) = (self.pinch_spread, self.pointers.spread()) {
                self.view.zoom_by(1.0 + (spread - last) * PINCH_ZOOM_SENSITIVITY);
                // One pointer moving by `delta` moves the midpoint by half of it.
                self.view.pan_by(delta * 0.5);
                self.pinch_spread = Some(spread);
                return vec![Action::RenderNeeded];
            }
        }

        match &self.input {
            InputState::DraggingLabel { point_id, pointer: grabbed } if *grabbed == pointer => {
                let point_id = point_id.clone();
                self.drag_label(&point_id, delta)
            }
            InputState::Drawing => {
                let world = self.view.to_world(screen_pt);
                if let Some(stroke) = self.stroke.as_mut() {
                    stroke.push(world);
                }
                vec![Action::RenderNeeded]
            }
            InputState::Panning if self.pointers.len() == 1 => {
                self.view.pan_by(delta);
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_up(
        &mut self,
        pointer: PointerId,
        _screen_pt: Point,
        _button: Button,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        if !self.pointers.release(pointer) {
            return Vec::new();
        }
        let mut actions = Vec::new();

        if self.pointers.len() < 2 {
            self.pinch_spread = None;
            if self.input == InputState::PinchZooming {
                self.input = InputState::Panning;
            }
        } else if self.pinch_spread.is_some() {
            // The measured pair may have changed; restart from the current spread.
            self.pinch_spread = self.pointers.spread();
        }

        match &self.input {
            InputState::Panning if self.pointers.is_empty() => {
                self.input = InputState::Idle;
                actions.push(Action::SetCursor("default".into()));
            }
            InputState::DraggingLabel { .. } => {
                self.input = InputState::Idle;
                actions.push(Action::SetCursor("default".into()));
            }
            InputState::Drawing => self.input = InputState::Idle,
            _ => {}
        }

        if self.pointers.is_empty() {
            if let Some(stroke) = self.stroke.take().and_then(StrokeCapture::finish) {
                tracing::debug!(samples = stroke.points.len(), "stroke finalized");
                let next = self.doc.clone().unwrap_or_default().with_stroke(stroke);
                actions.extend(self.publish(next));
            }
        }
        actions
    }

    pub fn on_wheel(&mut self, _screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if self.ui.tool == Tool::Draw {
            return Vec::new();
        }
        self.view.zoom_by((-delta.dy * WHEEL_ZOOM_SENSITIVITY).exp());
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = true;
            return Vec::new();
        }
        if key.0 == "Escape" && !self.ui.selection.is_empty() {
            self.ui.selection.clear();
            return vec![Action::RenderNeeded];
        }
        Vec::new()
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = false;
        }
        Vec::new()
    }

    fn begin_pinch(&mut self) {
        self.pinch_spread = self.pointers.spread();
        self.input = InputState::PinchZooming;
    }

    /// Move a point's label by exactly `delta` screen pixels and publish the
    /// resulting document.
    fn drag_label(&mut self, point_id: &ObjectId, delta: Point) -> Vec<Action> {
        let Some(scene) = self.projected() else {
            return Vec::new();
        };
        let Some(projected) = scene.point(point_id) else {
            return Vec::new();
        };
        let Some(anchor) = projected.label else {
            return Vec::new();
        };
        let offset = anchor - projected.screen + delta;
        let Some(doc) = &self.doc else {
            return Vec::new();
        };
        let next = doc.with_label_offset(point_id, offset);
        self.publish(next)
    }

    fn point_phrase(&self, id: &str) -> String {
        let name = self
            .doc
            .as_ref()
            .and_then(|d| d.point(id))
            .and_then(|p| p.label.as_deref())
            .unwrap_or(id);
        format!("Point {name}")
    }

    // --- Queries ---

    /// Projected geometry for the current document and view.
    #[must_use]
    pub fn projected(&self) -> Option<ProjectedScene> {
        self.doc
            .as_ref()
            .map(|doc| ProjectedScene::build(doc, &self.view, self.viewport))
    }

    /// Display list for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(
            self.doc.as_ref(),
            &self.view,
            self.viewport,
            &self.ui.selection,
            self.ui.step_index,
            self.stroke.as_ref(),
        )
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.ui.selection
    }

    /// The current view transform.
    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    /// The current document, if any.
    #[must_use]
    pub fn document(&self) -> Option<&GeometryDocument> {
        self.doc.as_ref()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Delegated data inputs ---

    pub fn set_document(&mut self, doc: Option<GeometryDocument>) -> Vec<Action> {
        self.core.set_document(doc)
    }

    pub fn set_step(&mut self, index: usize) -> Vec<Action> {
        self.core.set_step(index)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
    }

    pub fn reset_view(&mut self) {
        self.core.reset_view();
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        pointer: PointerId,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        self.core.on_pointer_down(pointer, screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pointer: PointerId, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(pointer, screen_pt, modifiers)
    }

    pub fn on_pointer_up(
        &mut self,
        pointer: PointerId,
        screen_pt: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        self.core.on_pointer_up(pointer, screen_pt, button, modifiers)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_up(key, modifiers)
    }

    pub fn tick_auto_rotate(&mut self) -> Vec<Action> {
        self.core.tick_auto_rotate()
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context cannot be obtained or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Ok(());
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into().map_err(JsValue::from)?;
        render::draw(&ctx, &self.core.scene(), self.core.viewport, self.core.dpr)
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        self.core.selection()
    }

    #[must_use]
    pub fn view(&self) -> ViewTransform {
        self.core.view()
    }

    #[must_use]
    pub fn document(&self) -> Option<&GeometryDocument> {
        self.core.document()
    }
}
