//! Replay driver: feeds recorded input events through the canvas core.
//!
//! A script is a JSON array of events tagged by `type`, for example
//! `{"type": "pointer_down", "x": 120, "y": 80}`. The [`Session`] plays the
//! owner's part: it hands every replacement document straight back to the
//! canvas, narrates `Speak` phrases, and tracks the requested cursor.
//! [`replay`] wires a session to a store and the persistence worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use geocanvas::doc::GeometryDocument;
use geocanvas::engine::{Action, EngineCore};
use geocanvas::input::{Button, Key, Modifiers, PointerId, Tool, WheelDelta};
use geocanvas::view::{Point, ViewTransform, Viewport};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::HostConfig;
use crate::persistence::{PersistError, PersistStats, spawn_persistence_worker};
use crate::store::{DocumentStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

fn primary_pointer() -> PointerId {
    1
}

fn one() -> u32 {
    1
}

/// One recorded input event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        #[serde(default = "primary_pointer")]
        pointer: PointerId,
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        #[serde(default = "primary_pointer")]
        pointer: PointerId,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        #[serde(default = "primary_pointer")]
        pointer: PointerId,
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        dy: f64,
    },
    KeyDown {
        key: String,
    },
    KeyUp {
        key: String,
    },
    Tool {
        tool: Tool,
    },
    ZoomIn,
    ZoomOut,
    /// Auto-rotation timer ticks.
    Tick {
        #[serde(default = "one")]
        count: u32,
    },
    ToggleAutoRotate,
    /// Color every selected element.
    Color {
        color: String,
    },
    StrokeStyle {
        color: String,
        width: f64,
    },
    ClearStrokes,
    Step {
        index: usize,
    },
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns [`ReplayError::Script`] for malformed JSON or an unknown event type.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    Ok(serde_json::from_str(raw)?)
}

/// Read and parse a script file.
///
/// # Errors
///
/// Returns [`ReplayError::Io`] if the file can't be read, or
/// [`ReplayError::Script`] if it doesn't parse.
pub async fn load_script(path: &Path) -> Result<Vec<ScriptEvent>, ReplayError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReplayError::Io { path: path.to_path_buf(), source })?;
    parse_script(&raw)
}

/// A canvas core driven by script events, with the owner's side simulated.
pub struct Session {
    core: EngineCore,
    narration: bool,
    spoken: Vec<String>,
    cursor: String,
}

impl Session {
    /// A session with a laid-out viewport and no document.
    #[must_use]
    pub fn new(viewport: Viewport, narration: bool) -> Self {
        let mut core = EngineCore::new();
        core.set_viewport(viewport.width, viewport.height, 1.0);
        Self { core, narration, spoken: Vec::new(), cursor: "default".into() }
    }

    /// Hand the canvas a document, as the owner does on load.
    pub fn load(&mut self, doc: Option<GeometryDocument>) {
        self.core.set_document(doc);
    }

    /// Apply one event and return the replacement documents it produced, in
    /// order.
    pub fn apply(&mut self, event: &ScriptEvent) -> Vec<GeometryDocument> {
        let actions = self.dispatch(event);
        self.handle(actions)
    }

    fn dispatch(&mut self, event: &ScriptEvent) -> Vec<Action> {
        let core = &mut self.core;
        match event {
            ScriptEvent::PointerDown { pointer, x, y, button, modifiers } => {
                core.on_pointer_down(*pointer, Point::new(*x, *y), *button, *modifiers)
            }
            ScriptEvent::PointerMove { pointer, x, y, modifiers } => {
                core.on_pointer_move(*pointer, Point::new(*x, *y), *modifiers)
            }
            ScriptEvent::PointerUp { pointer, x, y, button, modifiers } => {
                core.on_pointer_up(*pointer, Point::new(*x, *y), *button, *modifiers)
            }
            ScriptEvent::Wheel { x, y, dx, dy } => {
                core.on_wheel(Point::new(*x, *y), WheelDelta { dx: *dx, dy: *dy }, Modifiers::default())
            }
            ScriptEvent::KeyDown { key } => core.on_key_down(Key(key.clone()), Modifiers::default()),
            ScriptEvent::KeyUp { key } => core.on_key_up(Key(key.clone()), Modifiers::default()),
            ScriptEvent::Tool { tool } => {
                core.set_tool(*tool);
                Vec::new()
            }
            ScriptEvent::ZoomIn => core.zoom_in(),
            ScriptEvent::ZoomOut => core.zoom_out(),
            ScriptEvent::Tick { count } => (0..*count).flat_map(|_| core.tick_auto_rotate()).collect(),
            ScriptEvent::ToggleAutoRotate => {
                let on = core.toggle_auto_rotate();
                debug!(on, "auto-rotate toggled");
                Vec::new()
            }
            ScriptEvent::Color { color } => core.set_selection_color(color),
            ScriptEvent::StrokeStyle { color, width } => {
                core.set_stroke_style(color.clone(), *width);
                Vec::new()
            }
            ScriptEvent::ClearStrokes => core.clear_strokes(),
            ScriptEvent::Step { index } => core.set_step(*index),
        }
    }

    fn handle(&mut self, actions: Vec<Action>) -> Vec<GeometryDocument> {
        let mut updates = Vec::new();
        for action in actions {
            match action {
                Action::DataUpdate(doc) => {
                    // The owner echoes every replacement back as the current document.
                    self.core.set_document(Some(doc.clone()));
                    updates.push(doc);
                }
                Action::Speak(phrase) => {
                    if self.narration {
                        info!(%phrase, "speak");
                        self.spoken.push(phrase);
                    }
                }
                Action::SetCursor(cursor) => self.cursor = cursor,
                Action::RenderNeeded => {}
            }
        }
        updates
    }

    #[must_use]
    pub fn core(&self) -> &EngineCore {
        &self.core
    }

    /// Phrases narrated so far.
    #[must_use]
    pub fn spoken(&self) -> &[String] {
        &self.spoken
    }

    /// The cursor most recently requested by the canvas.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }
}

/// Outcome of a replay run.
#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub events: usize,
    /// Replacement documents emitted by the canvas.
    pub updates: usize,
    pub spoken: Vec<String>,
    pub persist: PersistStats,
    /// View transform after the last event.
    pub view: ViewTransform,
}

/// Replay `script` against the document stored under `key`, persisting every
/// replacement document through a debounced worker.
///
/// A missing document is not an error: the canvas starts empty and a drawn
/// stroke creates a new document.
///
/// # Errors
///
/// Returns [`ReplayError::Store`] if the document can't be loaded, or
/// [`ReplayError::Persist`] if the persistence worker fails.
pub async fn replay<S: DocumentStore>(
    store: Arc<S>,
    key: &str,
    script: &[ScriptEvent],
    config: &HostConfig,
) -> Result<ReplaySummary, ReplayError> {
    let doc = store.load(key).await?;
    info!(key, found = doc.is_some(), events = script.len(), "replay started");

    let mut session = Session::new(config.viewport, config.narration);
    session.load(doc);
    let persist = spawn_persistence_worker(store, key.to_owned(), config.persist);

    let mut updates = 0;
    'events: for event in script {
        for doc in session.apply(event) {
            updates += 1;
            if !persist.enqueue(doc).await {
                warn!(key, updates, "persistence worker stopped; abandoning replay");
                break 'events;
            }
        }
    }
    let stats = persist.close().await?;

    info!(key, updates, saved = stats.saved, "replay finished");
    Ok(ReplaySummary {
        events: script.len(),
        updates,
        spoken: session.spoken().to_vec(),
        persist: stats,
        view: session.core().view(),
    })
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
