//! Interactive geometry canvas for the tutoring app.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and natively
//! for tests and the replay host. It owns the interactive side of a geometry
//! diagram: projecting model-space points to the screen, placing labels,
//! hit-testing, interpreting pointer gestures (pan, pinch, label drag,
//! freehand drawing), auto-rotation, and building the frame's display list.
//! The document itself belongs to the host; every edit comes back out as a
//! whole replacement document in an [`engine::Action::DataUpdate`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Geometry document types and replacement builders |
//! | [`projection`] | 3D → screen projection and per-frame projected geometry |
//! | [`label`] | Centroids and smart label placement |
//! | [`view`] | Scale/rotation/pan and the 2D drawing-plane mapping |
//! | [`hit`] | Hit-testing against labels, points, and edges |
//! | [`selection`] | Kind-tagged selection set |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`stroke`] | Freehand stroke capture |
//! | [`rotate`] | Auto-rotation timer state |
//! | [`scene`] | Display-list construction |
//! | [`render`] | Painting a display list to `Canvas2D` |
//! | [`consts`] | Shared numeric constants (scale limits, hit radii, etc.) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod label;
pub mod projection;
pub mod render;
pub mod rotate;
pub mod scene;
pub mod selection;
pub mod stroke;
pub mod view;
