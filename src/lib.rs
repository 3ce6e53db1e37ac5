//! Native host for the geometry canvas.
//!
//! Stands in for the tutoring app around the canvas: it owns the document
//! store, persists the canvas's replacement documents through a debounced
//! worker, drives the auto-rotation timer, and replays recorded input.
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Validated host settings and environment tuning |
//! | [`store`] | Whole-document storage (`FileStore`, `MemoryStore`) |
//! | [`persistence`] | Debounced background saves |
//! | [`session`] | Script events and the replay driver |
//! | [`inspect`] | JSON snapshot of the projected figure |

pub mod config;
pub mod inspect;
pub mod persistence;
pub mod session;
pub mod store;
