// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: input events, geometry, handle identity, and drag tracking.
//!
//! # Role in twinrange
//! `twinrange-core` is the input layer. It owns the canonical event types the
//! widget consumes, the pixel → percent axis mapping, and the pointer drag
//! tracker that turns mouse and multi-touch streams into per-handle sessions.
//!
//! # Primary responsibilities
//! - **Event**: keys, mouse, touch (with per-touch identifiers), focus.
//! - **Geometry**: points, rects, orientation-aware percent mapping.
//! - **PointerDragTracker**: one session per handle, multi-touch safe.
//! - **KeyMap**: key → action tables with slider defaults.
//! - **ListenerScope**: RAII guard for document-level listeners.
//!
//! # How it fits in the system
//! `twinrange-widgets` consumes these types and owns all numeric policy, so
//! nothing in this crate knows about values, steps, or ordering.

pub mod drag;
pub mod event;
pub mod geometry;
pub mod handle;
pub mod keybinding;
pub mod listener;
pub mod logging;

pub use handle::Handle;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
