#![forbid(unsafe_code)]

//! Pointer drag tracking: maps raw mouse and touch streams to per-handle drag
//! sessions.
//!
//! [`PointerDragTracker`] is a stateful processor that turns raw [`Event`]s
//! addressed to a handle into [`DragEvent`]s. It knows nothing about values;
//! a `Move` only tells the caller *which* handle a pointer position belongs to.
//!
//! # Sessions
//!
//! - **Mouse**: a single implicit session. A left-button press on a handle
//!   claims it; moves resolve to that handle; any mouse-up releases every
//!   session (the document-level up listener is global).
//! - **Touch**: each touch-start registers `touch id → handle`. A handle that
//!   is already claimed ignores further touch-starts, and a touch id that is
//!   already mapped is never re-mapped. Moves resolve per identifier; ends and
//!   cancels release per identifier.
//!
//! # Invariants
//!
//! 1. A handle is claimed by at most one pointer at a time.
//! 2. A touch identity maps to exactly one handle.
//! 3. `Move` is only emitted for handles that are currently claimed.
//! 4. With [`DragEndPolicy::AllReleased`], `End` fires exactly once per
//!    transition of the active set from non-empty to empty.
//! 5. After [`release_all`](PointerDragTracker::release_all) no session remains.

use ahash::AHashMap;

use crate::event::{Event, MouseButton, MouseEventKind, TouchId, TouchPhase};
use crate::geometry::Point;
use crate::handle::Handle;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// When the tracker reports that dragging has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragEndPolicy {
    /// Fire `End` only when no handle remains active.
    #[default]
    AllReleased,
    /// Fire `End` whenever a release leaves at most one handle active.
    ///
    /// Can fire twice for a two-finger gesture (2 → 1, then 1 → 0).
    AtMostOneActive,
}

/// Drag tracker configuration.
#[derive(Debug, Clone, Default)]
pub struct DragConfig {
    /// Drag-end trigger condition.
    pub end_policy: DragEndPolicy,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The pointer that owns a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// The (single) mouse pointer.
    Mouse,
    /// A touch point.
    Touch(TouchId),
}

/// Drag lifecycle events produced by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// A pointer claimed a handle.
    Start { handle: Handle, pointer: PointerId },
    /// A claimed handle's pointer moved.
    Move {
        handle: Handle,
        pointer: PointerId,
        pos: Point,
    },
    /// A pointer released its handle.
    Release { handle: Handle, pointer: PointerId },
    /// Dragging finished according to the configured [`DragEndPolicy`].
    End,
}

// ---------------------------------------------------------------------------
// PointerDragTracker
// ---------------------------------------------------------------------------

/// Stateful tracker of mouse and touch drag sessions.
pub struct PointerDragTracker {
    config: DragConfig,
    mouse: Option<Handle>,
    touches: AHashMap<TouchId, Handle>,
}

impl std::fmt::Debug for PointerDragTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerDragTracker")
            .field("mouse", &self.mouse)
            .field("touches", &self.touches.len())
            .finish()
    }
}

impl Default for PointerDragTracker {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl PointerDragTracker {
    /// Create a new tracker with the given configuration.
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            mouse: None,
            touches: AHashMap::with_capacity(2),
        }
    }

    /// Process a raw event, returning any drag events produced.
    ///
    /// `target` is the handle the event was dispatched to. It only matters for
    /// presses and touch-starts; moves and releases resolve through the
    /// stored sessions.
    pub fn process(&mut self, event: &Event, target: Option<Handle>) -> Vec<DragEvent> {
        let mut out = Vec::with_capacity(2);

        match event {
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(handle) = target {
                        self.press_mouse(handle, &mut out);
                    }
                }
                MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                    if let Some(handle) = self.mouse {
                        out.push(DragEvent::Move {
                            handle,
                            pointer: PointerId::Mouse,
                            pos: mouse.pos,
                        });
                    }
                }
                MouseEventKind::Up(_) => self.release_all_into(&mut out),
                MouseEventKind::Down(_) => {}
            },
            Event::Touch(touch) => match touch.phase {
                TouchPhase::Start => {
                    if let Some(handle) = target {
                        for point in &touch.touches {
                            self.start_touch(point.id, handle, &mut out);
                        }
                    }
                }
                TouchPhase::Move => {
                    for point in &touch.touches {
                        if let Some(&handle) = self.touches.get(&point.id) {
                            out.push(DragEvent::Move {
                                handle,
                                pointer: PointerId::Touch(point.id),
                                pos: point.pos,
                            });
                        }
                    }
                }
                TouchPhase::End | TouchPhase::Cancel => {
                    for point in &touch.touches {
                        self.end_touch(point.id, &mut out);
                    }
                }
            },
            Event::Key(_) | Event::Focus(_) => {}
        }

        out
    }

    /// Whether any handle is being dragged.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mouse.is_some() || !self.touches.is_empty()
    }

    /// Whether `handle` is claimed by a pointer.
    #[must_use]
    pub fn is_active(&self, handle: Handle) -> bool {
        self.mouse == Some(handle) || self.touches.values().any(|&h| h == handle)
    }

    /// Currently active handles, in track order.
    #[must_use]
    pub fn active_handles(&self) -> Vec<Handle> {
        Handle::ALL
            .into_iter()
            .filter(|&h| self.is_active(h))
            .collect()
    }

    /// Number of currently active handles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        Handle::ALL.into_iter().filter(|&h| self.is_active(h)).count()
    }

    /// Whether default page behavior (scroll, text selection) should be
    /// suppressed for touch-moves. True while any drag is active.
    #[inline]
    #[must_use]
    pub fn suppress_default(&self) -> bool {
        self.is_dragging()
    }

    /// The handle a touch identity controls, if any.
    #[must_use]
    pub fn handle_for_touch(&self, id: TouchId) -> Option<Handle> {
        self.touches.get(&id).copied()
    }

    /// Release every session (teardown). Emits `Release` for each session
    /// and `End` if anything was active.
    pub fn release_all(&mut self) -> Vec<DragEvent> {
        let mut out = Vec::new();
        self.release_all_into(&mut out);
        out
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Internal session handlers
// ---------------------------------------------------------------------------

impl PointerDragTracker {
    fn press_mouse(&mut self, handle: Handle, out: &mut Vec<DragEvent>) {
        if self.touches.values().any(|&h| h == handle) {
            return;
        }
        if self.mouse == Some(handle) {
            return;
        }
        if let Some(previous) = self.mouse.take() {
            // A stray press without a matching up: the old session is stale.
            // The new session starts immediately, so no End.
            out.push(DragEvent::Release {
                handle: previous,
                pointer: PointerId::Mouse,
            });
        }
        self.mouse = Some(handle);
        #[cfg(feature = "tracing")]
        tracing::debug!(handle = handle.as_str(), pointer = "mouse", "drag session start");
        out.push(DragEvent::Start {
            handle,
            pointer: PointerId::Mouse,
        });
    }

    fn start_touch(&mut self, id: TouchId, handle: Handle, out: &mut Vec<DragEvent>) {
        if self.touches.contains_key(&id) || self.is_active(handle) {
            return;
        }
        self.touches.insert(id, handle);
        #[cfg(feature = "tracing")]
        tracing::debug!(handle = handle.as_str(), touch = id.0, "drag session start");
        out.push(DragEvent::Start {
            handle,
            pointer: PointerId::Touch(id),
        });
    }

    fn end_touch(&mut self, id: TouchId, out: &mut Vec<DragEvent>) {
        let before = self.active_count();
        let Some(handle) = self.touches.remove(&id) else {
            return;
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(handle = handle.as_str(), touch = id.0, "drag session release");
        out.push(DragEvent::Release {
            handle,
            pointer: PointerId::Touch(id),
        });
        self.emit_end_if_due(before, out);
    }

    fn release_all_into(&mut self, out: &mut Vec<DragEvent>) {
        let before = self.active_count();
        if let Some(handle) = self.mouse.take() {
            out.push(DragEvent::Release {
                handle,
                pointer: PointerId::Mouse,
            });
        }
        let mut touches: Vec<(TouchId, Handle)> = self.touches.drain().collect();
        touches.sort_unstable_by_key(|(id, _)| *id);
        for (id, handle) in touches {
            out.push(DragEvent::Release {
                handle,
                pointer: PointerId::Touch(id),
            });
        }
        self.emit_end_if_due(before, out);
    }

    fn emit_end_if_due(&self, before: usize, out: &mut Vec<DragEvent>) {
        let after = self.active_count();
        if after >= before {
            return;
        }
        let due = match self.config.end_policy {
            DragEndPolicy::AllReleased => after == 0,
            DragEndPolicy::AtMostOneActive => after <= 1,
        };
        if due {
            #[cfg(feature = "tracing")]
            tracing::debug!(remaining = after, "drag end");
            out.push(DragEvent::End);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
