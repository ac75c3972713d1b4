#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the event types a range widget consumes: keyboard,
//! mouse, touch, and focus. All events derive `Clone` and `PartialEq` for use
//! in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are `f32` pixels in the host's coordinate space.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish it.
//! - `Modifiers` use bitflags for easy combination.
//! - Touch events carry only the *changed* touches, each with a stable
//!   identifier for the lifetime of that finger on the surface.

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A mouse event.
    Mouse(MouseEvent),

    /// A touch event (start, move, end, or cancel for one or more touches).
    Touch(TouchEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Whether this is a backwards focus-traversal key (Shift+Tab or BackTab).
    #[must_use]
    pub const fn is_back_tab(&self) -> bool {
        matches!(self.code, KeyCode::BackTab)
            || (matches!(self.code, KeyCode::Tab) && self.shift())
    }

    /// Whether this is a forwards focus-traversal key (Tab without Shift).
    #[must_use]
    pub const fn is_forward_tab(&self) -> bool {
        matches!(self.code, KeyCode::Tab) && !self.shift()
    }

    /// Whether the event should be acted upon (press or auto-repeat).
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// The type of mouse event.
    pub kind: MouseEventKind,

    /// Pointer position in pixels.
    pub pos: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a mouse event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Mouse button pressed down.
    Down(MouseButton),

    /// Mouse button released.
    Up(MouseButton),

    /// Mouse dragged while button held.
    Drag(MouseButton),

    /// Mouse moved (no button pressed).
    Moved,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Identifier of a single touch point, stable while the finger stays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

/// One touch point inside a [`TouchEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Touch identity.
    pub id: TouchId,
    /// Touch position in pixels.
    pub pos: Point,
}

impl TouchPoint {
    /// Create a touch point.
    #[must_use]
    pub const fn new(id: u64, x: f32, y: f32) -> Self {
        Self {
            id: TouchId(id),
            pos: Point::new(x, y),
        }
    }
}

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// One or more fingers touched down.
    Start,
    /// One or more fingers moved.
    Move,
    /// One or more fingers lifted.
    End,
    /// The host aborted the touches (e.g. a system gesture took over).
    Cancel,
}

/// A touch event carrying the touches that changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Event phase.
    pub phase: TouchPhase,
    /// Changed touches.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: impl Into<Vec<TouchPoint>>) -> Self {
        Self {
            phase,
            touches: touches.into(),
        }
    }

    /// Convenience constructor for a single-touch event.
    #[must_use]
    pub fn single(phase: TouchPhase, point: TouchPoint) -> Self {
        Self::new(phase, vec![point])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('7'));
        assert!(event.is_char('7'));
        assert!(!event.is_char('x'));
    }

    #[test]
    fn key_event_combined_modifiers() {
        let event =
            KeyEvent::new(KeyCode::Char('s')).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(event.ctrl());
        assert!(event.shift());
        assert!(!event.alt());
    }

    #[test]
    fn tab_direction_detection() {
        let tab = KeyEvent::new(KeyCode::Tab);
        assert!(tab.is_forward_tab());
        assert!(!tab.is_back_tab());

        let shift_tab = tab.with_modifiers(Modifiers::SHIFT);
        assert!(shift_tab.is_back_tab());
        assert!(!shift_tab.is_forward_tab());

        let back_tab = KeyEvent::new(KeyCode::BackTab);
        assert!(back_tab.is_back_tab());
    }

    #[test]
    fn release_is_not_actionable() {
        let press = KeyEvent::new(KeyCode::Home);
        assert!(press.is_actionable());
        assert!(press.with_kind(KeyEventKind::Repeat).is_actionable());
        assert!(!press.with_kind(KeyEventKind::Release).is_actionable());
    }

    #[test]
    fn mouse_event_position() {
        let event = MouseEvent::new(MouseEventKind::Down(MouseButton::Left), 10.5, 20.0);
        assert_eq!(event.pos, Point::new(10.5, 20.0));
        assert_eq!(event.modifiers, Modifiers::NONE);
    }

    #[test]
    fn touch_event_single() {
        let event = TouchEvent::single(TouchPhase::Start, TouchPoint::new(3, 1.0, 2.0));
        assert_eq!(event.touches.len(), 1);
        assert_eq!(event.touches[0].id, TouchId(3));
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn event_is_clone_and_eq() {
        let event = Event::Touch(TouchEvent::single(
            TouchPhase::Move,
            TouchPoint::new(1, 0.0, 0.0),
        ));
        let cloned = event.clone();
        assert_eq!(event, cloned);
    }
}
