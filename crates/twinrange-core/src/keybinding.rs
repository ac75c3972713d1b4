#![forbid(unsafe_code)]

//! Key binding tables and slider actions.
//!
//! A [`KeyMap`] resolves a [`KeyEvent`] to a caller-defined action. Lookups
//! match on key code and the Ctrl/Alt/Super modifiers; Shift is ignored for
//! non-character keys so that Shift+Home still reaches the Home binding.
//!
//! # Example
//!
//! ```
//! use twinrange_core::event::{KeyCode, KeyEvent};
//! use twinrange_core::keybinding::{Action, KeyMap};
//!
//! let map = KeyMap::slider_defaults();
//! assert_eq!(map.resolve(&KeyEvent::new(KeyCode::Home)), Some(Action::JumpToStart));
//! assert_eq!(map.resolve(&KeyEvent::new(KeyCode::Char('q'))), None);
//! ```

use ahash::AHashMap;

use crate::event::{KeyCode, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Discrete slider actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the focused handle to the domain minimum.
    JumpToStart,
    /// Move the focused handle to the domain maximum.
    JumpToEnd,
    /// Move the focused handle one adjacent value up.
    Increase,
    /// Move the focused handle one adjacent value down.
    Decrease,
}

// ---------------------------------------------------------------------------
// Bindings
// ---------------------------------------------------------------------------

/// A key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyBinding {
    /// Binding with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Binding with explicit modifiers.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Normalized lookup key for an incoming event.
    fn from_event(event: &KeyEvent) -> Self {
        let significant = if matches!(event.code, KeyCode::Char(_)) {
            event.modifiers
        } else {
            event.modifiers.difference(Modifiers::SHIFT)
        };
        Self::new(event.code, significant)
    }
}

/// Map from key bindings to actions.
#[derive(Debug, Clone)]
pub struct KeyMap<A> {
    bindings: AHashMap<KeyBinding, A>,
}

impl<A> Default for KeyMap<A> {
    fn default() -> Self {
        Self {
            bindings: AHashMap::new(),
        }
    }
}

impl<A: Copy> KeyMap<A> {
    /// Create an empty key map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key (builder).
    #[must_use]
    pub fn with(mut self, binding: KeyBinding, action: A) -> Self {
        self.bind(binding, action);
        self
    }

    /// Bind a key, replacing any previous binding. Returns the old action.
    pub fn bind(&mut self, binding: KeyBinding, action: A) -> Option<A> {
        self.bindings.insert(binding, action)
    }

    /// Remove a binding.
    pub fn unbind(&mut self, binding: KeyBinding) -> Option<A> {
        self.bindings.remove(&binding)
    }

    /// Resolve an event to its bound action.
    #[must_use]
    pub fn resolve(&self, event: &KeyEvent) -> Option<A> {
        self.bindings.get(&KeyBinding::from_event(event)).copied()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the map has no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl KeyMap<Action> {
    /// Home/End plus the four arrows.
    #[must_use]
    pub fn slider_defaults() -> Self {
        Self::new()
            .with(KeyBinding::plain(KeyCode::Home), Action::JumpToStart)
            .with(KeyBinding::plain(KeyCode::End), Action::JumpToEnd)
            .with(KeyBinding::plain(KeyCode::Up), Action::Increase)
            .with(KeyBinding::plain(KeyCode::Right), Action::Increase)
            .with(KeyBinding::plain(KeyCode::Down), Action::Decrease)
            .with(KeyBinding::plain(KeyCode::Left), Action::Decrease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_home_end_and_arrows() {
        let map = KeyMap::slider_defaults();
        assert_eq!(map.len(), 6);
        let cases = [
            (KeyCode::Home, Action::JumpToStart),
            (KeyCode::End, Action::JumpToEnd),
            (KeyCode::Up, Action::Increase),
            (KeyCode::Right, Action::Increase),
            (KeyCode::Down, Action::Decrease),
            (KeyCode::Left, Action::Decrease),
        ];
        for (code, action) in cases {
            assert_eq!(map.resolve(&KeyEvent::new(code)), Some(action), "{code:?}");
        }
    }

    #[test]
    fn shift_is_ignored_for_named_keys() {
        let map = KeyMap::slider_defaults();
        let shift_home = KeyEvent::new(KeyCode::Home).with_modifiers(Modifiers::SHIFT);
        assert_eq!(map.resolve(&shift_home), Some(Action::JumpToStart));
    }

    #[test]
    fn ctrl_changes_the_binding() {
        let map = KeyMap::slider_defaults();
        let ctrl_home = KeyEvent::new(KeyCode::Home).with_modifiers(Modifiers::CTRL);
        assert_eq!(map.resolve(&ctrl_home), None);
    }

    #[test]
    fn shift_is_significant_for_chars() {
        let map = KeyMap::new().with(KeyBinding::plain(KeyCode::Char('k')), Action::Increase);
        assert_eq!(map.resolve(&KeyEvent::new(KeyCode::Char('k'))), Some(Action::Increase));
        let shifted = KeyEvent::new(KeyCode::Char('k')).with_modifiers(Modifiers::SHIFT);
        assert_eq!(map.resolve(&shifted), None);
    }

    #[test]
    fn bind_and_unbind() {
        let mut map: KeyMap<Action> = KeyMap::new();
        assert!(map.is_empty());
        let pgup = KeyBinding::plain(KeyCode::PageUp);
        assert_eq!(map.bind(pgup, Action::JumpToEnd), None);
        assert_eq!(map.bind(pgup, Action::Increase), Some(Action::JumpToEnd));
        assert_eq!(map.unbind(pgup), Some(Action::Increase));
        assert!(map.is_empty());
    }
}
