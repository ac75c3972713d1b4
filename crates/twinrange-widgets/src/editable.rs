#![forbid(unsafe_code)]

//! Free-text editing of a handle's label.
//!
//! The edit buffer is decoupled from the committed value: keystrokes only
//! touch the buffer, and nothing reaches the state machine until the edit is
//! committed with Enter or blur. Each keystroke is checked against a
//! permissive numeric pattern (optional leading minus, digits, at most one
//! decimal point); anything else is dropped and the buffer stays as it was.

use std::sync::LazyLock;

use regex::Regex;
use twinrange_core::Handle;
use twinrange_core::event::{KeyCode, KeyEvent};

use crate::value_space::ValueSpace;

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d*\.?\d*$").expect("numeric edit regex"));

/// An in-progress label edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub handle: Handle,
    pub raw_text: String,
}

/// Result of feeding input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Not editing, or the key has no meaning in an edit.
    Ignored,
    /// The buffer changed.
    Updated,
    /// The keystroke failed validation; the buffer is unchanged.
    Rejected,
    /// The edit ended with a parsed value for `handle`. Not yet snapped.
    Commit { handle: Handle, value: f64 },
    /// The edit ended without a usable value; display reverts.
    Reverted { handle: Handle },
    /// The edit was cancelled.
    Cancelled { handle: Handle },
}

/// Per-handle text edit controller.
#[derive(Debug, Clone, Default)]
pub struct EditableValueController {
    enabled: bool,
    state: Option<EditState>,
}

impl EditableValueController {
    /// Create a controller.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: None,
        }
    }

    /// Whether editing is allowed at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable editing. Disabling drops any active edit.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.state = None;
        }
    }

    /// The active edit, if any.
    #[must_use]
    pub fn state(&self) -> Option<&EditState> {
        self.state.as_ref()
    }

    /// Whether `handle` is being edited.
    #[must_use]
    pub fn is_editing(&self, handle: Handle) -> bool {
        self.state.as_ref().is_some_and(|s| s.handle == handle)
    }

    /// The edit buffer for `handle`, if it is being edited.
    #[must_use]
    pub fn text(&self, handle: Handle) -> Option<&str> {
        self.state
            .as_ref()
            .filter(|s| s.handle == handle)
            .map(|s| s.raw_text.as_str())
    }

    /// Enter edit mode for `handle`, seeding the buffer with the raw value.
    ///
    /// Refused when editing is disabled or the domain is a fixed-value set.
    /// Any edit already open on the other handle is replaced.
    pub fn begin(&mut self, handle: Handle, current: f64, space: &ValueSpace) -> bool {
        if !self.enabled || space.domain().is_discrete() {
            return false;
        }
        if self.is_editing(handle) {
            return true;
        }
        self.state = Some(EditState {
            handle,
            raw_text: current.to_string(),
        });
        true
    }

    /// Append a character if the result still looks numeric.
    pub fn insert(&mut self, c: char) -> EditOutcome {
        let Some(state) = self.state.as_mut() else {
            return EditOutcome::Ignored;
        };
        let mut candidate = state.raw_text.clone();
        candidate.push(c);
        if NUMERIC.is_match(&candidate) {
            state.raw_text = candidate;
            EditOutcome::Updated
        } else {
            EditOutcome::Rejected
        }
    }

    /// Delete the last character.
    pub fn backspace(&mut self) -> EditOutcome {
        let Some(state) = self.state.as_mut() else {
            return EditOutcome::Ignored;
        };
        if state.raw_text.pop().is_some() {
            EditOutcome::Updated
        } else {
            EditOutcome::Rejected
        }
    }

    /// Replace the whole buffer, e.g. from a paste. Invalid text is rejected.
    pub fn set_text(&mut self, text: &str) -> EditOutcome {
        let Some(state) = self.state.as_mut() else {
            return EditOutcome::Ignored;
        };
        if NUMERIC.is_match(text) {
            state.raw_text = text.to_owned();
            EditOutcome::Updated
        } else {
            EditOutcome::Rejected
        }
    }

    /// Finish the edit (Enter or blur).
    pub fn commit(&mut self, space: &ValueSpace) -> EditOutcome {
        let Some(state) = self.state.take() else {
            return EditOutcome::Ignored;
        };
        match space.parse(&state.raw_text) {
            Some(value) => EditOutcome::Commit {
                handle: state.handle,
                value,
            },
            None => {
                tracing::debug!(
                    handle = state.handle.as_str(),
                    text = %state.raw_text,
                    "edit reverted: unparseable"
                );
                EditOutcome::Reverted {
                    handle: state.handle,
                }
            }
        }
    }

    /// Abandon the edit (Escape, or a drag starting).
    pub fn cancel(&mut self) -> EditOutcome {
        match self.state.take() {
            Some(state) => EditOutcome::Cancelled {
                handle: state.handle,
            },
            None => EditOutcome::Ignored,
        }
    }

    /// Route a key press to the active edit.
    pub fn handle_key(&mut self, key: &KeyEvent, space: &ValueSpace) -> EditOutcome {
        if self.state.is_none() || !key.is_actionable() {
            return EditOutcome::Ignored;
        }
        match key.code {
            KeyCode::Enter => self.commit(space),
            KeyCode::Escape => self.cancel(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => self.insert(c),
            _ => EditOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RangeDomain;

    fn space() -> ValueSpace {
        ValueSpace::new(RangeDomain::continuous(0.0, 100.0, 5.0))
    }

    fn type_str(ctl: &mut EditableValueController, text: &str) {
        for c in text.chars() {
            ctl.insert(c);
        }
    }

    #[test]
    fn begin_seeds_raw_value() {
        let mut ctl = EditableValueController::new(true);
        assert!(ctl.begin(Handle::Min, 25.0, &space()));
        assert_eq!(ctl.text(Handle::Min), Some("25"));
        assert_eq!(ctl.text(Handle::Max), None);
        assert!(ctl.is_editing(Handle::Min));
    }

    #[test]
    fn begin_refused_when_disabled_or_fixed() {
        let mut ctl = EditableValueController::new(false);
        assert!(!ctl.begin(Handle::Min, 1.0, &space()));

        let fixed = ValueSpace::new(RangeDomain::discrete(vec![0.0, 1.0]));
        let mut ctl = EditableValueController::new(true);
        assert!(!ctl.begin(Handle::Min, 1.0, &fixed));
        assert!(ctl.state().is_none());
    }

    #[test]
    fn invalid_keystrokes_are_dropped() {
        let mut ctl = EditableValueController::new(true);
        ctl.begin(Handle::Max, 0.0, &space());
        ctl.backspace();
        assert_eq!(ctl.insert('-'), EditOutcome::Updated);
        assert_eq!(ctl.insert('-'), EditOutcome::Rejected);
        assert_eq!(ctl.insert('1'), EditOutcome::Updated);
        assert_eq!(ctl.insert('.'), EditOutcome::Updated);
        assert_eq!(ctl.insert('.'), EditOutcome::Rejected);
        assert_eq!(ctl.insert('x'), EditOutcome::Rejected);
        assert_eq!(ctl.insert('5'), EditOutcome::Updated);
        assert_eq!(ctl.text(Handle::Max), Some("-1.5"));
    }

    #[test]
    fn commit_parses_buffer() {
        let mut ctl = EditableValueController::new(true);
        ctl.begin(Handle::Min, 0.0, &space());
        ctl.backspace();
        type_str(&mut ctl, "23");
        assert_eq!(
            ctl.commit(&space()),
            EditOutcome::Commit {
                handle: Handle::Min,
                value: 23.0
            }
        );
        assert!(ctl.state().is_none());
    }

    #[test]
    fn backspace_empties_then_rejects() {
        let mut ctl = EditableValueController::new(true);
        assert_eq!(ctl.backspace(), EditOutcome::Ignored);
        ctl.begin(Handle::Max, 12.0, &space());
        assert_eq!(ctl.backspace(), EditOutcome::Updated);
        assert_eq!(ctl.text(Handle::Max), Some("1"));
        assert_eq!(ctl.backspace(), EditOutcome::Updated);
        assert_eq!(ctl.backspace(), EditOutcome::Rejected);
        assert_eq!(ctl.text(Handle::Max), Some(""));
    }

    #[test]
    fn bare_fragments_revert() {
        for text in ["", "-", "."] {
            let mut ctl = EditableValueController::new(true);
            ctl.begin(Handle::Min, 7.0, &space());
            ctl.backspace();
            type_str(&mut ctl, text);
            assert_eq!(
                ctl.commit(&space()),
                EditOutcome::Reverted { handle: Handle::Min },
                "{text:?}"
            );
        }
    }

    #[test]
    fn keys_drive_the_edit() {
        let sp = space();
        let mut ctl = EditableValueController::new(true);
        ctl.begin(Handle::Min, 4.0, &sp);
        assert_eq!(
            ctl.handle_key(&KeyEvent::new(KeyCode::Char('2')), &sp),
            EditOutcome::Updated
        );
        assert_eq!(
            ctl.handle_key(&KeyEvent::new(KeyCode::Escape), &sp),
            EditOutcome::Cancelled { handle: Handle::Min }
        );
        assert_eq!(
            ctl.handle_key(&KeyEvent::new(KeyCode::Enter), &sp),
            EditOutcome::Ignored
        );
    }

    #[test]
    fn set_text_validates() {
        let mut ctl = EditableValueController::new(true);
        ctl.begin(Handle::Min, 4.0, &space());
        assert_eq!(ctl.set_text("12.5"), EditOutcome::Updated);
        assert_eq!(ctl.set_text("1e5"), EditOutcome::Rejected);
        assert_eq!(ctl.text(Handle::Min), Some("12.5"));
    }

    #[test]
    fn disabling_drops_edit() {
        let mut ctl = EditableValueController::new(true);
        ctl.begin(Handle::Min, 4.0, &space());
        ctl.set_enabled(false);
        assert!(ctl.state().is_none());
        assert_eq!(ctl.cancel(), EditOutcome::Ignored);
    }
}
