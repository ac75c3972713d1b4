#![forbid(unsafe_code)]

//! Tab cycling across an ordered set of focusable elements, plus key to
//! action dispatch for the focused one.
//!
//! Tab moves forward unless focus is already on the last element, Shift+Tab
//! moves back unless it is on the first. At either boundary the key passes
//! through so the host's own traversal can move focus out of the widget.

use twinrange_core::event::KeyEvent;
use twinrange_core::keybinding::KeyMap;

/// What the navigator did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome<A> {
    /// Focus moved; the host must suppress its default Tab handling.
    Focus { from: usize, to: usize },
    /// A bound action for the element at `index`.
    Invoke { action: A, index: usize },
    /// Not handled; let the host process it.
    PassThrough,
}

impl<A> NavOutcome<A> {
    /// Whether the key was consumed.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// Ordered focus ring with a key map.
#[derive(Debug, Clone)]
pub struct KeyboardFocusNavigator<T, A> {
    elements: Vec<T>,
    focused: Option<usize>,
    keymap: KeyMap<A>,
    disabled: bool,
    tab_navigation: bool,
}

impl<T: PartialEq, A: Copy> KeyboardFocusNavigator<T, A> {
    /// Create a navigator over `elements` in traversal order.
    #[must_use]
    pub fn new(elements: Vec<T>, keymap: KeyMap<A>) -> Self {
        Self {
            elements,
            focused: None,
            keymap,
            disabled: false,
            tab_navigation: true,
        }
    }

    /// Enable or bypass the whole mechanism.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.focused = None;
        }
    }

    /// Enable or disable Tab/Shift+Tab handling.
    pub fn set_tab_navigation(&mut self, enabled: bool) {
        self.tab_navigation = enabled;
    }

    /// The key map.
    #[must_use]
    pub fn keymap(&self) -> &KeyMap<A> {
        &self.keymap
    }

    /// Mutable key map.
    pub fn keymap_mut(&mut self) -> &mut KeyMap<A> {
        &mut self.keymap
    }

    /// Index of the focused element.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// The focused element.
    #[must_use]
    pub fn focused(&self) -> Option<&T> {
        self.focused.and_then(|i| self.elements.get(i))
    }

    /// Focus `element`. Returns `false` if it is not in the ring.
    pub fn focus(&mut self, element: &T) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(index) => {
                self.focused = Some(index);
                true
            }
            None => false,
        }
    }

    /// Focus by index. Out-of-range indices are ignored.
    pub fn focus_index(&mut self, index: usize) -> bool {
        if index < self.elements.len() {
            self.focused = Some(index);
            true
        } else {
            false
        }
    }

    /// Clear focus (widget lost focus).
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: &KeyEvent) -> NavOutcome<A> {
        if self.disabled || !key.is_actionable() {
            return NavOutcome::PassThrough;
        }
        let Some(from) = self.focused else {
            return NavOutcome::PassThrough;
        };

        if key.is_back_tab() || key.is_forward_tab() {
            if !self.tab_navigation {
                return NavOutcome::PassThrough;
            }
            let to = if key.is_back_tab() {
                from.checked_sub(1)
            } else {
                Some(from + 1).filter(|&i| i < self.elements.len())
            };
            return match to {
                Some(to) => {
                    self.focused = Some(to);
                    NavOutcome::Focus { from, to }
                }
                None => NavOutcome::PassThrough,
            };
        }

        match self.keymap.resolve(key) {
            Some(action) => NavOutcome::Invoke {
                action,
                index: from,
            },
            None => NavOutcome::PassThrough,
        }
    }
}
