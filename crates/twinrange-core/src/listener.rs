#![forbid(unsafe_code)]

//! Scoped acquisition of document-level listeners.
//!
//! While a handle is being dragged the host must route pointer moves and
//! releases from anywhere on the page to the widget. [`ListenerScope`] owns
//! that subscription: it attaches on the first active drag, detaches as soon
//! as the active set empties, and detaches on drop so a widget torn down
//! mid-drag never leaks a listener.

/// Host hook for document-wide move/up listeners.
pub trait DocumentListeners {
    /// Start routing document-level pointer moves and releases to the widget.
    fn attach(&mut self);
    /// Stop routing them.
    fn detach(&mut self);
}

/// Listeners for hosts that deliver every event to the widget anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListeners;

impl DocumentListeners for NoopListeners {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

/// RAII guard keyed on "any handle active".
#[derive(Debug)]
pub struct ListenerScope<L: DocumentListeners> {
    listeners: L,
    attached: bool,
}

impl<L: DocumentListeners> ListenerScope<L> {
    /// Wrap a listener hook. Nothing is attached yet.
    pub fn new(listeners: L) -> Self {
        Self {
            listeners,
            attached: false,
        }
    }

    /// Bring the attachment in line with the drag state.
    ///
    /// Returns `true` if an attach or detach happened.
    pub fn sync(&mut self, any_active: bool) -> bool {
        match (any_active, self.attached) {
            (true, false) => {
                self.listeners.attach();
                self.attached = true;
                true
            }
            (false, true) => {
                self.listeners.detach();
                self.attached = false;
                true
            }
            _ => false,
        }
    }

    /// Whether listeners are currently attached.
    #[inline]
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Access the wrapped hook.
    pub fn listeners(&self) -> &L {
        &self.listeners
    }
}

impl<L: DocumentListeners> Drop for ListenerScope<L> {
    fn drop(&mut self) {
        if self.attached {
            self.listeners.detach();
            self.attached = false;
        }
    }
}
