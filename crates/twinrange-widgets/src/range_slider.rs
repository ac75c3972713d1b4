#![forbid(unsafe_code)]

//! The dual-handle range slider.
//!
//! [`RangeSlider`] wires the pieces together: raw events go to the
//! [`PointerDragTracker`], the editable labels or the focus navigator; pixel
//! positions become percentages through the [`TrackGeometry`]; values are
//! snapped by the [`ValueSpace`] and ordered by the [`RangeStateMachine`].
//! Every change leaves through a single commit path that logs a
//! `range.commit` span and calls the `on_change` callback.
//!
//! # Example
//!
//! ```
//! use twinrange_core::Handle;
//! use twinrange_core::event::{Event, KeyCode, KeyEvent};
//! use twinrange_widgets::{HandlePair, RangeDomain, RangeSlider, SliderOptions, Target};
//!
//! let mut slider = RangeSlider::new(
//!     RangeDomain::continuous(0.0, 100.0, 1.0),
//!     HandlePair::new(50.0, 100.0),
//!     SliderOptions::default(),
//! );
//! slider.handle_event(&Event::Focus(true), Target::Handle(Handle::Min));
//! let result = slider.handle_event(&Event::Key(KeyEvent::new(KeyCode::Home)), Target::Handle(Handle::Min));
//! assert_eq!(result.changed, Some(HandlePair::new(0.0, 100.0)));
//! ```

use std::fmt;

use twinrange_core::Handle;
use twinrange_core::drag::{DragConfig, DragEvent, PointerDragTracker};
use twinrange_core::event::{Event, KeyEvent, MouseButton, MouseEventKind, TouchPhase};
use twinrange_core::geometry::Point;
use twinrange_core::keybinding::{Action, KeyMap};
use twinrange_core::listener::{DocumentListeners, ListenerScope, NoopListeners};

use crate::domain::RangeDomain;
use crate::editable::{EditOutcome, EditableValueController};
use crate::error::{ConfigError, Diagnostics};
use crate::focus::{KeyboardFocusNavigator, NavOutcome};
use crate::options::SliderOptions;
use crate::range_state::{Commit, CommitSource, DragState, HandlePair, RangeStateMachine};
use crate::track::{PercentagePair, TrackGeometry};
use crate::value_space::{Direction, Formatter, ValueSpace};

/// Where an event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// One of the handles.
    Handle(Handle),
    /// The bare track.
    Track,
    /// A handle's value label.
    Label(Handle),
    /// Document-level listeners (moves and releases during a drag).
    Document,
}

/// What the slider did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventResult {
    /// The slider handled the event.
    pub consumed: bool,
    /// The host should suppress its default behavior (scroll, selection,
    /// focus traversal).
    pub prevent_default: bool,
    /// The committed pair, if the event changed it.
    pub changed: Option<HandlePair>,
    /// Dragging finished during this event.
    pub drag_ended: bool,
}

impl EventResult {
    fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }
}

type ChangeCallback = Box<dyn FnMut(HandlePair)>;
type DragEndCallback = Box<dyn FnMut()>;

/// Dual-handle range slider.
pub struct RangeSlider<L: DocumentListeners = NoopListeners> {
    machine: RangeStateMachine,
    tracker: PointerDragTracker,
    editor: EditableValueController,
    nav: KeyboardFocusNavigator<Handle, Action>,
    listeners: ListenerScope<L>,
    track: TrackGeometry,
    options: SliderOptions,
    diagnostics: Diagnostics,
    on_change: Option<ChangeCallback>,
    on_drag_end: Option<DragEndCallback>,
}

impl<L: DocumentListeners + fmt::Debug> fmt::Debug for RangeSlider<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSlider")
            .field("machine", &self.machine)
            .field("tracker", &self.tracker)
            .field("editor", &self.editor)
            .field("listeners", &self.listeners)
            .field("options", &self.options)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

impl RangeSlider<NoopListeners> {
    /// Create a slider for hosts that deliver every event to it directly.
    #[must_use]
    pub fn new(domain: RangeDomain, initial: HandlePair, options: SliderOptions) -> Self {
        Self::with_listeners(domain, initial, options, NoopListeners)
    }
}

impl<L: DocumentListeners> RangeSlider<L> {
    /// Create a slider that attaches `listeners` while dragging.
    ///
    /// Configuration problems never fail construction; they are collected in
    /// [`diagnostics`](Self::diagnostics) and logged.
    pub fn with_listeners(
        domain: RangeDomain,
        initial: HandlePair,
        options: SliderOptions,
        listeners: L,
    ) -> Self {
        let mut diagnostics = Diagnostics::new();
        let machine = build_machine(domain, initial, &options, &mut diagnostics);
        let mut nav = KeyboardFocusNavigator::new(Handle::ALL.to_vec(), KeyMap::slider_defaults());
        nav.set_disabled(options.disabled);
        nav.set_tab_navigation(options.tab_navigation);
        Self {
            machine,
            tracker: PointerDragTracker::new(DragConfig {
                end_policy: options.drag_end,
            }),
            editor: EditableValueController::new(options.editable),
            nav,
            listeners: ListenerScope::new(listeners),
            track: TrackGeometry {
                orientation: options.orientation,
                ..TrackGeometry::default()
            },
            options,
            diagnostics,
            on_change: None,
            on_drag_end: None,
        }
    }

    /// Replace domain, values and options. All drag and edit state resets.
    pub fn configure(&mut self, domain: RangeDomain, initial: HandlePair, options: SliderOptions) {
        self.teardown();
        let mut diagnostics = Diagnostics::new();
        self.machine = build_machine(domain, initial, &options, &mut diagnostics);
        self.tracker = PointerDragTracker::new(DragConfig {
            end_policy: options.drag_end,
        });
        self.editor = EditableValueController::new(options.editable);
        self.nav.blur();
        self.nav.set_disabled(options.disabled);
        self.nav.set_tab_navigation(options.tab_navigation);
        self.track.orientation = options.orientation;
        self.options = options;
        self.diagnostics = diagnostics;
    }

    /// Callback for every committed change.
    pub fn on_change(&mut self, callback: impl FnMut(HandlePair) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Callback for the end of dragging.
    pub fn on_drag_end(&mut self, callback: impl FnMut() + 'static) {
        self.on_drag_end = Some(Box::new(callback));
    }

    /// Install or clear a display formatter.
    pub fn set_formatter(&mut self, formatter: Option<Formatter>) {
        self.machine.space_mut().set_formatter(formatter);
    }

    /// Update the track's screen bounds (after layout).
    pub fn set_track(&mut self, track: TrackGeometry) {
        self.track = track;
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// The committed pair.
    #[must_use]
    pub fn value(&self) -> HandlePair {
        self.machine.value()
    }

    /// Replace the pair from outside (controlled mode). Does not notify.
    pub fn set_value(&mut self, pair: HandlePair) {
        self.machine.sync(pair);
    }

    /// Handle positions in percent of the track.
    #[must_use]
    pub fn percentages(&self) -> PercentagePair {
        let space = self.machine.space();
        let pair = self.machine.value();
        PercentagePair::new(space.percentage_of(pair.min), space.percentage_of(pair.max))
    }

    /// [`percentages`](Self::percentages) spread to the configured thumb gap.
    #[must_use]
    pub fn visual_percentages(&self) -> PercentagePair {
        self.percentages()
            .with_min_gap(self.track.gap_percent(self.options.thumb_gap))
    }

    /// Label text: the edit buffer while editing, else the formatted value.
    #[must_use]
    pub fn label_text(&self, handle: Handle) -> String {
        match self.editor.text(handle) {
            Some(text) => text.to_owned(),
            None => self.machine.space().format(self.machine.value().get(handle)),
        }
    }

    /// Problems found when the slider was configured.
    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    #[must_use]
    pub fn space(&self) -> &ValueSpace {
        self.machine.space()
    }

    #[must_use]
    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.machine.drag_state()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    #[must_use]
    pub fn is_editing(&self, handle: Handle) -> bool {
        self.editor.is_editing(handle)
    }

    /// The handle with keyboard focus.
    #[must_use]
    pub fn focused_handle(&self) -> Option<Handle> {
        self.nav.focused().copied()
    }

    /// Whether document listeners are attached.
    #[must_use]
    pub fn listeners_attached(&self) -> bool {
        self.listeners.is_attached()
    }

    /// The document listener hook.
    pub fn listeners(&self) -> &L {
        self.listeners.listeners()
    }

    /// Key bindings for handle actions.
    pub fn keymap_mut(&mut self) -> &mut KeyMap<Action> {
        self.nav.keymap_mut()
    }

    // ── Mode switches ───────────────────────────────────────────────────

    /// Enable or disable input. Disabling ends any drag and drops any edit.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
        if disabled {
            self.teardown();
        }
        self.nav.set_disabled(disabled);
    }

    pub fn set_allow_push(&mut self, allow_push: bool) {
        self.options.allow_push = allow_push;
        self.machine.set_allow_push(allow_push);
    }

    /// Enable or disable label editing. Disabling drops any edit.
    pub fn set_editable(&mut self, editable: bool) {
        self.options.editable = editable;
        self.editor.set_enabled(editable);
    }

    // ── Editing ─────────────────────────────────────────────────────────

    /// Open the label editor for `handle`. Any edit on the other handle is
    /// committed first.
    pub fn begin_edit(&mut self, handle: Handle) -> EventResult {
        if self.options.disabled || self.tracker.is_dragging() {
            return EventResult::default();
        }
        let mut result = EventResult::default();
        if self.editor.state().is_some_and(|s| s.handle != handle) {
            result = self.commit_edit();
        }
        let current = self.machine.value().get(handle);
        if self.editor.begin(handle, current, self.machine.space()) {
            result.consumed = true;
        }
        result
    }

    /// Commit the active edit (Enter or blur).
    pub fn commit_edit(&mut self) -> EventResult {
        let outcome = self.editor.commit(self.machine.space());
        self.apply_edit_outcome(outcome)
    }

    /// Abandon the active edit.
    pub fn cancel_edit(&mut self) -> EventResult {
        let outcome = self.editor.cancel();
        self.apply_edit_outcome(outcome)
    }

    fn apply_edit_outcome(&mut self, outcome: EditOutcome) -> EventResult {
        match outcome {
            EditOutcome::Ignored => EventResult::default(),
            EditOutcome::Commit { handle, value } => {
                let commit = self.machine.move_handle(handle, value, CommitSource::Edit);
                EventResult {
                    changed: self.notify(commit),
                    ..EventResult::consumed()
                }
            }
            EditOutcome::Updated
            | EditOutcome::Rejected
            | EditOutcome::Reverted { .. }
            | EditOutcome::Cancelled { .. } => EventResult::consumed(),
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    /// Process one input event delivered to `target`.
    pub fn handle_event(&mut self, event: &Event, target: Target) -> EventResult {
        if self.options.disabled {
            return EventResult::default();
        }
        match event {
            Event::Key(key) => self.handle_key(key, target),
            Event::Focus(true) => self.handle_focus(target),
            Event::Focus(false) => self.handle_blur(target),
            Event::Mouse(mouse) => {
                if let (Target::Label(handle), MouseEventKind::Down(MouseButton::Left)) =
                    (target, mouse.kind)
                {
                    return self.begin_edit(handle);
                }
                self.handle_pointer(event, target, Some(mouse.pos))
            }
            Event::Touch(touch) => {
                if let (Target::Label(handle), TouchPhase::Start) = (target, touch.phase) {
                    return self.begin_edit(handle);
                }
                let pos = touch.touches.first().map(|t| t.pos);
                self.handle_pointer(event, target, pos)
            }
        }
    }

    fn handle_focus(&mut self, target: Target) -> EventResult {
        match target {
            Target::Handle(handle) => {
                self.nav.focus(&handle);
                EventResult::consumed()
            }
            Target::Label(handle) => self.begin_edit(handle),
            Target::Track | Target::Document => EventResult::default(),
        }
    }

    fn handle_blur(&mut self, target: Target) -> EventResult {
        match target {
            Target::Label(handle) if self.editor.is_editing(handle) => self.commit_edit(),
            Target::Handle(_) => {
                self.nav.blur();
                EventResult::consumed()
            }
            Target::Label(_) | Target::Track | Target::Document => EventResult::default(),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, target: Target) -> EventResult {
        // Keys typed into a label belong to the label, never to the handles.
        if self.editor.state().is_some() || matches!(target, Target::Label(_)) {
            let outcome = self.editor.handle_key(key, self.machine.space());
            return self.apply_edit_outcome(outcome);
        }
        if self.tracker.is_dragging() {
            return EventResult::default();
        }
        match self.nav.handle_key(key) {
            NavOutcome::Focus { .. } => EventResult {
                prevent_default: true,
                ..EventResult::consumed()
            },
            NavOutcome::Invoke { action, index } => {
                let Some(&handle) = Handle::ALL.get(index) else {
                    return EventResult::default();
                };
                let commit = match action {
                    Action::JumpToStart => self.machine.home(handle),
                    Action::JumpToEnd => self.machine.end(handle),
                    Action::Increase => self.machine.step(handle, Direction::Increase),
                    Action::Decrease => self.machine.step(handle, Direction::Decrease),
                };
                EventResult {
                    prevent_default: true,
                    changed: self.notify(commit),
                    ..EventResult::consumed()
                }
            }
            NavOutcome::PassThrough => EventResult::default(),
        }
    }

    fn handle_pointer(&mut self, event: &Event, target: Target, pos: Option<Point>) -> EventResult {
        let press_target = match target {
            Target::Handle(handle) => Some(handle),
            Target::Track => pos.and_then(|p| self.track.nearest_handle(p, self.percentages())),
            Target::Label(_) | Target::Document => None,
        };

        let events = self.tracker.process(event, press_target);
        let mut result = EventResult::default();

        for drag in events {
            result.consumed = true;
            match drag {
                DragEvent::Start { handle, .. } => {
                    if self.editor.state().is_some() {
                        self.editor.cancel();
                    }
                    self.machine.begin_drag(handle);
                    self.nav.focus(&handle);
                    if target == Target::Track
                        && let Some(p) = pos
                        && let Some(changed) = self.drag_to(handle, p)
                    {
                        result.changed = Some(changed);
                    }
                }
                DragEvent::Move { handle, pos, .. } => {
                    if let Some(changed) = self.drag_to(handle, pos) {
                        result.changed = Some(changed);
                    }
                }
                DragEvent::Release { handle, .. } => {
                    self.machine.end_drag(handle);
                }
                DragEvent::End => {
                    result.drag_ended = true;
                    if let Some(callback) = self.on_drag_end.as_mut() {
                        callback();
                    }
                }
            }
        }

        self.listeners.sync(self.tracker.is_dragging());
        result.prevent_default = result.consumed || self.tracker.suppress_default();
        result
    }

    fn drag_to(&mut self, handle: Handle, pos: Point) -> Option<HandlePair> {
        if !self.machine.is_active(handle) {
            return None;
        }
        let percent = self.track.percent_at(pos)?;
        let value = self.machine.space().value_of(percent);
        let commit = self.machine.move_handle(handle, value, CommitSource::Pointer);
        self.notify(commit)
    }

    /// The single exit for committed changes.
    fn notify(&mut self, commit: Option<Commit>) -> Option<HandlePair> {
        let commit = commit?;
        let span = tracing::debug_span!(
            "range.commit",
            handle = commit.handle.as_str(),
            min = commit.pair.min,
            max = commit.pair.max,
            source = commit.source.as_str()
        );
        let _guard = span.enter();
        tracing::debug!("value committed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(commit.pair);
        }
        Some(commit.pair)
    }

    /// End every drag and drop any edit.
    fn teardown(&mut self) {
        self.editor.cancel();
        let ended = self.tracker.release_all().contains(&DragEvent::End);
        self.machine.end_all();
        self.listeners.sync(false);
        if ended && let Some(callback) = self.on_drag_end.as_mut() {
            callback();
        }
    }
}

/// Validate and normalize configuration into a state machine.
fn build_machine(
    domain: RangeDomain,
    initial: HandlePair,
    options: &SliderOptions,
    diagnostics: &mut Diagnostics,
) -> RangeStateMachine {
    diagnostics.extend(domain.validate());
    let domain_ok = !diagnostics.has_domain_errors();
    let space = ValueSpace::new(domain);

    let mut pair = initial;
    if pair.min > pair.max {
        diagnostics.report(ConfigError::InitialInverted {
            min: pair.min,
            max: pair.max,
        });
        pair = pair.ordered();
    }
    if domain_ok {
        let (lo, hi) = (space.min(), space.max());
        if pair.min < lo || pair.max > hi || pair.min > hi || pair.max < lo {
            diagnostics.report(ConfigError::InitialOutOfBounds {
                min: pair.min,
                max: pair.max,
            });
        }
        pair = HandlePair::new(space.snap(pair.min), space.snap(pair.max));
    }

    RangeStateMachine::new(space, pair)
        .with_allow_push(options.allow_push)
        .with_ownership(options.ownership)
}
