#![forbid(unsafe_code)]

//! Handle ordering policy and the single commit path.
//!
//! [`RangeStateMachine`] owns the two handle values and decides where a
//! proposed movement actually lands:
//!
//! - **Push** (`allow_push = true`): moving a handle past the other carries
//!   the other along, so both end up on the dragged value.
//! - **Clamp** (`allow_push = false`): the moving handle stops on the other
//!   handle's value.
//! - **Crossing prevention**: while both handles are drag-active (two
//!   touches), neither may pass the other's live value, whatever the push
//!   setting. With fixed values the bound is the other handle's neighboring
//!   member, never behind the moving handle's current value.
//!
//! Every mutation goes through [`RangeStateMachine::commit`]. An unchanged
//! pair yields `None`, so callers never notify redundantly.
//!
//! # Invariants
//!
//! 1. `min <= max` after every commit.
//! 2. Keyboard transitions are ignored while any handle is dragging.
//! 3. `end_drag` reports drag-end exactly once per non-empty → empty
//!    transition of the active set.

use std::fmt;

use twinrange_core::Handle;

use crate::value_space::{Direction, ValueSpace};

/// The two committed handle values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandlePair {
    pub min: f64,
    pub max: f64,
}

impl HandlePair {
    /// Create a pair.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Value of one handle.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Min => self.min,
            Handle::Max => self.max,
        }
    }

    /// Replace one handle's value.
    #[must_use]
    pub fn with(mut self, handle: Handle, value: f64) -> Self {
        match handle {
            Handle::Min => self.min = value,
            Handle::Max => self.max = value,
        }
        self
    }

    /// Both handles on `value`.
    #[must_use]
    pub const fn both(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether `min <= max`.
    #[inline]
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    /// The pair with its values swapped into order.
    #[must_use]
    pub fn ordered(self) -> Self {
        if self.min > self.max {
            Self::new(self.max, self.min)
        } else {
            self
        }
    }
}

impl fmt::Display for HandlePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Drag state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// One handle is being dragged.
    DraggingSingle(Handle),
    /// Both handles are being dragged by independent touches.
    DraggingBoth,
}

/// Who owns the committed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueOwnership {
    /// The machine stores every commit.
    #[default]
    Internal,
    /// Commits are only forwarded; the caller feeds values back with
    /// [`RangeStateMachine::sync`].
    External,
}

/// What triggered a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitSource {
    Pointer,
    Keyboard,
    Edit,
}

impl CommitSource {
    /// Label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Keyboard => "keyboard",
            Self::Edit => "edit",
        }
    }
}

/// A committed change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    /// The handle that initiated the change.
    pub handle: Handle,
    /// The new pair.
    pub pair: HandlePair,
    pub source: CommitSource,
}

/// Owner of the handle pair and its ordering policy.
#[derive(Debug, Clone)]
pub struct RangeStateMachine {
    space: ValueSpace,
    pair: HandlePair,
    allow_push: bool,
    ownership: ValueOwnership,
    active: [bool; 2],
}

impl RangeStateMachine {
    /// Create a machine. `initial` is stored as given; callers normalize it.
    #[must_use]
    pub fn new(space: ValueSpace, initial: HandlePair) -> Self {
        Self {
            space,
            pair: initial,
            allow_push: true,
            ownership: ValueOwnership::Internal,
            active: [false; 2],
        }
    }

    /// Set the push policy (builder).
    #[must_use]
    pub fn with_allow_push(mut self, allow_push: bool) -> Self {
        self.allow_push = allow_push;
        self
    }

    /// Set value ownership (builder).
    #[must_use]
    pub fn with_ownership(mut self, ownership: ValueOwnership) -> Self {
        self.ownership = ownership;
        self
    }

    /// The value space.
    #[inline]
    #[must_use]
    pub fn space(&self) -> &ValueSpace {
        &self.space
    }

    /// Mutable access to the value space (formatter changes).
    pub fn space_mut(&mut self) -> &mut ValueSpace {
        &mut self.space
    }

    /// Current pair.
    #[inline]
    #[must_use]
    pub fn value(&self) -> HandlePair {
        self.pair
    }

    /// Whether push policy is active.
    #[inline]
    #[must_use]
    pub fn allow_push(&self) -> bool {
        self.allow_push
    }

    /// Change the push policy.
    pub fn set_allow_push(&mut self, allow_push: bool) {
        self.allow_push = allow_push;
    }

    /// Ownership mode.
    #[inline]
    #[must_use]
    pub fn ownership(&self) -> ValueOwnership {
        self.ownership
    }

    /// Replace the pair from outside without notifying.
    ///
    /// Values are snapped and swapped into order.
    pub fn sync(&mut self, pair: HandlePair) {
        let snapped = HandlePair::new(self.space.snap(pair.min), self.space.snap(pair.max));
        self.pair = snapped.ordered();
    }

    // ── Drag lifecycle ──────────────────────────────────────────────────

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        match self.active {
            [false, false] => DragState::Idle,
            [true, false] => DragState::DraggingSingle(Handle::Min),
            [false, true] => DragState::DraggingSingle(Handle::Max),
            [true, true] => DragState::DraggingBoth,
        }
    }

    /// Whether any handle is drag-active.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active.iter().any(|&a| a)
    }

    /// Whether `handle` is drag-active.
    #[inline]
    #[must_use]
    pub fn is_active(&self, handle: Handle) -> bool {
        self.active[handle.index()]
    }

    /// Mark a handle drag-active.
    pub fn begin_drag(&mut self, handle: Handle) -> DragState {
        self.active[handle.index()] = true;
        self.drag_state()
    }

    /// Mark a handle inactive. Returns `true` when this emptied the active
    /// set (drag-end).
    pub fn end_drag(&mut self, handle: Handle) -> bool {
        let was = self.is_dragging();
        self.active[handle.index()] = false;
        was && !self.is_dragging()
    }

    /// Clear the active set. Returns `true` if anything was active.
    pub fn end_all(&mut self) -> bool {
        let was = self.is_dragging();
        self.active = [false; 2];
        was
    }

    // ── Policy ──────────────────────────────────────────────────────────

    /// Where `handle` lands if moved toward `proposed`. Pure.
    #[must_use]
    pub fn propose(&self, handle: Handle, proposed: f64) -> HandlePair {
        if proposed.is_nan() {
            return self.pair;
        }
        let target = self.space.snap(proposed);
        if self.drag_state() == DragState::DraggingBoth {
            self.bounded(handle, target)
        } else {
            self.apply_policy(handle, target)
        }
    }

    /// Push or clamp `target` (already snapped) against the other handle.
    fn apply_policy(&self, handle: Handle, target: f64) -> HandlePair {
        let HandlePair { min, max } = self.pair;
        match handle {
            Handle::Min if target > max => {
                if self.allow_push {
                    HandlePair::both(target)
                } else {
                    HandlePair::new(max, max)
                }
            }
            Handle::Max if target < min => {
                if self.allow_push {
                    HandlePair::both(target)
                } else {
                    HandlePair::new(min, min)
                }
            }
            _ => self.pair.with(handle, target),
        }
    }

    /// Crossing prevention while both handles are live.
    fn bounded(&self, handle: Handle, target: f64) -> HandlePair {
        let HandlePair { min, max } = self.pair;
        let discrete = self.space.domain().is_discrete();
        match handle {
            Handle::Min => {
                let mut bound = max;
                if discrete {
                    let other = self.space.index_of(max);
                    let below = self
                        .space
                        .value_at(other.saturating_sub(1))
                        .unwrap_or(max);
                    bound = below.max(min).min(max);
                }
                self.pair.with(Handle::Min, target.min(bound))
            }
            Handle::Max => {
                let mut bound = min;
                if discrete {
                    let other = self.space.index_of(min);
                    let above = self.space.value_at(other + 1).unwrap_or(min);
                    bound = above.min(max).max(min);
                }
                self.pair.with(Handle::Max, target.max(bound))
            }
        }
    }

    // ── Commit path ─────────────────────────────────────────────────────

    /// Commit `next` on behalf of `handle`.
    ///
    /// Returns `None` when nothing changed. In internal ownership the pair is
    /// stored; in external ownership it is only returned.
    pub fn commit(
        &mut self,
        handle: Handle,
        next: HandlePair,
        source: CommitSource,
    ) -> Option<Commit> {
        if next == self.pair {
            tracing::trace!(
                handle = handle.as_str(),
                source = source.as_str(),
                "unchanged value suppressed"
            );
            return None;
        }
        if self.ownership == ValueOwnership::Internal {
            self.pair = next;
        }
        Some(Commit {
            handle,
            pair: next,
            source,
        })
    }

    /// Move a handle toward a proposed value and commit.
    pub fn move_handle(
        &mut self,
        handle: Handle,
        proposed: f64,
        source: CommitSource,
    ) -> Option<Commit> {
        let next = self.propose(handle, proposed);
        self.commit(handle, next, source)
    }

    // ── Keyboard transitions ────────────────────────────────────────────

    /// `Home`: move toward the domain minimum.
    pub fn home(&mut self, handle: Handle) -> Option<Commit> {
        if self.is_dragging() {
            return None;
        }
        let next = self.apply_policy(handle, self.space.min());
        self.commit(handle, next, CommitSource::Keyboard)
    }

    /// `End`: move toward the domain maximum.
    pub fn end(&mut self, handle: Handle) -> Option<Commit> {
        if self.is_dragging() {
            return None;
        }
        let next = self.apply_policy(handle, self.space.max());
        self.commit(handle, next, CommitSource::Keyboard)
    }

    /// Arrow keys: move one adjacent value.
    pub fn step(&mut self, handle: Handle, direction: Direction) -> Option<Commit> {
        if self.is_dragging() {
            return None;
        }
        let current = self.pair.get(handle);
        let target = self.space.adjacent_value(current, direction);
        if target == current {
            return None;
        }
        let next = self.apply_policy(handle, target);
        self.commit(handle, next, CommitSource::Keyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RangeDomain;

    fn machine(min: f64, max: f64, push: bool) -> RangeStateMachine {
        let space = ValueSpace::new(RangeDomain::continuous(0.0, 100.0, 1.0));
        RangeStateMachine::new(space, HandlePair::new(min, max)).with_allow_push(push)
    }

    fn fixed_machine(min: f64, max: f64, push: bool) -> RangeStateMachine {
        let space = ValueSpace::new(RangeDomain::discrete(vec![
            0.0, 25.0, 50.0, 100.0, 250.0, 500.0, 750.0, 1000.0,
        ]));
        RangeStateMachine::new(space, HandlePair::new(min, max)).with_allow_push(push)
    }

    #[test]
    fn drag_states() {
        let mut m = machine(10.0, 90.0, true);
        assert_eq!(m.drag_state(), DragState::Idle);
        assert_eq!(m.begin_drag(Handle::Max), DragState::DraggingSingle(Handle::Max));
        assert_eq!(m.begin_drag(Handle::Min), DragState::DraggingBoth);
        assert!(!m.end_drag(Handle::Min));
        assert!(m.end_drag(Handle::Max));
        assert!(!m.end_drag(Handle::Max));
        assert_eq!(m.drag_state(), DragState::Idle);
    }

    #[test]
    fn push_carries_other_handle() {
        let mut m = machine(10.0, 50.0, true);
        m.begin_drag(Handle::Min);
        let c = m.move_handle(Handle::Min, 70.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::both(70.0)));
        assert_eq!(m.value(), HandlePair::both(70.0));
    }

    #[test]
    fn clamp_stops_at_other_handle() {
        let mut m = machine(10.0, 50.0, false);
        m.begin_drag(Handle::Min);
        let c = m.move_handle(Handle::Min, 70.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::both(50.0)));
        assert_eq!(m.move_handle(Handle::Min, 80.0, CommitSource::Pointer), None);

        let mut m = machine(10.0, 50.0, false);
        let c = m.move_handle(Handle::Max, 2.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::both(10.0)));
    }

    #[test]
    fn unchanged_move_is_suppressed() {
        let mut m = machine(10.0, 50.0, true);
        assert_eq!(m.move_handle(Handle::Min, 10.2, CommitSource::Pointer), None);
    }

    #[test]
    fn both_active_prevents_crossing_even_with_push() {
        let mut m = machine(40.0, 60.0, true);
        m.begin_drag(Handle::Min);
        m.begin_drag(Handle::Max);
        let c = m.move_handle(Handle::Min, 80.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(60.0, 60.0)));
        let c = m.move_handle(Handle::Max, 10.0, CommitSource::Pointer);
        assert_eq!(c, None);
        assert!(m.value().is_ordered());
    }

    #[test]
    fn fixed_mode_crossing_bound_is_neighbor_index() {
        let mut m = fixed_machine(25.0, 500.0, true);
        m.begin_drag(Handle::Min);
        m.begin_drag(Handle::Max);
        let c = m.move_handle(Handle::Min, 900.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(250.0, 500.0)));
        let c = m.move_handle(Handle::Max, 0.0, CommitSource::Pointer);
        assert_eq!(c, None);
    }

    #[test]
    fn fixed_mode_bound_never_forces_backwards() {
        let mut m = fixed_machine(250.0, 250.0, true);
        m.begin_drag(Handle::Min);
        m.begin_drag(Handle::Max);
        assert_eq!(m.move_handle(Handle::Min, 1000.0, CommitSource::Pointer), None);
        assert_eq!(m.value(), HandlePair::both(250.0));
    }

    #[test]
    fn fixed_mode_snaps_and_pushes() {
        let mut m = fixed_machine(0.0, 500.0, true);
        m.begin_drag(Handle::Min);
        let c = m.move_handle(Handle::Min, 60.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(50.0, 500.0)));
        let c = m.move_handle(Handle::Min, 800.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::both(750.0)));
    }

    #[test]
    fn home_on_min_then_repeat_is_noop() {
        let mut m = machine(50.0, 100.0, true);
        let c = m.home(Handle::Min);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(0.0, 100.0)));
        assert_eq!(m.home(Handle::Min), None);
    }

    #[test]
    fn home_on_max_push_and_clamp() {
        let mut m = machine(30.0, 70.0, true);
        assert_eq!(m.home(Handle::Max).map(|c| c.pair), Some(HandlePair::both(0.0)));

        let mut m = machine(30.0, 70.0, false);
        assert_eq!(m.home(Handle::Max).map(|c| c.pair), Some(HandlePair::both(30.0)));
    }

    #[test]
    fn end_on_min_push_and_clamp() {
        let mut m = machine(30.0, 70.0, true);
        assert_eq!(m.end(Handle::Min).map(|c| c.pair), Some(HandlePair::both(100.0)));

        let mut m = machine(30.0, 70.0, false);
        assert_eq!(m.end(Handle::Min).map(|c| c.pair), Some(HandlePair::both(70.0)));
        assert_eq!(m.end(Handle::Max).map(|c| c.pair), Some(HandlePair::new(70.0, 100.0)));
    }

    #[test]
    fn arrows_step_and_cross_by_policy() {
        let mut m = machine(50.0, 50.0, true);
        let c = m.step(Handle::Min, Direction::Increase);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::both(51.0)));

        let mut m = machine(50.0, 50.0, false);
        assert_eq!(m.step(Handle::Min, Direction::Increase), None);
        let c = m.step(Handle::Max, Direction::Increase);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(50.0, 51.0)));
    }

    #[test]
    fn arrows_stop_at_domain_bounds() {
        let mut m = machine(0.0, 100.0, true);
        assert_eq!(m.step(Handle::Min, Direction::Decrease), None);
        assert_eq!(m.step(Handle::Max, Direction::Increase), None);
    }

    #[test]
    fn keyboard_ignored_while_dragging() {
        let mut m = machine(50.0, 100.0, true);
        m.begin_drag(Handle::Max);
        assert_eq!(m.home(Handle::Min), None);
        assert_eq!(m.step(Handle::Min, Direction::Decrease), None);
        assert_eq!(m.value(), HandlePair::new(50.0, 100.0));
    }

    #[test]
    fn fixed_arrows_walk_members() {
        let mut m = fixed_machine(25.0, 500.0, true);
        let c = m.step(Handle::Min, Direction::Increase);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(50.0, 500.0)));
        let c = m.step(Handle::Max, Direction::Decrease);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(50.0, 250.0)));
    }

    #[test]
    fn external_ownership_forwards_only() {
        let mut m = machine(10.0, 20.0, true).with_ownership(ValueOwnership::External);
        let c = m.move_handle(Handle::Max, 30.0, CommitSource::Pointer);
        assert_eq!(c.map(|c| c.pair), Some(HandlePair::new(10.0, 30.0)));
        assert_eq!(m.value(), HandlePair::new(10.0, 20.0));
        m.sync(HandlePair::new(30.4, 10.0));
        assert_eq!(m.value(), HandlePair::new(10.0, 30.0));
    }

    #[test]
    fn pair_helpers() {
        let p = HandlePair::new(3.0, 1.0);
        assert!(!p.is_ordered());
        assert_eq!(p.ordered(), HandlePair::new(1.0, 3.0));
        assert_eq!(p.with(Handle::Max, 9.0).get(Handle::Max), 9.0);
        assert_eq!(HandlePair::new(1.0, 2.5).to_string(), "[1, 2.5]");
        assert_eq!(CommitSource::Edit.as_str(), "edit");
    }
}
