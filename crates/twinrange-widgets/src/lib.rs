#![forbid(unsafe_code)]

//! Range value engine and the dual-handle slider built on it.
//!
//! # Layers
//! - [`ValueSpace`]: value ↔ percent conversion, snapping, grid indices,
//!   formatting and parsing.
//! - [`RangeStateMachine`]: the handle pair, push/clamp policy, multi-touch
//!   crossing prevention, keyboard transitions, and the commit path.
//! - [`EditableValueController`]: label text editing.
//! - [`KeyboardFocusNavigator`]: Tab cycling and key dispatch.
//! - [`RangeSlider`]: routes input events through all of the above.

pub mod domain;
pub mod editable;
pub mod error;
pub mod focus;
pub mod options;
pub mod range_slider;
pub mod range_state;
pub mod track;
pub mod value_space;

pub use domain::RangeDomain;
pub use editable::{EditOutcome, EditState, EditableValueController};
pub use error::{ConfigError, Degradation, Diagnostics};
pub use focus::{KeyboardFocusNavigator, NavOutcome};
pub use options::SliderOptions;
pub use range_slider::{EventResult, RangeSlider, Target};
pub use range_state::{
    Commit, CommitSource, DragState, HandlePair, RangeStateMachine, ValueOwnership,
};
pub use track::{PercentagePair, ThumbGap, TrackGeometry};
pub use value_space::{DEFAULT_MAX_TICKS, Direction, Formatter, ValueSpace};
