#![forbid(unsafe_code)]

//! twinrange public facade crate.
//!
//! Re-exports the input layer and the range engine, adds a unified
//! [`Error`], configuration loading (feature `config`, on by default), and
//! the [`DomainSource`] boundary.
//!
//! ```
//! use twinrange::prelude::*;
//!
//! let mut slider = RangeSlider::new(
//!     RangeDomain::continuous(0.0, 100.0, 5.0),
//!     HandlePair::new(20.0, 80.0),
//!     SliderOptions::default().with_allow_push(false),
//! );
//! slider.handle_event(&Event::Focus(true), Target::Handle(Handle::Max));
//! slider.handle_event(&Event::Key(KeyEvent::new(KeyCode::Right)), Target::Handle(Handle::Max));
//! assert_eq!(slider.value(), HandlePair::new(20.0, 85.0));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use twinrange_core::Handle;
pub use twinrange_core::drag::{DragEndPolicy, DragEvent, PointerDragTracker, PointerId};
pub use twinrange_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    TouchEvent, TouchId, TouchPhase, TouchPoint,
};
pub use twinrange_core::geometry::{Orientation, Point, Rect};
pub use twinrange_core::keybinding::{Action, KeyMap};
pub use twinrange_core::listener::{DocumentListeners, NoopListeners};

// --- Widget re-exports -----------------------------------------------------

pub use twinrange_widgets::{
    Commit, CommitSource, ConfigError, Degradation, Diagnostics, Direction, DragState,
    EventResult, HandlePair, PercentagePair, RangeDomain, RangeSlider, RangeStateMachine,
    SliderOptions, Target, ThumbGap, TrackGeometry, ValueOwnership, ValueSpace,
};

// --- Facade modules --------------------------------------------------------

#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod source;

#[cfg(feature = "config")]
pub use config::SliderConfig;
pub use error::{Error, Result};
pub use source::{DomainSource, StaticDomain};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DomainSource, Error, Event, EventResult, Handle, HandlePair, KeyCode, KeyEvent,
        Modifiers, MouseButton, MouseEvent, MouseEventKind, Orientation, RangeDomain, RangeSlider,
        Rect, Result, SliderOptions, StaticDomain, Target, TouchEvent, TouchPhase, TouchPoint,
        TrackGeometry,
    };

    #[cfg(feature = "config")]
    pub use crate::SliderConfig;

    pub use crate::{core, widgets};
}

pub use twinrange_core as core;
pub use twinrange_widgets as widgets;

#[cfg(feature = "tracing-json")]
pub use twinrange_core::logging::init_json;
