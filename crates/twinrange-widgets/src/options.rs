#![forbid(unsafe_code)]

//! Slider behavior options.

use twinrange_core::drag::DragEndPolicy;
use twinrange_core::geometry::Orientation;

use crate::range_state::ValueOwnership;
use crate::track::ThumbGap;

/// Behavior switches for a [`RangeSlider`](crate::RangeSlider).
#[derive(Debug, Clone, PartialEq)]
pub struct SliderOptions {
    /// Push the other handle along instead of clamping. Default `true`.
    pub allow_push: bool,
    /// Visual minimum separation of the rendered handles.
    pub thumb_gap: ThumbGap,
    pub orientation: Orientation,
    /// Ignore all input.
    pub disabled: bool,
    /// Allow free-text editing of the labels.
    pub editable: bool,
    /// Render the value labels as inputs.
    pub show_inputs: bool,
    /// Handle Tab/Shift+Tab between the handles. Default `true`.
    pub tab_navigation: bool,
    pub ownership: ValueOwnership,
    pub drag_end: DragEndPolicy,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            allow_push: true,
            thumb_gap: ThumbGap::default(),
            orientation: Orientation::Horizontal,
            disabled: false,
            editable: false,
            show_inputs: false,
            tab_navigation: true,
            ownership: ValueOwnership::Internal,
            drag_end: DragEndPolicy::AllReleased,
        }
    }
}

impl SliderOptions {
    #[must_use]
    pub fn with_allow_push(mut self, allow_push: bool) -> Self {
        self.allow_push = allow_push;
        self
    }

    #[must_use]
    pub fn with_thumb_gap(mut self, thumb_gap: ThumbGap) -> Self {
        self.thumb_gap = thumb_gap;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    #[must_use]
    pub fn with_show_inputs(mut self, show_inputs: bool) -> Self {
        self.show_inputs = show_inputs;
        self
    }

    #[must_use]
    pub fn with_tab_navigation(mut self, tab_navigation: bool) -> Self {
        self.tab_navigation = tab_navigation;
        self
    }

    #[must_use]
    pub fn with_ownership(mut self, ownership: ValueOwnership) -> Self {
        self.ownership = ownership;
        self
    }

    #[must_use]
    pub fn with_drag_end(mut self, drag_end: DragEndPolicy) -> Self {
        self.drag_end = drag_end;
        self
    }
}
