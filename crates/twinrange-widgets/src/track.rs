#![forbid(unsafe_code)]

//! Track geometry and rendering percentages.

use twinrange_core::Handle;
use twinrange_core::geometry::{Orientation, Point, Rect};

/// Rendering positions of the two handles, in percent of the track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PercentagePair {
    pub min: f64,
    pub max: f64,
}

impl PercentagePair {
    /// Create a pair.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Percent of one handle.
    #[must_use]
    pub fn get(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Min => self.min,
            Handle::Max => self.max,
        }
    }

    /// Width of the filled segment between the handles.
    #[must_use]
    pub fn fill(&self) -> f64 {
        (self.max - self.min).max(0.0)
    }

    /// Spread the pair apart so it is at least `gap` percent wide.
    ///
    /// The pair moves symmetrically around its midpoint and is shifted back
    /// inside `0..=100` if that would overflow. Purely visual.
    #[must_use]
    pub fn with_min_gap(self, gap: f64) -> Self {
        if gap.is_nan() || gap <= 0.0 || self.max - self.min >= gap {
            return self;
        }
        let gap = gap.min(100.0);
        let mid = (self.min + self.max) / 2.0;
        let mut lo = mid - gap / 2.0;
        let mut hi = mid + gap / 2.0;
        if lo < 0.0 {
            lo = 0.0;
            hi = gap;
        } else if hi > 100.0 {
            hi = 100.0;
            lo = 100.0 - gap;
        }
        Self::new(lo, hi)
    }
}

/// Minimum visual distance between the rendered handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThumbGap {
    /// Percent of the track length.
    Percent(f64),
    /// Pixels; needs the track length to resolve.
    Pixels(f32),
}

impl Default for ThumbGap {
    fn default() -> Self {
        Self::Percent(0.0)
    }
}

/// Where the track sits on screen and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    pub bounds: Rect,
    pub orientation: Orientation,
}

impl TrackGeometry {
    /// Create a geometry.
    #[must_use]
    pub const fn new(bounds: Rect, orientation: Orientation) -> Self {
        Self {
            bounds,
            orientation,
        }
    }

    /// Percent along the track under `pos`, clamped to the ends.
    #[must_use]
    pub fn percent_at(&self, pos: Point) -> Option<f64> {
        self.bounds.percent_along(pos, self.orientation)
    }

    /// Screen position of a percent on the track's center line.
    #[must_use]
    pub fn point_at(&self, percent: f64) -> Point {
        self.bounds.point_at_percent(percent, self.orientation)
    }

    /// Resolve a thumb gap to percent of this track.
    #[must_use]
    pub fn gap_percent(&self, gap: ThumbGap) -> f64 {
        match gap {
            ThumbGap::Percent(p) => p.max(0.0),
            ThumbGap::Pixels(px) => {
                let length = self.bounds.length(self.orientation);
                if length > 0.0 {
                    f64::from(px.max(0.0) / length * 100.0)
                } else {
                    0.0
                }
            }
        }
    }

    /// The handle closest to `pos`; Min on a tie.
    #[must_use]
    pub fn nearest_handle(&self, pos: Point, handles: PercentagePair) -> Option<Handle> {
        let percent = self.percent_at(pos)?;
        let to_min = (percent - handles.min).abs();
        let to_max = (percent - handles.max).abs();
        Some(if to_max < to_min {
            Handle::Max
        } else {
            Handle::Min
        })
    }
}
