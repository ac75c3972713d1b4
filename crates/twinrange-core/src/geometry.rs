#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Pointer input arrives in pixels; the value engine works in percent along
//! the track. [`Rect::percent_along`] and [`Rect::point_at_percent`] are the
//! only places that know about the axis mapping.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis along which a track runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// x-axis, left = minimum.
    #[default]
    Horizontal,
    /// y-axis, bottom = minimum.
    Vertical,
}

/// An axis-aligned rectangle in pixel space (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Length of the rectangle along `orientation`.
    #[inline]
    #[must_use]
    pub fn length(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Map a point to a percentage (0..=100) along the rectangle's axis.
    ///
    /// Horizontal tracks grow left to right; vertical tracks grow bottom to
    /// top. Points outside the rectangle clamp to the nearest end. Returns
    /// `None` when the rectangle has no length along the axis.
    #[must_use]
    pub fn percent_along(&self, p: Point, orientation: Orientation) -> Option<f64> {
        let length = f64::from(self.length(orientation));
        if length <= 0.0 {
            return None;
        }
        let offset = match orientation {
            Orientation::Horizontal => f64::from(p.x - self.x),
            Orientation::Vertical => f64::from(self.bottom() - p.y),
        };
        Some((offset / length * 100.0).clamp(0.0, 100.0))
    }

    /// Inverse of [`percent_along`](Self::percent_along): the point on the
    /// rectangle's center line at `percent`.
    #[must_use]
    pub fn point_at_percent(&self, percent: f64, orientation: Orientation) -> Point {
        let t = (percent.clamp(0.0, 100.0) / 100.0) as f32;
        match orientation {
            Orientation::Horizontal => {
                Point::new(self.x + t * self.width, self.y + self.height / 2.0)
            }
            Orientation::Vertical => {
                Point::new(self.x + self.width / 2.0, self.bottom() - t * self.height)
            }
        }
    }
}
