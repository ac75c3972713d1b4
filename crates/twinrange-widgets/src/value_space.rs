#![forbid(unsafe_code)]

//! Value, percentage and index arithmetic for a [`RangeDomain`].
//!
//! [`ValueSpace`] is pure: it never stores a selection, it only converts and
//! snaps. Every number that reaches the state machine has been through
//! [`ValueSpace::snap`].
//!
//! # Snapping
//!
//! - **Continuous**: `round(raw / step) * step`, rounded to the number of
//!   decimals written in `step` (step `0.25` keeps 2), then clamped to
//!   `[min, max]`. The grid is anchored at zero.
//! - **Fixed values**: the nearest member by absolute difference. On an exact
//!   tie the lower member wins.
//!
//! # Degraded domains
//!
//! A domain that failed validation never panics here. Percentages collapse to
//! `0`, values to `min`, and clamping tolerates inverted bounds.

use std::fmt;
use std::sync::Arc;

use crate::domain::RangeDomain;

/// Upper bound on derived decimal precision.
const MAX_PRECISION: usize = 10;

/// Tick budget for a track of ordinary size.
pub const DEFAULT_MAX_TICKS: usize = 101;

/// Custom display formatter. Affects display only, never stored values.
pub type Formatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Direction of a single discrete step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the domain maximum.
    Increase,
    /// Toward the domain minimum.
    Decrease,
}

/// Conversion engine for one domain.
#[derive(Clone)]
pub struct ValueSpace {
    domain: RangeDomain,
    precision: usize,
    formatter: Option<Formatter>,
}

impl fmt::Debug for ValueSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSpace")
            .field("domain", &self.domain)
            .field("precision", &self.precision)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

impl Default for ValueSpace {
    fn default() -> Self {
        Self::new(RangeDomain::default())
    }
}

impl ValueSpace {
    /// Build a value space. Precision is derived from the step, or from the
    /// most precise fixed value.
    #[must_use]
    pub fn new(domain: RangeDomain) -> Self {
        let precision = match &domain {
            RangeDomain::Continuous { step, .. } => decimals(*step),
            RangeDomain::Discrete { values } => {
                values.iter().map(|v| decimals(*v)).max().unwrap_or(0)
            }
        };
        Self {
            domain,
            precision,
            formatter: None,
        }
    }

    /// Install a display formatter (builder).
    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Install or clear the display formatter.
    pub fn set_formatter(&mut self, formatter: Option<Formatter>) {
        self.formatter = formatter;
    }

    /// The underlying domain.
    #[inline]
    #[must_use]
    pub fn domain(&self) -> &RangeDomain {
        &self.domain
    }

    /// Decimal places kept when snapping and formatting.
    #[inline]
    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Domain minimum.
    #[inline]
    #[must_use]
    pub fn min(&self) -> f64 {
        self.domain.min()
    }

    /// Domain maximum.
    #[inline]
    #[must_use]
    pub fn max(&self) -> f64 {
        self.domain.max()
    }

    /// Clamp into `[min, max]` without panicking on an inverted domain.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp_loose(value, self.min(), self.max())
    }

    // ── Conversions ─────────────────────────────────────────────────────

    /// `(value - min) / (max - min) * 100`. Zero when the range is empty.
    ///
    /// Linear in value for both domain kinds.
    #[must_use]
    pub fn percentage_of(&self, value: f64) -> f64 {
        let span = self.domain.span();
        if span.is_nan() || span <= 0.0 {
            return 0.0;
        }
        (value - self.min()) / span * 100.0
    }

    /// Map a percentage back to a snapped value. `percent` is clamped to
    /// `0..=100` first.
    #[must_use]
    pub fn value_of(&self, percent: f64) -> f64 {
        let span = self.domain.span();
        if span.is_nan() || span <= 0.0 || percent.is_nan() {
            return self.min();
        }
        let percent = percent.clamp(0.0, 100.0);
        self.snap(self.min() + percent / 100.0 * span)
    }

    /// Snap a raw value onto the domain grid.
    #[must_use]
    pub fn snap(&self, raw: f64) -> f64 {
        match &self.domain {
            RangeDomain::Continuous { step, .. } => {
                let stepped = if step.is_finite() && *step > 0.0 {
                    self.round_to_precision((raw / step).round() * step)
                } else {
                    raw
                };
                self.clamp(stepped)
            }
            RangeDomain::Discrete { values } => nearest(values, raw)
                .map(|i| values[i])
                .unwrap_or_else(|| self.min()),
        }
    }

    /// Round to the domain's decimal precision.
    #[must_use]
    pub fn round_to_precision(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision as i32);
        let scaled = (value * factor).round();
        if scaled.is_finite() {
            scaled / factor
        } else {
            value
        }
    }

    // ── Grid ────────────────────────────────────────────────────────────

    /// Number of selectable positions.
    ///
    /// Continuous: whole steps plus one when `max` sits on a step boundary
    /// (within `step / 1000`), plus two otherwise since `max` itself is a
    /// stop. Fixed values: the set's length.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        match &self.domain {
            RangeDomain::Continuous { step, .. } => {
                let span = self.domain.span();
                if span.is_nan() || span < 0.0 || !step.is_finite() || *step <= 0.0 {
                    return 1;
                }
                let n = span / step;
                let nearest = n.round();
                if (n - nearest).abs() * step < step / 1000.0 {
                    nearest as usize + 1
                } else {
                    n.floor() as usize + 2
                }
            }
            RangeDomain::Discrete { values } => values.len(),
        }
    }

    /// Grid index of `value` (after snapping).
    #[must_use]
    pub fn index_of(&self, value: f64) -> usize {
        match &self.domain {
            RangeDomain::Continuous { step, .. } => {
                let last = self.total_steps().saturating_sub(1);
                let snapped = self.snap(value);
                if snapped >= self.max() {
                    return last;
                }
                if !step.is_finite() || *step <= 0.0 {
                    return 0;
                }
                let raw = ((snapped - self.min()) / step).round();
                if raw <= 0.0 { 0 } else { (raw as usize).min(last) }
            }
            RangeDomain::Discrete { values } => nearest(values, value).unwrap_or(0),
        }
    }

    /// Value at a grid index, or `None` past the end.
    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        match &self.domain {
            RangeDomain::Continuous { step, .. } => {
                if index >= self.total_steps() {
                    return None;
                }
                let raw = self.round_to_precision(self.min() + index as f64 * step);
                Some(self.clamp(raw))
            }
            RangeDomain::Discrete { values } => values.get(index).copied(),
        }
    }

    /// Every selectable value in ascending order.
    ///
    /// Lazy, but yields [`total_steps`](Self::total_steps) items: a fine
    /// step on a wide range is a very long iteration.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.total_steps()).filter_map(move |i| self.value_at(i))
    }

    /// `(value, percent)` pairs for tick rendering, at most `max_ticks` of
    /// them.
    ///
    /// Grids larger than `max_ticks` are thinned to evenly strided stops.
    /// The first stop is always present, and the last one too when
    /// `max_ticks >= 2`.
    #[must_use]
    pub fn ticks(&self, max_ticks: usize) -> Vec<(f64, f64)> {
        let total = self.total_steps();
        if max_ticks == 0 || total == 0 {
            return Vec::new();
        }
        let stride = total.div_ceil(max_ticks).max(1);
        let last = total - 1;
        let mut indices: Vec<usize> = (0..total).step_by(stride).collect();
        if max_ticks >= 2 && last % stride != 0 {
            if indices.len() == max_ticks {
                indices.pop();
            }
            indices.push(last);
        }
        indices
            .into_iter()
            .filter_map(|i| self.value_at(i))
            .map(|v| (v, self.percentage_of(v)))
            .collect()
    }

    /// The neighbor of `value` one stop in `direction`.
    ///
    /// Never wraps: at either end the boundary value comes back unchanged,
    /// meaning no further movement is possible.
    #[must_use]
    pub fn adjacent_value(&self, value: f64, direction: Direction) -> f64 {
        match &self.domain {
            RangeDomain::Continuous { step, .. } => {
                let delta = match direction {
                    Direction::Increase => *step,
                    Direction::Decrease => -*step,
                };
                self.clamp(self.round_to_precision(value + delta))
            }
            RangeDomain::Discrete { values } => {
                let Some(index) = nearest(values, value) else {
                    return value;
                };
                let next = match direction {
                    Direction::Increase => (index + 1).min(values.len() - 1),
                    Direction::Decrease => index.saturating_sub(1),
                };
                values[next]
            }
        }
    }

    // ── Text ────────────────────────────────────────────────────────────

    /// Display text for a value.
    ///
    /// A custom formatter wins. Otherwise integral values print without a
    /// decimal point and everything else keeps the domain precision.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter(value);
        }
        format_default(value, self.precision)
    }

    /// Parse committed text. Empty, bare `-`, bare `.` and non-finite input
    /// yield `None`.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        if matches!(text, "" | "-" | "." | "-.") {
            return None;
        }
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// Decimal digits written in `value`'s shortest representation.
fn decimals(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let text = value.to_string();
    text.split_once('.')
        .map_or(0, |(_, frac)| frac.len())
        .min(MAX_PRECISION)
}

fn format_default(value: f64, precision: usize) -> String {
    // Avoid "-0".
    let value = if value == 0.0 { 0.0 } else { value };
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.precision$}")
    }
}

/// Index of the member nearest to `target`; lower index on ties.
fn nearest(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, v) in values.iter().enumerate() {
        let diff = (v - target).abs();
        if best.is_none_or(|(_, d)| diff < d) {
            best = Some((i, diff));
        }
    }
    best.map(|(i, _)| i)
}

/// `clamp` that tolerates `lo > hi` and NaN bounds.
pub(crate) fn clamp_loose(value: f64, lo: f64, hi: f64) -> f64 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}
