#![forbid(unsafe_code)]

//! Configuration error model and graceful degradation.
//!
//! # Design Principles
//!
//! 1. **Never fatal**: a misconfigured slider still runs; numeric behavior
//!    becomes degraded rather than the widget refusing input.
//! 2. **Typed**: each problem is a [`ConfigError`] variant callers can match.
//! 3. **Degradation mapping**: every variant maps to a [`Degradation`] that
//!    describes what the engine does instead.
//! 4. **Diagnostic channel**: errors found at configure time are collected
//!    into [`Diagnostics`] and logged as `warn` events.

use std::fmt;

/// A configuration problem detected when a slider is configured.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `min >= max`; percentages are undefined.
    EmptyRange { min: f64, max: f64 },
    /// Step is zero, negative, or not finite.
    NonPositiveStep(f64),
    /// A bound or fixed value is NaN or infinite.
    NonFiniteBound,
    /// A fixed-value set needs at least two members.
    TooFewFixedValues(usize),
    /// Fixed values are not strictly ascending at `index`.
    UnsortedFixedValues { index: usize },
    /// The initial pair lies (partly) outside the domain.
    InitialOutOfBounds { min: f64, max: f64 },
    /// The initial pair has `min > max`.
    InitialInverted { min: f64, max: f64 },
}

/// What the engine does instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// Numeric conversions return boundary values; output is meaningless.
    UndefinedNumerics,
    /// The initial values are clamped into the domain.
    ClampInitial,
    /// The initial values are swapped into order.
    SwapInitial,
}

impl ConfigError {
    /// The degradation action for this error.
    #[must_use]
    pub fn degradation(&self) -> Degradation {
        match self {
            Self::EmptyRange { .. }
            | Self::NonPositiveStep(_)
            | Self::NonFiniteBound
            | Self::TooFewFixedValues(_)
            | Self::UnsortedFixedValues { .. } => Degradation::UndefinedNumerics,
            Self::InitialOutOfBounds { .. } => Degradation::ClampInitial,
            Self::InitialInverted { .. } => Degradation::SwapInitial,
        }
    }

    /// Error kind label for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyRange { .. } => "empty_range",
            Self::NonPositiveStep(_) => "non_positive_step",
            Self::NonFiniteBound => "non_finite_bound",
            Self::TooFewFixedValues(_) => "too_few_fixed_values",
            Self::UnsortedFixedValues { .. } => "unsorted_fixed_values",
            Self::InitialOutOfBounds { .. } => "initial_out_of_bounds",
            Self::InitialInverted { .. } => "initial_inverted",
        }
    }

    /// Whether the domain itself is unusable (as opposed to only the
    /// initial values).
    #[must_use]
    pub fn affects_domain(&self) -> bool {
        matches!(self.degradation(), Degradation::UndefinedNumerics)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { min, max } => {
                write!(f, "range is empty: min {min} is not below max {max}")
            }
            Self::NonPositiveStep(step) => write!(f, "step must be positive, got {step}"),
            Self::NonFiniteBound => write!(f, "domain contains a non-finite value"),
            Self::TooFewFixedValues(len) => {
                write!(f, "fixed values need at least 2 entries, got {len}")
            }
            Self::UnsortedFixedValues { index } => {
                write!(f, "fixed values are not strictly ascending at index {index}")
            }
            Self::InitialOutOfBounds { min, max } => {
                write!(f, "initial values [{min}, {max}] fall outside the domain")
            }
            Self::InitialInverted { min, max } => {
                write!(f, "initial min {min} is above initial max {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedNumerics => write!(f, "undefined_numerics"),
            Self::ClampInitial => write!(f, "clamp_initial"),
            Self::SwapInitial => write!(f, "swap_initial"),
        }
    }
}

// ── Diagnostic channel ──────────────────────────────────────────────────

/// Ordered collection of configure-time problems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<ConfigError>,
}

impl Diagnostics {
    /// Empty diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error and log it.
    pub fn report(&mut self, error: ConfigError) {
        tracing::warn!(
            kind = error.kind(),
            degradation = %error.degradation(),
            detail = %error,
            "range slider misconfigured"
        );
        self.errors.push(error);
    }

    /// Record several errors.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ConfigError>) {
        for error in errors {
            self.report(error);
        }
    }

    /// Whether nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Reported errors in order.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Whether any reported error leaves the domain unusable.
    #[must_use]
    pub fn has_domain_errors(&self) -> bool {
        self.errors.iter().any(ConfigError::affects_domain)
    }

    /// First error, if any. Convenient for `Result`-style callers.
    #[must_use]
    pub fn first(&self) -> Option<&ConfigError> {
        self.errors.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn empty_range_display_and_degradation() {
        let err = ConfigError::EmptyRange { min: 5.0, max: 5.0 };
        assert!(err.to_string().contains("min 5"));
        assert_eq!(err.degradation(), Degradation::UndefinedNumerics);
        assert!(err.affects_domain());
        assert!(StdError::source(&err).is_none());
    }

    #[test]
    fn initial_errors_do_not_affect_domain() {
        let out = ConfigError::InitialOutOfBounds { min: -1.0, max: 5.0 };
        assert_eq!(out.degradation(), Degradation::ClampInitial);
        assert!(!out.affects_domain());

        let inv = ConfigError::InitialInverted { min: 9.0, max: 1.0 };
        assert_eq!(inv.degradation(), Degradation::SwapInitial);
    }

    #[test]
    fn kinds_are_unique() {
        let all = [
            ConfigError::EmptyRange { min: 0.0, max: 0.0 },
            ConfigError::NonPositiveStep(0.0),
            ConfigError::NonFiniteBound,
            ConfigError::TooFewFixedValues(1),
            ConfigError::UnsortedFixedValues { index: 1 },
            ConfigError::InitialOutOfBounds { min: 0.0, max: 0.0 },
            ConfigError::InitialInverted { min: 0.0, max: 0.0 },
        ];
        let mut kinds: Vec<_> = all.iter().map(ConfigError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), all.len());
    }

    #[test]
    fn diagnostics_collects_in_order() {
        let mut diag = Diagnostics::new();
        assert!(diag.is_empty());
        diag.extend([
            ConfigError::InitialInverted { min: 2.0, max: 1.0 },
            ConfigError::NonPositiveStep(-1.0),
        ]);
        assert_eq!(diag.errors().len(), 2);
        assert_eq!(diag.first().map(ConfigError::kind), Some("initial_inverted"));
        assert!(diag.has_domain_errors());
    }

    #[test]
    fn degradation_display() {
        assert_eq!(Degradation::UndefinedNumerics.to_string(), "undefined_numerics");
        assert_eq!(Degradation::ClampInitial.to_string(), "clamp_initial");
        assert_eq!(Degradation::SwapInitial.to_string(), "swap_initial");
    }
}
