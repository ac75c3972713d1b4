#![forbid(unsafe_code)]

//! The numeric domain a range selects from.

use crate::error::ConfigError;

/// Either a continuous stepped interval or a fixed, ascending value set.
///
/// Immutable once a slider is configured; reconfiguring resets all derived
/// state.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeDomain {
    /// `[min, max]` snapped to multiples of `step`.
    Continuous { min: f64, max: f64, step: f64 },
    /// A strictly ascending set with at least two members. `min` and `max`
    /// are its first and last entries; neighbors are one index apart.
    Discrete { values: Vec<f64> },
}

impl Default for RangeDomain {
    fn default() -> Self {
        Self::Continuous {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

impl RangeDomain {
    /// Continuous domain.
    #[must_use]
    pub const fn continuous(min: f64, max: f64, step: f64) -> Self {
        Self::Continuous { min, max, step }
    }

    /// Fixed-value domain.
    #[must_use]
    pub fn discrete(values: impl Into<Vec<f64>>) -> Self {
        Self::Discrete {
            values: values.into(),
        }
    }

    /// Lowest selectable value.
    #[must_use]
    pub fn min(&self) -> f64 {
        match self {
            Self::Continuous { min, .. } => *min,
            Self::Discrete { values } => values.first().copied().unwrap_or(0.0),
        }
    }

    /// Highest selectable value.
    #[must_use]
    pub fn max(&self) -> f64 {
        match self {
            Self::Continuous { max, .. } => *max,
            Self::Discrete { values } => values.last().copied().unwrap_or(0.0),
        }
    }

    /// `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max() - self.min()
    }

    /// Step of a continuous domain; `None` for fixed values.
    #[must_use]
    pub fn step(&self) -> Option<f64> {
        match self {
            Self::Continuous { step, .. } => Some(*step),
            Self::Discrete { .. } => None,
        }
    }

    /// The fixed values, if any.
    #[must_use]
    pub fn fixed_values(&self) -> Option<&[f64]> {
        match self {
            Self::Continuous { .. } => None,
            Self::Discrete { values } => Some(values),
        }
    }

    /// Whether this is a fixed-value domain.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }

    /// Check the domain's own invariants.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        match self {
            Self::Continuous { min, max, step } => {
                if !min.is_finite() || !max.is_finite() {
                    errors.push(ConfigError::NonFiniteBound);
                } else if min >= max {
                    errors.push(ConfigError::EmptyRange {
                        min: *min,
                        max: *max,
                    });
                }
                if !step.is_finite() || *step <= 0.0 {
                    errors.push(ConfigError::NonPositiveStep(*step));
                }
            }
            Self::Discrete { values } => {
                if values.iter().any(|v| !v.is_finite()) {
                    errors.push(ConfigError::NonFiniteBound);
                }
                if values.len() < 2 {
                    errors.push(ConfigError::TooFewFixedValues(values.len()));
                }
                if let Some(index) = values.windows(2).position(|w| w[1] <= w[0]) {
                    errors.push(ConfigError::UnsortedFixedValues { index: index + 1 });
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuous_bounds() {
        let d = RangeDomain::continuous(-10.0, 10.0, 0.5);
        assert_eq!(d.min(), -10.0);
        assert_eq!(d.max(), 10.0);
        assert_eq!(d.span(), 20.0);
        assert_eq!(d.step(), Some(0.5));
        assert!(!d.is_discrete());
        assert!(d.validate().is_empty());
    }

    #[test]
    fn discrete_bounds_come_from_ends() {
        let d = RangeDomain::discrete([0.0, 25.0, 50.0, 100.0]);
        assert_eq!(d.min(), 0.0);
        assert_eq!(d.max(), 100.0);
        assert_eq!(d.step(), None);
        assert_eq!(d.fixed_values().map(<[f64]>::len), Some(4));
        assert!(d.validate().is_empty());
    }

    #[test]
    fn empty_range_and_bad_step_reported() {
        let errors = RangeDomain::continuous(5.0, 5.0, 0.0).validate();
        assert_eq!(
            errors,
            vec![
                ConfigError::EmptyRange { min: 5.0, max: 5.0 },
                ConfigError::NonPositiveStep(0.0)
            ]
        );
    }

    #[test]
    fn non_finite_continuous_bound() {
        let errors = RangeDomain::continuous(f64::NAN, 1.0, 1.0).validate();
        assert_eq!(errors, vec![ConfigError::NonFiniteBound]);
    }

    #[test]
    fn unsorted_and_short_fixed_values() {
        let errors = RangeDomain::discrete([0.0, 10.0, 10.0]).validate();
        assert_eq!(errors, vec![ConfigError::UnsortedFixedValues { index: 2 }]);

        let errors = RangeDomain::discrete([3.0]).validate();
        assert_eq!(errors, vec![ConfigError::TooFewFixedValues(1)]);
    }

    #[test]
    fn empty_fixed_values_degrade_to_zero() {
        let d = RangeDomain::discrete(Vec::new());
        assert_eq!(d.min(), 0.0);
        assert_eq!(d.max(), 0.0);
    }

    #[test]
    fn default_is_percent_scale() {
        assert_eq!(RangeDomain::default(), RangeDomain::continuous(0.0, 100.0, 1.0));
    }
}
