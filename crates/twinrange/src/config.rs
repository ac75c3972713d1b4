#![forbid(unsafe_code)]

//! Slider configuration as data.
//!
//! [`SliderConfig`] describes a domain, the initial pair, and the behavior
//! switches. It loads from TOML or JSON and can be overridden from the
//! environment.
//!
//! ```toml
//! allow_push = false
//! initial = [20.0, 80.0]
//!
//! [domain]
//! min = 0.0
//! max = 100.0
//! step = 5.0
//! ```
//!
//! ```toml
//! [domain]
//! fixed_values = [50.0, 250.0, 500.0, 750.0, 1000.0]
//! ```
//!
//! Missing keys take their defaults, so an empty document yields
//! `SliderConfig::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use twinrange_core::drag::DragEndPolicy;
use twinrange_core::geometry::Orientation;
use twinrange_widgets::{
    HandlePair, RangeDomain, RangeSlider, SliderOptions, ThumbGap, ValueOwnership,
};

use crate::error::{Error, Result};
use crate::source::{DomainSource, checked};

/// Domain as written in a config file. Untagged: the keys decide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainConfig {
    Fixed {
        fixed_values: Vec<f64>,
    },
    Continuous {
        min: f64,
        max: f64,
        #[serde(default = "default_step")]
        step: f64,
    },
}

fn default_step() -> f64 {
    1.0
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self::Continuous {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

impl From<&DomainConfig> for RangeDomain {
    fn from(cfg: &DomainConfig) -> Self {
        match cfg {
            DomainConfig::Fixed { fixed_values } => RangeDomain::discrete(fixed_values.clone()),
            DomainConfig::Continuous { min, max, step } => {
                RangeDomain::continuous(*min, *max, *step)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationConfig {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipConfig {
    #[default]
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEndConfig {
    #[default]
    AllReleased,
    AtMostOneActive,
}

/// Serializable slider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub domain: DomainConfig,
    /// Initial `[min, max]`. Defaults to the domain bounds.
    pub initial: Option<[f64; 2]>,
    pub allow_push: bool,
    /// Visual handle separation in percent of the track.
    pub thumb_gap_percent: f64,
    /// Visual handle separation in pixels. Overrides the percent gap.
    pub thumb_gap_px: Option<f32>,
    pub orientation: OrientationConfig,
    pub disabled: bool,
    pub editable: bool,
    pub show_inputs: bool,
    pub tab_navigation: bool,
    pub ownership: OwnershipConfig,
    pub drag_end: DragEndConfig,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            domain: DomainConfig::default(),
            initial: None,
            allow_push: true,
            thumb_gap_percent: 0.0,
            thumb_gap_px: None,
            orientation: OrientationConfig::default(),
            disabled: false,
            editable: false,
            show_inputs: false,
            tab_navigation: true,
            ownership: OwnershipConfig::default(),
            drag_end: DragEndConfig::default(),
        }
    }
}

impl SliderConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(Error::Toml)
    }

    /// Load from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(Error::Json)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON (for diagnostics dumps).
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::Json)
    }

    /// Defaults with environment overrides applied.
    ///
    /// Reads:
    /// - `TWINRANGE_ALLOW_PUSH`: "1"/"true" to push, anything else to clamp
    /// - `TWINRANGE_THUMB_GAP_PERCENT`: visual gap in percent
    /// - `TWINRANGE_DISABLE_TAB_NAV`: "1"/"true" to leave Tab to the host
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Apply environment overrides on top of `self`.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a custom lookup (for tests).
    #[must_use]
    pub fn with_env_lookup<F>(mut self, get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = get_env("TWINRANGE_ALLOW_PUSH") {
            self.allow_push = is_truthy(&val);
        }

        if let Some(val) = get_env("TWINRANGE_THUMB_GAP_PERCENT")
            && let Ok(pct) = val.trim().parse::<f64>()
        {
            self.thumb_gap_percent = pct;
        }

        if let Some(val) = get_env("TWINRANGE_DISABLE_TAB_NAV") {
            self.tab_navigation = !is_truthy(&val);
        }

        self.validated()
    }

    /// Clamp option values to safe ranges.
    ///
    /// - `thumb_gap_percent` into `0..=100`, NaN to 0
    /// - a negative or NaN `thumb_gap_px` is dropped
    ///
    /// The domain is left alone; its problems surface as diagnostics.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.thumb_gap_percent = if self.thumb_gap_percent.is_nan() {
            0.0
        } else {
            self.thumb_gap_percent.clamp(0.0, 100.0)
        };
        self.thumb_gap_px = self.thumb_gap_px.filter(|px| *px >= 0.0);
        self
    }

    /// The configured domain.
    #[must_use]
    pub fn domain(&self) -> RangeDomain {
        RangeDomain::from(&self.domain)
    }

    /// The initial pair, or the domain bounds.
    #[must_use]
    pub fn initial(&self) -> HandlePair {
        match self.initial {
            Some([min, max]) => HandlePair::new(min, max),
            None => {
                let domain = self.domain();
                HandlePair::new(domain.min(), domain.max())
            }
        }
    }

    /// Behavior switches as [`SliderOptions`].
    #[must_use]
    pub fn options(&self) -> SliderOptions {
        let thumb_gap = match self.thumb_gap_px {
            Some(px) => ThumbGap::Pixels(px),
            None => ThumbGap::Percent(self.thumb_gap_percent),
        };
        SliderOptions::default()
            .with_allow_push(self.allow_push)
            .with_thumb_gap(thumb_gap)
            .with_orientation(match self.orientation {
                OrientationConfig::Horizontal => Orientation::Horizontal,
                OrientationConfig::Vertical => Orientation::Vertical,
            })
            .with_disabled(self.disabled)
            .with_editable(self.editable)
            .with_show_inputs(self.show_inputs)
            .with_tab_navigation(self.tab_navigation)
            .with_ownership(match self.ownership {
                OwnershipConfig::Internal => ValueOwnership::Internal,
                OwnershipConfig::External => ValueOwnership::External,
            })
            .with_drag_end(match self.drag_end {
                DragEndConfig::AllReleased => DragEndPolicy::AllReleased,
                DragEndConfig::AtMostOneActive => DragEndPolicy::AtMostOneActive,
            })
    }

    /// Build a slider. Never fails: problems land in
    /// [`RangeSlider::diagnostics`].
    #[must_use]
    pub fn build(&self) -> RangeSlider {
        RangeSlider::new(self.domain(), self.initial(), self.options())
    }
}

impl DomainSource for SliderConfig {
    fn fetch_domain(&self) -> Result<RangeDomain> {
        checked(self.domain())
    }
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim();
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_toml_is_default() {
        let cfg = SliderConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SliderConfig::default());
        assert_eq!(cfg.domain(), RangeDomain::continuous(0.0, 100.0, 1.0));
        assert_eq!(cfg.initial(), HandlePair::new(0.0, 100.0));
    }

    #[test]
    fn continuous_domain_without_step() {
        let cfg = SliderConfig::from_toml_str("[domain]\nmin = 10.0\nmax = 20.0\n").unwrap();
        assert_eq!(cfg.domain(), RangeDomain::continuous(10.0, 20.0, 1.0));
    }

    #[test]
    fn fixed_domain_from_json() {
        let cfg = SliderConfig::from_json_str(
            r#"{"domain": {"fixed_values": [1.0, 2.0, 4.0]}, "initial": [2.0, 4.0]}"#,
        )
        .unwrap();
        assert_eq!(cfg.domain(), RangeDomain::discrete(vec![1.0, 2.0, 4.0]));
        assert_eq!(cfg.initial(), HandlePair::new(2.0, 4.0));
    }

    #[test]
    fn enums_use_snake_case() {
        let cfg = SliderConfig::from_toml_str(
            "orientation = \"vertical\"\nownership = \"external\"\ndrag_end = \"at_most_one_active\"\n",
        )
        .unwrap();
        let opts = cfg.options();
        assert_eq!(opts.orientation, Orientation::Vertical);
        assert_eq!(opts.ownership, ValueOwnership::External);
        assert_eq!(opts.drag_end, DragEndPolicy::AtMostOneActive);
    }

    #[test]
    fn bad_toml_is_toml_error() {
        let err = SliderConfig::from_toml_str("allow_push = \"maybe\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn bad_json_is_json_error() {
        let err = SliderConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn validated_clamps_gaps() {
        let cfg = SliderConfig {
            thumb_gap_percent: 250.0,
            thumb_gap_px: Some(-3.0),
            ..SliderConfig::default()
        }
        .validated();
        assert_eq!(cfg.thumb_gap_percent, 100.0);
        assert_eq!(cfg.thumb_gap_px, None);

        let nan = SliderConfig {
            thumb_gap_percent: f64::NAN,
            ..SliderConfig::default()
        }
        .validated();
        assert_eq!(nan.thumb_gap_percent, 0.0);
    }

    #[test]
    fn pixel_gap_overrides_percent() {
        let cfg = SliderConfig {
            thumb_gap_percent: 5.0,
            thumb_gap_px: Some(12.0),
            ..SliderConfig::default()
        };
        assert_eq!(cfg.options().thumb_gap, ThumbGap::Pixels(12.0));
    }

    #[test]
    fn env_overrides() {
        let cfg = SliderConfig::default().with_env_lookup(lookup(&[
            ("TWINRANGE_ALLOW_PUSH", "false"),
            ("TWINRANGE_THUMB_GAP_PERCENT", "150"),
            ("TWINRANGE_DISABLE_TAB_NAV", "1"),
        ]));
        assert!(!cfg.allow_push);
        assert_eq!(cfg.thumb_gap_percent, 100.0);
        assert!(!cfg.tab_navigation);
    }

    #[test]
    fn env_ignores_unparseable_gap() {
        let cfg = SliderConfig::default()
            .with_env_lookup(lookup(&[("TWINRANGE_THUMB_GAP_PERCENT", "wide")]));
        assert_eq!(cfg.thumb_gap_percent, 0.0);
        assert!(cfg.allow_push);
        assert!(cfg.tab_navigation);
    }

    #[test]
    fn build_reports_diagnostics_instead_of_failing() {
        let cfg = SliderConfig {
            domain: DomainConfig::Continuous {
                min: 5.0,
                max: 5.0,
                step: 1.0,
            },
            ..SliderConfig::default()
        };
        let slider = cfg.build();
        assert!(slider.diagnostics().has_domain_errors());
        assert!(matches!(cfg.fetch_domain(), Err(Error::Config(_))));
    }

    #[test]
    fn json_dump_reloads() {
        let cfg = SliderConfig {
            domain: DomainConfig::Fixed {
                fixed_values: vec![0.0, 0.5, 1.0],
            },
            allow_push: false,
            ..SliderConfig::default()
        };
        let json = cfg.to_json_string().unwrap();
        assert_eq!(SliderConfig::from_json_str(&json).unwrap(), cfg);
    }
}
