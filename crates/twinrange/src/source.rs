#![forbid(unsafe_code)]

//! The boundary to whatever supplies a slider's domain.
//!
//! A host may read the domain from a file, a settings service, or a
//! constant. The engine only sees the [`DomainSource`] trait.

use twinrange_core::listener::DocumentListeners;
use twinrange_widgets::{HandlePair, RangeDomain, RangeSlider, SliderOptions};

use crate::error::{Error, Result};

/// Supplies a [`RangeDomain`] at setup time.
pub trait DomainSource {
    /// Fetch the domain. Implementations should return
    /// [`Error::Config`] for a domain that fails validation.
    fn fetch_domain(&self) -> Result<RangeDomain>;

    /// Fetch the domain and build a slider on it.
    ///
    /// `initial` defaults to the full range.
    fn build_slider(
        &self,
        initial: Option<HandlePair>,
        options: SliderOptions,
    ) -> Result<RangeSlider> {
        let domain = self.fetch_domain()?;
        let initial = initial.unwrap_or_else(|| HandlePair::new(domain.min(), domain.max()));
        Ok(RangeSlider::new(domain, initial, options))
    }

    /// Like [`build_slider`](Self::build_slider) with host listeners.
    fn build_slider_with_listeners<L: DocumentListeners>(
        &self,
        initial: Option<HandlePair>,
        options: SliderOptions,
        listeners: L,
    ) -> Result<RangeSlider<L>>
    where
        Self: Sized,
    {
        let domain = self.fetch_domain()?;
        let initial = initial.unwrap_or_else(|| HandlePair::new(domain.min(), domain.max()));
        Ok(RangeSlider::with_listeners(domain, initial, options, listeners))
    }
}

/// Reject a domain whose validation reports any error.
pub fn checked(domain: RangeDomain) -> Result<RangeDomain> {
    match domain.validate().into_iter().next() {
        Some(err) => Err(Error::Config(err)),
        None => Ok(domain),
    }
}

/// A domain known up front.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDomain(pub RangeDomain);

impl StaticDomain {
    #[must_use]
    pub fn new(domain: RangeDomain) -> Self {
        Self(domain)
    }
}

impl From<RangeDomain> for StaticDomain {
    fn from(domain: RangeDomain) -> Self {
        Self(domain)
    }
}

impl DomainSource for StaticDomain {
    fn fetch_domain(&self) -> Result<RangeDomain> {
        checked(self.0.clone())
    }
}

impl<S: DomainSource + ?Sized> DomainSource for &S {
    fn fetch_domain(&self) -> Result<RangeDomain> {
        (**self).fetch_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinrange_widgets::ConfigError;

    #[test]
    fn static_domain_passes_valid() {
        let source = StaticDomain::new(RangeDomain::continuous(0.0, 10.0, 1.0));
        assert_eq!(
            source.fetch_domain().unwrap(),
            RangeDomain::continuous(0.0, 10.0, 1.0)
        );
    }

    #[test]
    fn static_domain_rejects_invalid() {
        let source = StaticDomain::from(RangeDomain::discrete(vec![3.0, 1.0]));
        match source.fetch_domain() {
            Err(Error::Config(ConfigError::UnsortedFixedValues { index })) => {
                assert_eq!(index, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn build_slider_defaults_to_full_range() {
        let source = StaticDomain::new(RangeDomain::discrete(vec![5.0, 10.0, 20.0]));
        let slider = source.build_slider(None, SliderOptions::default()).unwrap();
        assert_eq!(slider.value(), HandlePair::new(5.0, 20.0));
        assert!(slider.diagnostics().is_empty());
    }

    struct Offline;

    impl DomainSource for Offline {
        fn fetch_domain(&self) -> Result<RangeDomain> {
            Err(Error::Source("offline".into()))
        }
    }

    #[test]
    fn source_failure_propagates() {
        let err = Offline
            .build_slider(None, SliderOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }
}
