//! Weather provider port
//!
//! Contract implemented by each upstream provider client. The
//! orchestrator only ever talks to providers through this interface.

use async_trait::async_trait;
use domain::{GeoLocation, ProviderCapability, ProviderError, ProviderId, WeatherFields};
#[cfg(test)]
use mockall::automock;

/// Port for a single upstream weather provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProviderPort: Send + Sync {
    /// Stable identifier used for registry lookups and result tagging
    fn id(&self) -> &ProviderId;

    /// Static capability descriptor registered at startup
    fn capability(&self) -> ProviderCapability;

    /// Whether this provider can serve the given location
    ///
    /// Region-restricted providers override this with a membership test.
    fn covers(&self, _location: &GeoLocation) -> bool {
        true
    }

    /// Fetch current weather for a location
    ///
    /// Errors carry enough information to classify the failure and to
    /// feed the outcome reporter.
    async fn fetch_weather(&self, location: &GeoLocation) -> Result<WeatherFields, ProviderError>;
}

impl std::fmt::Debug for dyn WeatherProviderPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherProviderPort")
            .field("id", &self.id())
            .finish_non_exhaustive()
    }
}
