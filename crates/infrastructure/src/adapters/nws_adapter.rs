//! NWS provider adapter
//!
//! Implements the provider port over the api.weather.gov client. The
//! service is free and keyless but only answers for United States
//! territory, so coverage is a bounding-box check over the
//! continental US.

use std::ops::RangeInclusive;

use application::{error::ApplicationError, ports::WeatherProviderPort};
use async_trait::async_trait;
use domain::{
    GeoLocation, ProviderCapability, ProviderError, ProviderErrorCode, ProviderId, SupportedData,
    UnitSystem, WeatherFields,
};
use integration_nws::{NwsClient, NwsConfig, NwsError};
use tracing::{debug, instrument};

use super::status_error_code;

/// Continental-US bounding box served by api.weather.gov
const CONUS_LAT: RangeInclusive<f64> = 24.743_319_5..=49.345_786_8;
const CONUS_LNG: RangeInclusive<f64> = -124.784_407_9..=-66.951_381_2;

/// Provider adapter for the National Weather Service
#[derive(Debug)]
pub struct NwsAdapter {
    id: ProviderId,
    client: NwsClient,
}

impl NwsAdapter {
    /// Create an adapter with default client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(NwsConfig::default())
    }

    /// Create an adapter with a custom client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn with_config(config: NwsConfig) -> Result<Self, ApplicationError> {
        let client =
            NwsClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self {
            id: ProviderId::new("nws"),
            client,
        })
    }

    /// Map a client failure into the provider error taxonomy
    fn classify(&self, error: NwsError) -> ProviderError {
        let message = error.to_string();
        match error {
            NwsError::Network(_) => {
                ProviderError::new(ProviderErrorCode::Network, self.id.clone(), message)
            },
            NwsError::Timeout => {
                ProviderError::new(ProviderErrorCode::Timeout, self.id.clone(), message)
            },
            NwsError::Http {
                status,
                retry_after,
                endpoint,
            } => {
                let mut mapped =
                    ProviderError::new(status_error_code(status), self.id.clone(), message)
                        .with_status(status)
                        .with_endpoint(endpoint);
                if let Some(secs) = retry_after {
                    mapped = mapped.with_retry_after_ms(secs.saturating_mul(1000));
                }
                mapped
            },
            NwsError::Parse(_) => {
                ProviderError::new(ProviderErrorCode::Parse, self.id.clone(), message)
            },
            NwsError::MissingData(_) => {
                ProviderError::new(ProviderErrorCode::Unavailable, self.id.clone(), message)
            },
        }
    }
}

#[async_trait]
impl WeatherProviderPort for NwsAdapter {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn capability(&self) -> ProviderCapability {
        ProviderCapability {
            supports: SupportedData {
                current: true,
                alerts: true,
                ..SupportedData::default()
            },
            regions: vec!["US".to_owned()],
            units: vec![UnitSystem::Metric],
            ..ProviderCapability::default()
        }
    }

    fn covers(&self, location: &GeoLocation) -> bool {
        CONUS_LAT.contains(&location.latitude()) && CONUS_LNG.contains(&location.longitude())
    }

    #[instrument(
        skip(self, location),
        fields(provider = "nws", lat = location.latitude(), lon = location.longitude())
    )]
    async fn fetch_weather(&self, location: &GeoLocation) -> Result<WeatherFields, ProviderError> {
        match self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
        {
            Ok(fields) => {
                debug!(temperature = ?fields.temperature, "Retrieved current conditions");
                Ok(fields)
            },
            Err(error) => {
                let mapped = self.classify(error);
                debug!(code = %mapped.code, "Provider call failed");
                Err(mapped)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> NwsAdapter {
        NwsAdapter::new().expect("adapter")
    }

    #[test]
    fn new_creates_adapter() {
        assert_eq!(adapter().id().as_str(), "nws");
    }

    #[test]
    fn capability_is_region_restricted() {
        let capability = adapter().capability();
        assert!(capability.supports.current);
        assert!(capability.supports.alerts);
        assert!(!capability.supports.hourly);
        assert!(!capability.supports.daily);
        assert_eq!(capability.regions, vec!["US".to_owned()]);
        assert_eq!(capability.units, vec![UnitSystem::Metric]);
    }

    #[test]
    fn covers_continental_us() {
        assert!(adapter().covers(&GeoLocation::new_york()));
    }

    #[test]
    fn does_not_cover_europe() {
        assert!(!adapter().covers(&GeoLocation::berlin()));
        assert!(!adapter().covers(&GeoLocation::london()));
    }

    #[test]
    fn bounding_box_edges_are_inclusive() {
        let adapter = adapter();
        let southwest = GeoLocation::new_unchecked(24.743_319_5, -124.784_407_9);
        let northeast = GeoLocation::new_unchecked(49.345_786_8, -66.951_381_2);
        assert!(adapter.covers(&southwest));
        assert!(adapter.covers(&northeast));

        let just_south = GeoLocation::new_unchecked(24.74, -100.0);
        let just_east = GeoLocation::new_unchecked(40.0, -66.9);
        assert!(!adapter.covers(&just_south));
        assert!(!adapter.covers(&just_east));
    }

    #[test]
    fn classify_network_and_timeout() {
        let adapter = adapter();

        let network = adapter.classify(NwsError::Network("connection refused".to_owned()));
        assert_eq!(network.code, ProviderErrorCode::Network);
        assert_eq!(network.provider.as_str(), "nws");

        let timeout = adapter.classify(NwsError::Timeout);
        assert_eq!(timeout.code, ProviderErrorCode::Timeout);
        assert_eq!(timeout.message, "Request timed out");
    }

    #[test]
    fn classify_rate_limit_carries_retry_hint() {
        let mapped = adapter().classify(NwsError::Http {
            status: 429,
            retry_after: Some(120),
            endpoint: "https://api.weather.gov/points/40.7,-74.0".to_owned(),
        });

        assert_eq!(mapped.code, ProviderErrorCode::RateLimit);
        assert_eq!(mapped.status, Some(429));
        assert_eq!(mapped.retry_after_ms, Some(120_000));
        assert_eq!(
            mapped.endpoint.as_deref(),
            Some("https://api.weather.gov/points/40.7,-74.0")
        );
    }

    #[test]
    fn classify_http_statuses() {
        let adapter = adapter();
        let http = |status: u16| NwsError::Http {
            status,
            retry_after: None,
            endpoint: "https://api.weather.gov/points/1,2".to_owned(),
        };

        assert_eq!(
            adapter.classify(http(404)).code,
            ProviderErrorCode::NotFound
        );
        assert_eq!(
            adapter.classify(http(400)).code,
            ProviderErrorCode::Validation
        );
        assert_eq!(
            adapter.classify(http(422)).code,
            ProviderErrorCode::Validation
        );
        assert_eq!(
            adapter.classify(http(503)).code,
            ProviderErrorCode::Upstream
        );
        assert_eq!(
            adapter.classify(http(302)).code,
            ProviderErrorCode::Unavailable
        );
    }

    #[test]
    fn classify_parse_and_missing_data() {
        let adapter = adapter();

        let parse = adapter.classify(NwsError::Parse("unexpected token".to_owned()));
        assert_eq!(parse.code, ProviderErrorCode::Parse);

        let missing = adapter.classify(NwsError::MissingData("No stations found".to_owned()));
        assert_eq!(missing.code, ProviderErrorCode::Unavailable);
        assert_eq!(missing.message, "No stations found");
    }
}
