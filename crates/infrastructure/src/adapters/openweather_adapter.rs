//! OpenWeather provider adapter
//!
//! Implements the provider port over the One Call client. OpenWeather
//! serves any coordinate, so the default coverage check applies.

use application::{error::ApplicationError, ports::WeatherProviderPort};
use async_trait::async_trait;
use domain::{
    GeoLocation, ProviderCapability, ProviderError, ProviderErrorCode, ProviderId, SupportedData,
    UnitSystem, WeatherFields,
};
use integration_openweather::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
use tracing::{debug, instrument};

use super::status_error_code;

/// Provider adapter for OpenWeather One Call
#[derive(Debug)]
pub struct OpenWeatherAdapter {
    id: ProviderId,
    client: OpenWeatherClient,
}

impl OpenWeatherAdapter {
    /// Create an adapter for the given API key, default endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client fails
    /// to initialize.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApplicationError> {
        Self::with_config(OpenWeatherConfig {
            api_key: api_key.into(),
            ..OpenWeatherConfig::default()
        })
    }

    /// Create an adapter with a custom client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client fails
    /// to initialize.
    pub fn with_config(config: OpenWeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self {
            id: ProviderId::new("openweather"),
            client,
        })
    }

    /// Map a client failure into the provider error taxonomy
    fn classify(&self, error: OpenWeatherError) -> ProviderError {
        let message = error.to_string();
        match error {
            OpenWeatherError::Network(_) => {
                ProviderError::new(ProviderErrorCode::Network, self.id.clone(), message)
            },
            OpenWeatherError::Timeout => {
                ProviderError::new(ProviderErrorCode::Timeout, self.id.clone(), message)
            },
            OpenWeatherError::Http {
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
            OpenWeatherError::Parse(_) => {
                ProviderError::new(ProviderErrorCode::Parse, self.id.clone(), message)
            },
            OpenWeatherError::MissingData(_) | OpenWeatherError::MissingApiKey => {
                ProviderError::new(ProviderErrorCode::Unavailable, self.id.clone(), message)
            },
        }
    }
}

#[async_trait]
impl WeatherProviderPort for OpenWeatherAdapter {
    fn id(&self) -> &ProviderId {
        &self.id
    }

    fn capability(&self) -> ProviderCapability {
        ProviderCapability {
            supports: SupportedData {
                current: true,
                hourly: true,
                daily: true,
                alerts: true,
            },
            units: vec![
                UnitSystem::Standard,
                UnitSystem::Metric,
                UnitSystem::Imperial,
            ],
            ..ProviderCapability::default()
        }
    }

    #[instrument(
        skip(self, location),
        fields(provider = "openweather", lat = location.latitude(), lon = location.longitude())
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
