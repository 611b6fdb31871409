//! OpenWeather One Call client
//!
//! HTTP client for the OpenWeather One Call 3.0 API. Asks for metric
//! units, so temperatures arrive in Celsius.

use chrono::DateTime;
use reqwest::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use domain::{Conditions, Percentage, Temperature, WeatherFields};

use crate::condition::standardize_condition_id;
use crate::models::{CurrentConditions, OneCallResponse};

/// OpenWeather client errors
#[derive(Debug, Error)]
pub enum OpenWeatherError {
    /// Transport failure before any HTTP status arrived
    #[error("Connection failed: {0}")]
    Network(String),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a non-success status
    #[error("Request failed with status code {status}")]
    Http {
        status: u16,
        /// Raw Retry-After header value in seconds, when present
        retry_after: Option<u64>,
        endpoint: String,
    },

    /// The response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// The service answered but the payload lacked usable data
    #[error("{0}")]
    MissingData(String),

    /// The client was constructed without an API key
    #[error("OpenWeather provider requires an API key")]
    MissingApiKey,
}

/// OpenWeather client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    /// API base URL (default: <https://api.openweathermap.org>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// One Call API key, required
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// OpenWeather HTTP client
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new OpenWeather client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        if config.api_key.is_empty() {
            return Err(OpenWeatherError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OpenWeatherError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions for the coordinates
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails or the response carries
    /// no current-conditions block.
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    pub async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherFields, OpenWeatherError> {
        let url = self.onecall_url();
        debug!(url = %url, "Fetching current conditions from OpenWeather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.config.api_key.clone()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenWeatherError::Http {
                status: status.as_u16(),
                retry_after: retry_after_secs(response.headers()),
                endpoint: url,
            });
        }

        let payload: OneCallResponse = response
            .json()
            .await
            .map_err(|e| OpenWeatherError::Parse(e.to_string()))?;

        let current = payload.current.ok_or_else(|| {
            OpenWeatherError::MissingData("No current weather data in response".to_string())
        })?;

        let fields = convert_current(current);
        if fields.is_empty() {
            return Err(OpenWeatherError::MissingData(
                "Invalid weather data".to_string(),
            ));
        }
        Ok(fields)
    }

    fn onecall_url(&self) -> String {
        format!("{}/data/3.0/onecall", self.config.base_url)
    }
}

fn transport_error(err: reqwest::Error) -> OpenWeatherError {
    if err.is_timeout() {
        OpenWeatherError::Timeout
    } else {
        OpenWeatherError::Network(err.to_string())
    }
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// Normalize the `current` block into [`WeatherFields`]
fn convert_current(current: CurrentConditions) -> WeatherFields {
    WeatherFields {
        temperature: current.temp.map(Temperature::celsius),
        dew_point: current.dew_point.map(Temperature::celsius),
        humidity: current.humidity.map(Percentage::new),
        cloudiness: current.clouds.map(Percentage::new),
        conditions: current.weather.first().map(|summary| {
            Conditions::new(
                standardize_condition_id(summary.id),
                summary.description.as_str(),
            )
        }),
        sunrise: current
            .sunrise
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
        sunset: current
            .sunset
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0)),
    }
}
