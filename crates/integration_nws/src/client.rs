//! National Weather Service client
//!
//! HTTP client for api.weather.gov. A current-conditions lookup is a
//! three-step chain: resolve the gridpoint for the coordinates, pick
//! the nearest observation station, then read its latest observation.

use reqwest::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use domain::{Conditions, Percentage, Temperature, WeatherFields};

use crate::cloudiness::cloudiness_from_layers;
use crate::condition::{icon_code_from_url, standardize_condition, standardize_icon_code};
use crate::models::{
    ObservationProperties, ObservationResponse, PointsResponse, QuantitativeValue,
    StationsResponse,
};

/// NWS client errors
#[derive(Debug, Error)]
pub enum NwsError {
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
}

/// NWS client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NwsConfig {
    /// API base URL (default: <https://api.weather.gov>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header, required by api.weather.gov
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://api.weather.gov".to_string()
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    "weathermux (https://github.com/weathermux/weathermux)".to_string()
}

impl Default for NwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// api.weather.gov HTTP client
#[derive(Debug)]
pub struct NwsClient {
    client: Client,
    config: NwsConfig,
}

impl NwsClient {
    /// Create a new NWS client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: NwsConfig) -> Result<Self, NwsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NwsError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, NwsError> {
        Self::new(NwsConfig::default())
    }

    /// Fetch the latest observed conditions near the coordinates
    ///
    /// Coordinates are expected to be validated upstream; out-of-range
    /// values surface as HTTP errors from the points endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when any request of the chain fails, the
    /// gridpoint has no stations, or the observation carries no data.
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    pub async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherFields, NwsError> {
        let stations_url = self.fetch_stations_url(latitude, longitude).await?;
        let station_url = self.fetch_first_station(&stations_url).await?;
        let observation = self.fetch_latest_observation(&station_url).await?;
        convert_observation(observation.properties)
    }

    /// Resolve the gridpoint's station collection URL for a coordinate
    async fn fetch_stations_url(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, NwsError> {
        let url = self.points_url(latitude, longitude);
        let points: PointsResponse = self.get_json(&url).await?;
        Ok(points.properties.observation_stations)
    }

    /// Pick the first (nearest) station of the collection
    async fn fetch_first_station(&self, stations_url: &str) -> Result<String, NwsError> {
        let stations: StationsResponse = self.get_json(stations_url).await?;
        stations
            .features
            .into_iter()
            .next()
            .map(|feature| feature.id)
            .ok_or_else(|| NwsError::MissingData("No stations found".to_string()))
    }

    async fn fetch_latest_observation(
        &self,
        station_url: &str,
    ) -> Result<ObservationResponse, NwsError> {
        let url = format!("{station_url}/observations/latest");
        self.get_json(&url).await
    }

    fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{latitude},{longitude}", self.config.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, NwsError> {
        debug!(url = %url, "Requesting api.weather.gov");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NwsError::Http {
                status: status.as_u16(),
                retry_after: retry_after_secs(response.headers()),
                endpoint: url.to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NwsError::Parse(e.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> NwsError {
    if err.is_timeout() {
        NwsError::Timeout
    } else {
        NwsError::Network(err.to_string())
    }
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers.get(RETRY_AFTER)?.to_str().ok()?.trim().parse().ok()
}

/// Normalize an observation into [`WeatherFields`]
///
/// Null measurements are dropped rather than defaulted. An observation
/// with nothing usable at all is an error, not an empty record.
fn convert_observation(properties: ObservationProperties) -> Result<WeatherFields, NwsError> {
    let fields = WeatherFields {
        temperature: quantitative_temperature(properties.temperature.as_ref()),
        dew_point: quantitative_temperature(properties.dewpoint.as_ref()),
        humidity: properties
            .relative_humidity
            .as_ref()
            .and_then(|quantity| quantity.value)
            .map(Percentage::new),
        cloudiness: properties
            .cloud_layers
            .as_deref()
            .map(|layers| Percentage::new(cloudiness_from_layers(layers))),
        conditions: observation_conditions(&properties),
        sunrise: None,
        sunset: None,
    };

    if fields.is_empty() {
        return Err(NwsError::MissingData("Invalid observation data".to_string()));
    }
    Ok(fields)
}

/// Conditions from the text description, falling back to the icon code
fn observation_conditions(properties: &ObservationProperties) -> Option<Conditions> {
    if let Some(text) = properties
        .text_description
        .as_deref()
        .filter(|text| !text.is_empty())
    {
        return Some(Conditions::new(standardize_condition(text), text));
    }

    let icon = properties.icon.as_deref()?;
    let code = icon_code_from_url(icon)?;
    Some(Conditions::new(standardize_icon_code(code), code))
}

fn quantitative_temperature(quantity: Option<&QuantitativeValue>) -> Option<Temperature> {
    let quantity = quantity?;
    let value = quantity.value?;
    let temperature = match quantity.unit_code.as_deref() {
        Some("wmoUnit:degC") => Temperature::celsius(value),
        _ => Temperature::fahrenheit(value),
    };
    Some(temperature)
}
