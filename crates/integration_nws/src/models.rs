//! api.weather.gov response payloads
//!
//! Only the fields the client reads are modeled; everything else in
//! the GeoJSON envelopes is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Response of `/points/{lat},{lng}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsResponse {
    pub properties: PointsProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProperties {
    /// Absolute URL of the gridpoint's station collection
    pub observation_stations: String,
}

/// Response of the gridpoint station collection URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationFeature {
    /// Absolute station URL, e.g. `https://api.weather.gov/stations/KNYC`
    pub id: String,
}

/// Response of `{station}/observations/latest`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationResponse {
    #[serde(default)]
    pub properties: ObservationProperties,
}

/// Measurement block of a station observation
///
/// Stations frequently report partial data, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationProperties {
    #[serde(default)]
    pub temperature: Option<QuantitativeValue>,
    #[serde(default)]
    pub dewpoint: Option<QuantitativeValue>,
    #[serde(default)]
    pub relative_humidity: Option<QuantitativeValue>,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub cloud_layers: Option<Vec<CloudLayer>>,
}

/// A measured value with its WMO unit code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
}

/// One reported cloud layer, identified by its METAR amount code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudLayer {
    pub amount: String,
}
