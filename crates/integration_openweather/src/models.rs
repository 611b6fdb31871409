//! OpenWeather One Call response payloads

use serde::{Deserialize, Serialize};

/// Response of `/data/3.0/onecall`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub current: Option<CurrentConditions>,
}

/// The `current` block, metric units requested
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentConditions {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub dew_point: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub clouds: Option<f64>,
    /// Unix timestamp, UTC
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Unix timestamp, UTC
    #[serde(default)]
    pub sunset: Option<i64>,
    #[serde(default)]
    pub weather: Vec<WeatherSummary>,
}

/// One entry of the `weather` array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Numeric condition id, see <https://openweathermap.org/weather-conditions>
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_block_parses_the_fields_we_read() {
        let raw = serde_json::json!({
            "lat": 51.5074,
            "lon": -0.1278,
            "timezone": "Europe/London",
            "current": {
                "dt": 1717243000,
                "sunrise": 1717213200,
                "sunset": 1717272000,
                "temp": 20.0,
                "dew_point": 10.0,
                "humidity": 80,
                "clouds": 25,
                "weather": [
                    { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
                ]
            }
        });

        let response: OneCallResponse = serde_json::from_value(raw).expect("payload should parse");
        let current = response.current.expect("current block");

        assert_eq!(current.temp, Some(20.0));
        assert_eq!(current.dew_point, Some(10.0));
        assert_eq!(current.humidity, Some(80.0));
        assert_eq!(current.clouds, Some(25.0));
        assert_eq!(current.sunrise, Some(1_717_213_200));
        assert_eq!(current.weather.len(), 1);
        assert_eq!(current.weather[0].id, 800);
        assert_eq!(current.weather[0].description, "clear sky");
    }

    #[test]
    fn test_missing_current_block_parses_to_none() {
        let response: OneCallResponse =
            serde_json::from_str(r#"{"lat": 0.0, "lon": 0.0}"#).expect("payload should parse");
        assert!(response.current.is_none());
    }
}
