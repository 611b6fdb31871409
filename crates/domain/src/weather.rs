//! Normalized weather data model
//!
//! Providers return a [`WeatherFields`] with whatever measurements they
//! have; the orchestrating service wraps it into a [`WeatherReport`]
//! with provider and cache bookkeeping. The report is what gets cached
//! and returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::StandardCondition;
use crate::provider::ProviderId;

/// Unit of a temperature measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius
    #[serde(rename = "C")]
    Celsius,
    /// Degrees Fahrenheit
    #[serde(rename = "F")]
    Fahrenheit,
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius => f.write_str("C"),
            Self::Fahrenheit => f.write_str("F"),
        }
    }
}

/// A temperature measurement with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: TemperatureUnit,
}

impl Temperature {
    /// Temperature in degrees Celsius
    #[must_use]
    pub const fn celsius(value: f64) -> Self {
        Self {
            value,
            unit: TemperatureUnit::Celsius,
        }
    }

    /// Temperature in degrees Fahrenheit
    #[must_use]
    pub const fn fahrenheit(value: f64) -> Self {
        Self {
            value,
            unit: TemperatureUnit::Fahrenheit,
        }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°{}", self.value, self.unit)
    }
}

/// A percentage measurement (humidity, cloud cover)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    pub value: f64,
}

impl Percentage {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.value)
    }
}

/// A standardized condition plus the provider's raw wording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    /// Condition mapped into the shared vocabulary
    pub value: StandardCondition,
    /// The provider's original condition string, when it had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
}

impl Conditions {
    #[must_use]
    pub fn new(value: StandardCondition, original: impl Into<String>) -> Self {
        Self {
            value,
            original: Some(original.into()),
        }
    }
}

/// The measurements a provider was able to supply, all optional
///
/// Providers differ in coverage: NWS observations rarely include
/// sunrise/sunset, OpenWeather never reports cloud layers the NWS way.
/// Absent fields are omitted from the serialized record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dew_point: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudiness: Option<Percentage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Conditions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<DateTime<Utc>>,
}

impl WeatherFields {
    /// True when the provider supplied no measurement at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.dew_point.is_none()
            && self.humidity.is_none()
            && self.cloudiness.is_none()
            && self.conditions.is_none()
            && self.sunrise.is_none()
            && self.sunset.is_none()
    }
}

/// A normalized weather result with provider and cache bookkeeping
///
/// Freshly fetched reports carry `cached: false` and no timestamp; the
/// copy written to the cache carries `cached: true` and the write time,
/// so a later cache hit is self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Which provider produced the data
    pub provider: ProviderId,
    /// Whether this copy was served from the cache
    pub cached: bool,
    /// When the cached copy was written, absent on fresh results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub fields: WeatherFields,
}

impl WeatherReport {
    /// Build a freshly fetched report (not served from cache)
    #[must_use]
    pub const fn fresh(provider: ProviderId, fields: WeatherFields) -> Self {
        Self {
            provider,
            cached: false,
            cached_at: None,
            fields,
        }
    }

    /// The variant of this report that gets written to the cache
    #[must_use]
    pub fn as_cached(&self, cached_at: DateTime<Utc>) -> Self {
        Self {
            provider: self.provider.clone(),
            cached: true,
            cached_at: Some(cached_at),
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_fields() -> WeatherFields {
        WeatherFields {
            temperature: Some(Temperature::celsius(21.4)),
            dew_point: Some(Temperature::celsius(12.0)),
            humidity: Some(Percentage::new(55.0)),
            cloudiness: Some(Percentage::new(40.0)),
            conditions: Some(Conditions::new(StandardCondition::Clear, "Sunny")),
            sunrise: None,
            sunset: None,
        }
    }

    #[test]
    fn fresh_report_has_no_cache_marks() {
        let report = WeatherReport::fresh(ProviderId::new("nws"), sample_fields());
        assert!(!report.cached);
        assert!(report.cached_at.is_none());
        assert_eq!(report.provider.as_str(), "nws");
    }

    #[test]
    fn cached_variant_keeps_fields() {
        let report = WeatherReport::fresh(ProviderId::new("nws"), sample_fields());
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let cached = report.as_cached(at);

        assert!(cached.cached);
        assert_eq!(cached.cached_at, Some(at));
        assert_eq!(cached.fields, report.fields);
        assert_eq!(cached.provider, report.provider);
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let report = WeatherReport::fresh(
            ProviderId::new("nws"),
            WeatherFields {
                temperature: Some(Temperature::celsius(10.0)),
                ..WeatherFields::default()
            },
        );
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(!json.contains("sunrise"));
        assert!(!json.contains("cached_at"));
        assert!(json.contains("\"cached\":false"));
    }

    #[test]
    fn report_roundtrips_through_json() {
        let report = WeatherReport::fresh(ProviderId::new("openweather"), sample_fields());
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let cached = report.as_cached(at);

        let json = serde_json::to_string(&cached).expect("serialize");
        let back: WeatherReport = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, cached);
    }

    #[test]
    fn temperature_units_serialize_short() {
        let json = serde_json::to_string(&Temperature::fahrenheit(70.0)).expect("serialize");
        assert_eq!(json, "{\"value\":70.0,\"unit\":\"F\"}");
    }

    #[test]
    fn conditions_keep_original_wording() {
        let conditions = Conditions::new(StandardCondition::Clear, "Sunny");
        assert_eq!(conditions.value, StandardCondition::Clear);
        assert_eq!(conditions.original.as_deref(), Some("Sunny"));
    }

    #[test]
    fn empty_fields_detection() {
        assert!(WeatherFields::default().is_empty());
        assert!(!sample_fields().is_empty());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Temperature::celsius(21.44).to_string(), "21.4°C");
        assert_eq!(Percentage::new(55.4).to_string(), "55%");
    }
}
