//! Standardized weather condition vocabulary
//!
//! Every provider reports conditions in its own dialect (free-text
//! descriptions, icon codes, numeric condition ids). Integration crates
//! translate those into this closed vocabulary so callers never see
//! provider-specific strings; the raw value is still preserved alongside
//! the standardized one in [`crate::weather::Conditions`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standardized weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardCondition {
    Blizzard,
    Breezy,
    Clear,
    Cloudy,
    Cold,
    Drizzle,
    Dust,
    Fair,
    Flurries,
    Fog,
    #[serde(rename = "Freezing Drizzle")]
    FreezingDrizzle,
    #[serde(rename = "Freezing Rain")]
    FreezingRain,
    Hail,
    Haze,
    #[serde(rename = "Heavy Rain")]
    HeavyRain,
    #[serde(rename = "Heavy Snow")]
    HeavySnow,
    Hot,
    Hurricane,
    #[serde(rename = "Isolated Thunderstorms")]
    IsolatedThunderstorms,
    #[serde(rename = "Light Rain")]
    LightRain,
    #[serde(rename = "Light Snow")]
    LightSnow,
    Mist,
    Mixed,
    #[serde(rename = "Mostly Clear")]
    MostlyClear,
    #[serde(rename = "Mostly Cloudy")]
    MostlyCloudy,
    Overcast,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Rain,
    Sandstorm,
    Showers,
    Sleet,
    Smoke,
    Snow,
    Storm,
    Thunderstorms,
    Tornado,
    #[serde(rename = "Tropical Storm")]
    TropicalStorm,
    Windy,
    Unknown,
}

impl StandardCondition {
    /// Human-readable name, identical to the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blizzard => "Blizzard",
            Self::Breezy => "Breezy",
            Self::Clear => "Clear",
            Self::Cloudy => "Cloudy",
            Self::Cold => "Cold",
            Self::Drizzle => "Drizzle",
            Self::Dust => "Dust",
            Self::Fair => "Fair",
            Self::Flurries => "Flurries",
            Self::Fog => "Fog",
            Self::FreezingDrizzle => "Freezing Drizzle",
            Self::FreezingRain => "Freezing Rain",
            Self::Hail => "Hail",
            Self::Haze => "Haze",
            Self::HeavyRain => "Heavy Rain",
            Self::HeavySnow => "Heavy Snow",
            Self::Hot => "Hot",
            Self::Hurricane => "Hurricane",
            Self::IsolatedThunderstorms => "Isolated Thunderstorms",
            Self::LightRain => "Light Rain",
            Self::LightSnow => "Light Snow",
            Self::Mist => "Mist",
            Self::Mixed => "Mixed",
            Self::MostlyClear => "Mostly Clear",
            Self::MostlyCloudy => "Mostly Cloudy",
            Self::Overcast => "Overcast",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Rain => "Rain",
            Self::Sandstorm => "Sandstorm",
            Self::Showers => "Showers",
            Self::Sleet => "Sleet",
            Self::Smoke => "Smoke",
            Self::Snow => "Snow",
            Self::Storm => "Storm",
            Self::Thunderstorms => "Thunderstorms",
            Self::Tornado => "Tornado",
            Self::TropicalStorm => "Tropical Storm",
            Self::Windy => "Windy",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this condition signals severe weather
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(
            self,
            Self::Blizzard | Self::Hurricane | Self::Tornado | Self::TropicalStorm | Self::Storm
        )
    }
}

impl fmt::Display for StandardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
