//! NWS condition translation
//!
//! api.weather.gov describes conditions two ways: a free-text
//! `textDescription` and an icon URL whose path carries one of the 42
//! standardized icon codes. Both translate into [`StandardCondition`];
//! anything unrecognized becomes [`StandardCondition::Unknown`].

use domain::StandardCondition;
use tracing::debug;

/// Translate an NWS `textDescription` into the shared vocabulary
///
/// Compound descriptions ("Rain and Fog", "Snow/Sleet") fall back to
/// their parts, and the first part with a known translation wins.
#[must_use]
pub fn standardize_condition(text: &str) -> StandardCondition {
    if let Some(condition) = exact_condition(text) {
        return condition;
    }

    if text.contains(" and ") || text.contains('/') {
        for part in text.split(" and ").flat_map(|chunk| chunk.split('/')) {
            if let Some(condition) = exact_condition(part.trim()) {
                return condition;
            }
        }
    }

    debug!(condition = %text, "Unrecognized NWS condition text");
    StandardCondition::Unknown
}

fn exact_condition(text: &str) -> Option<StandardCondition> {
    let condition = match text {
        "Clear" | "Sunny" => StandardCondition::Clear,
        "Mostly Clear" | "Mostly Sunny" => StandardCondition::MostlyClear,
        "Partly Cloudy" | "Partly Sunny" => StandardCondition::PartlyCloudy,
        "Mostly Cloudy" => StandardCondition::MostlyCloudy,
        "Cloudy" => StandardCondition::Cloudy,
        "Overcast" => StandardCondition::Overcast,
        "Light Rain" => StandardCondition::LightRain,
        "Rain" => StandardCondition::Rain,
        "Heavy Rain" => StandardCondition::HeavyRain,
        "Light Snow" => StandardCondition::LightSnow,
        "Snow" => StandardCondition::Snow,
        "Heavy Snow" => StandardCondition::HeavySnow,
        "Fog" => StandardCondition::Fog,
        "Haze" => StandardCondition::Haze,
        "Mist" => StandardCondition::Mist,
        "Thunderstorm" | "Thunderstorms" => StandardCondition::Thunderstorms,
        "Windy" => StandardCondition::Windy,
        "Breezy" => StandardCondition::Breezy,
        "Sleet" => StandardCondition::Sleet,
        "Freezing Rain" => StandardCondition::FreezingRain,
        "Hail" => StandardCondition::Hail,
        "Rain/Snow" | "Mixed Precipitation" => StandardCondition::Mixed,
        "Tornado" => StandardCondition::Tornado,
        "Hurricane" => StandardCondition::Hurricane,
        "Tropical Storm" => StandardCondition::TropicalStorm,
        _ => return None,
    };
    Some(condition)
}

/// Translate one of the standardized NWS icon codes
///
/// Codes follow <https://api.weather.gov/icons>. The `wind_*` variants
/// report wind over sky cover.
#[must_use]
pub fn standardize_icon_code(code: &str) -> StandardCondition {
    match code {
        "skc" => StandardCondition::Clear,
        "few" => StandardCondition::MostlyClear,
        "sct" => StandardCondition::PartlyCloudy,
        "bkn" => StandardCondition::MostlyCloudy,
        "ovc" => StandardCondition::Overcast,
        "wind_skc" | "wind_few" | "wind_sct" | "wind_bkn" | "wind_ovc" => {
            StandardCondition::Windy
        }
        "rain" => StandardCondition::Rain,
        "rain_showers" | "rain_showers_hi" => StandardCondition::Showers,
        "snow" | "rain_snow" => StandardCondition::Snow,
        "rain_sleet" | "snow_sleet" | "sleet" => StandardCondition::Sleet,
        "rain_fzra" | "snow_fzra" | "fzra" => StandardCondition::FreezingRain,
        "tsra" | "tsra_sct" | "tsra_hi" => StandardCondition::Thunderstorms,
        "tornado" => StandardCondition::Tornado,
        "hurricane" => StandardCondition::Hurricane,
        "tropical_storm" => StandardCondition::TropicalStorm,
        "blizzard" => StandardCondition::Blizzard,
        "fog" => StandardCondition::Fog,
        "haze" => StandardCondition::Haze,
        "smoke" => StandardCondition::Smoke,
        "dust" => StandardCondition::Dust,
        "hot" => StandardCondition::Hot,
        "cold" => StandardCondition::Cold,
        _ => {
            debug!(code = %code, "Unrecognized NWS icon code");
            StandardCondition::Unknown
        }
    }
}

/// Extract the icon code from an NWS icon URL
///
/// `https://api.weather.gov/icons/land/day/tsra,40?size=medium` carries
/// the code `tsra`. Split icons list one code per forecast period; the
/// first period is the current one.
#[must_use]
pub fn icon_code_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let after_icons = path.split_once("/icons/")?.1;
    let segment = after_icons.split('/').nth(2)?;
    let code = segment.split(',').next()?;
    if code.is_empty() { None } else { Some(code) }
}
