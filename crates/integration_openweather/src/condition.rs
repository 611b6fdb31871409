//! OpenWeather condition translation
//!
//! OpenWeather identifies conditions by numeric id. The groups follow
//! <https://openweathermap.org/weather-conditions>: 2xx thunderstorm,
//! 3xx drizzle, 5xx rain, 6xx snow, 7xx atmosphere, 800 clear, 80x
//! clouds.

use domain::StandardCondition;
use tracing::debug;

/// Translate an OpenWeather condition id into the shared vocabulary
#[must_use]
pub fn standardize_condition_id(id: u32) -> StandardCondition {
    match id {
        200..=202 | 210..=212 | 221 | 230..=232 => StandardCondition::Thunderstorms,
        300..=302 | 310..=312 => StandardCondition::Drizzle,
        313 | 314 | 321 => StandardCondition::Showers,
        500 => StandardCondition::LightRain,
        501 => StandardCondition::Rain,
        502..=504 => StandardCondition::HeavyRain,
        511 => StandardCondition::FreezingRain,
        520..=522 | 531 => StandardCondition::Showers,
        600 | 620 => StandardCondition::LightSnow,
        601 | 621 => StandardCondition::Snow,
        602 | 622 => StandardCondition::HeavySnow,
        611..=613 => StandardCondition::Sleet,
        615 | 616 => StandardCondition::Mixed,
        701 => StandardCondition::Mist,
        // 762 is volcanic ash
        711 | 762 => StandardCondition::Smoke,
        721 => StandardCondition::Haze,
        731 | 751 | 761 => StandardCondition::Dust,
        741 => StandardCondition::Fog,
        // squalls
        771 => StandardCondition::Windy,
        781 => StandardCondition::Tornado,
        800 => StandardCondition::Clear,
        801 => StandardCondition::PartlyCloudy,
        802 => StandardCondition::Cloudy,
        803 => StandardCondition::MostlyCloudy,
        804 => StandardCondition::Overcast,
        _ => {
            debug!(id, "Unrecognized OpenWeather condition id");
            StandardCondition::Unknown
        }
    }
}
