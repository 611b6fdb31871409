//! Provider capability descriptors and request intents

use serde::{Deserialize, Serialize};

/// Data kinds a provider can serve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedData {
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub hourly: bool,
    #[serde(default)]
    pub daily: bool,
    #[serde(default)]
    pub alerts: bool,
}

/// Data kinds a caller requires for one request
///
/// A provider qualifies only when it supports every requested kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherIntent {
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub hourly: bool,
    #[serde(default)]
    pub daily: bool,
    #[serde(default)]
    pub alerts: bool,
}

impl WeatherIntent {
    /// Current conditions only, the default for weather lookups
    #[must_use]
    pub const fn current() -> Self {
        Self {
            current: true,
            hourly: false,
            daily: false,
            alerts: false,
        }
    }
}

impl Default for WeatherIntent {
    fn default() -> Self {
        Self::current()
    }
}

/// Measurement systems a provider can answer in (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Standard,
    Metric,
    Imperial,
}

/// Static description of one provider, registered once at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderCapability {
    /// Which data kinds the provider serves
    pub supports: SupportedData,
    /// Region codes the provider is restricted to; empty means unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
    /// Supported measurement systems (informational, not enforced)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitSystem>,
    /// Supported locales (informational, not enforced)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<String>,
}

impl ProviderCapability {
    /// Capability covering only current conditions, unrestricted
    #[must_use]
    pub fn current_only() -> Self {
        Self {
            supports: SupportedData {
                current: true,
                ..SupportedData::default()
            },
            ..Self::default()
        }
    }

    /// Whether this capability satisfies every kind the intent requests
    #[must_use]
    pub const fn satisfies(&self, intent: &WeatherIntent) -> bool {
        let s = &self.supports;
        if intent.current && !s.current {
            return false;
        }
        if intent.hourly && !s.hourly {
            return false;
        }
        if intent.daily && !s.daily {
            return false;
        }
        if intent.alerts && !s.alerts {
            return false;
        }
        true
    }

    /// Whether the provider is restricted to specific regions
    #[must_use]
    pub fn is_region_restricted(&self) -> bool {
        !self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_only_satisfies_current_intent() {
        let capability = ProviderCapability::current_only();
        assert!(capability.satisfies(&WeatherIntent::current()));
    }

    #[test]
    fn missing_kind_fails_intent() {
        let capability = ProviderCapability::current_only();
        let intent = WeatherIntent {
            current: true,
            hourly: true,
            ..WeatherIntent::current()
        };
        assert!(!capability.satisfies(&intent));
    }

    #[test]
    fn unrequested_kinds_are_ignored() {
        let capability = ProviderCapability {
            supports: SupportedData {
                current: true,
                hourly: true,
                daily: true,
                alerts: true,
            },
            ..ProviderCapability::default()
        };
        assert!(capability.satisfies(&WeatherIntent::current()));
    }

    #[test]
    fn empty_intent_always_satisfied() {
        let intent = WeatherIntent {
            current: false,
            hourly: false,
            daily: false,
            alerts: false,
        };
        assert!(ProviderCapability::default().satisfies(&intent));
    }

    #[test]
    fn region_restriction() {
        let mut capability = ProviderCapability::current_only();
        assert!(!capability.is_region_restricted());
        capability.regions.push("US".to_owned());
        assert!(capability.is_region_restricted());
    }

    #[test]
    fn unit_system_serializes_lowercase() {
        let json = serde_json::to_string(&UnitSystem::Metric).expect("serialize");
        assert_eq!(json, "\"metric\"");
    }
}
