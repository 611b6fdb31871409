//! Provider vocabulary: identities, capabilities, health, errors, policy
//!
//! Everything the registry, policy engine, and orchestrator need to talk
//! about providers without knowing any concrete client.

mod capability;
mod error;
mod health;
mod policy;

pub use capability::{ProviderCapability, SupportedData, UnitSystem, WeatherIntent};
pub use error::{ProviderError, ProviderErrorCode};
pub use health::{CircuitState, ProviderCallOutcome, ProviderHealthSnapshot};
pub use policy::{CircuitConfig, FallbackPolicy, FallbackPolicyConfig, HealthThresholds};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque provider identifier ("nws", "openweather", ...)
///
/// Stable for the process lifetime and used as the key in the registry,
/// the policy engine, and report bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_display_and_as_str() {
        let id = ProviderId::new("nws");
        assert_eq!(id.as_str(), "nws");
        assert_eq!(id.to_string(), "nws");
        assert_eq!(id.as_ref(), "nws");
    }

    #[test]
    fn provider_id_serializes_as_bare_string() {
        let id = ProviderId::from("openweather");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"openweather\"");
        let back: ProviderId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn provider_id_usable_as_map_key() {
        use std::collections::HashMap;
        let mut weights = HashMap::new();
        weights.insert(ProviderId::new("nws"), 2.0_f64);
        assert!(weights.contains_key(&ProviderId::new("nws")));
    }
}
