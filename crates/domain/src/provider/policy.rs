//! Fallback policy and circuit tuning configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

/// How the policy engine orders candidate providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Registration order, nothing skipped
    #[default]
    Priority,
    /// Registration order with unhealthy providers skipped and
    /// half-open ones probed last
    PriorityThenHealth,
    /// Health filtering plus descending-weight ordering
    Weighted,
}

impl FallbackPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::PriorityThenHealth => "priority-then-health",
            Self::Weighted => "weighted",
        }
    }
}

impl std::fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FallbackPolicy {
    type Err = std::convert::Infallible;

    /// Unknown names fall back to `Priority`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "priority-then-health" => Self::PriorityThenHealth,
            "weighted" => Self::Weighted,
            _ => Self::Priority,
        })
    }
}

impl Serialize for FallbackPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FallbackPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(name.parse().unwrap_or_default())
    }
}

/// Health cut-offs consulted by the policy engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthThresholds {
    /// Providers below this success rate are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_success_rate: Option<f64>,
    /// Providers above this p95 latency are skipped, when tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_p95_ms: Option<u64>,
}

/// Circuit breaker tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Consecutive failures before the circuit opens
    #[serde(default = "default_failure_count_to_open")]
    pub failure_count_to_open: u32,
    /// Milliseconds an open circuit waits before a half-open probe
    #[serde(default = "default_half_open_after_ms")]
    pub half_open_after_ms: u64,
    /// Consecutive half-open successes before the circuit closes
    #[serde(default = "default_success_to_close")]
    pub success_to_close: u32,
}

const fn default_failure_count_to_open() -> u32 {
    5
}

const fn default_half_open_after_ms() -> u64 {
    30_000
}

const fn default_success_to_close() -> u32 {
    1
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            failure_count_to_open: default_failure_count_to_open(),
            half_open_after_ms: default_half_open_after_ms(),
            success_to_close: default_success_to_close(),
        }
    }
}

impl CircuitConfig {
    /// The half-open delay as a `Duration`
    #[must_use]
    pub const fn half_open_after(&self) -> Duration {
        Duration::from_millis(self.half_open_after_ms)
    }
}

/// Complete fallback configuration for provider selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FallbackPolicyConfig {
    /// Ordering policy
    #[serde(default)]
    pub policy: FallbackPolicy,
    /// Per-provider weights for the weighted policy; unlisted ids weigh 1
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_weights: HashMap<String, f64>,
    /// Health cut-offs
    #[serde(default)]
    pub health_thresholds: HealthThresholds,
    /// Circuit breaker tuning
    #[serde(default)]
    pub circuit: CircuitConfig,
}

impl FallbackPolicyConfig {
    /// Weight for a provider under the weighted policy (default 1.0)
    #[must_use]
    pub fn weight_for(&self, id: &str) -> f64 {
        self.provider_weights.get(id).copied().unwrap_or(1.0)
    }
}
