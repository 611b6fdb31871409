//! Live provider health: circuit state, success rate, call outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ProviderErrorCode;

/// Circuit breaker state for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CircuitState {
    /// Normal operation, calls flow through
    Closed,
    /// Too many failures, provider is not called
    Open,
    /// Probing whether the provider has recovered
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Point-in-time health view of one registered provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealthSnapshot {
    /// EMA of call outcomes in [0, 1]; 1 means every recent call succeeded
    pub success_rate: f64,
    /// Circuit breaker state
    pub circuit: CircuitState,
    /// When the provider last failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_failure_at: Option<DateTime<Utc>>,
    /// Informational p95 latency, when something populates it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p95_latency_ms: Option<u64>,
}

impl ProviderHealthSnapshot {
    /// Health of a freshly registered provider
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            success_rate: 1.0,
            circuit: CircuitState::Closed,
            last_failure_at: None,
            p95_latency_ms: None,
        }
    }
}

impl Default for ProviderHealthSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// The result of one provider invocation attempt
///
/// Fed to the outcome reporter exactly once per attempt; only its effect
/// on the health snapshot persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum ProviderCallOutcome {
    Success {
        latency_ms: u64,
    },
    Failure {
        latency_ms: u64,
        code: ProviderErrorCode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        retry_after_ms: Option<u64>,
    },
}

impl ProviderCallOutcome {
    #[must_use]
    pub const fn success(latency_ms: u64) -> Self {
        Self::Success { latency_ms }
    }

    #[must_use]
    pub const fn failure(latency_ms: u64, code: ProviderErrorCode) -> Self {
        Self::Failure {
            latency_ms,
            code,
            status: None,
            retry_after_ms: None,
        }
    }

    /// Build the failure outcome for a classified provider error
    #[must_use]
    pub fn from_error(error: &super::ProviderError, latency_ms: u64) -> Self {
        Self::Failure {
            latency_ms,
            code: error.code,
            status: error.status,
            retry_after_ms: error.retry_after_ms,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn latency_ms(&self) -> u64 {
        match self {
            Self::Success { latency_ms } | Self::Failure { latency_ms, .. } => *latency_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ProviderError, ProviderId};

    #[test]
    fn circuit_state_display() {
        assert_eq!(CircuitState::Closed.to_string(), "closed");
        assert_eq!(CircuitState::Open.to_string(), "open");
        assert_eq!(CircuitState::HalfOpen.to_string(), "half-open");
    }

    #[test]
    fn initial_health_is_optimistic() {
        let health = ProviderHealthSnapshot::initial();
        assert!((health.success_rate - 1.0).abs() < f64::EPSILON);
        assert_eq!(health.circuit, CircuitState::Closed);
        assert!(health.last_failure_at.is_none());
        assert!(health.p95_latency_ms.is_none());
    }

    #[test]
    fn outcome_accessors() {
        let ok = ProviderCallOutcome::success(120);
        assert!(ok.is_success());
        assert_eq!(ok.latency_ms(), 120);

        let failed = ProviderCallOutcome::failure(350, ProviderErrorCode::Upstream);
        assert!(!failed.is_success());
        assert_eq!(failed.latency_ms(), 350);
    }

    #[test]
    fn outcome_from_error_copies_classification() {
        let err = ProviderError::new(
            ProviderErrorCode::RateLimit,
            ProviderId::new("openweather"),
            "Request failed with status code 429",
        )
        .with_status(429)
        .with_retry_after_ms(12_000);

        let outcome = ProviderCallOutcome::from_error(&err, 80);
        match outcome {
            ProviderCallOutcome::Failure {
                latency_ms,
                code,
                status,
                retry_after_ms,
            } => {
                assert_eq!(latency_ms, 80);
                assert_eq!(code, ProviderErrorCode::RateLimit);
                assert_eq!(status, Some(429));
                assert_eq!(retry_after_ms, Some(12_000));
            },
            ProviderCallOutcome::Success { .. } => unreachable!("expected failure outcome"),
        }
    }

    #[test]
    fn circuit_state_serde_is_kebab_case() {
        let json = serde_json::to_string(&CircuitState::HalfOpen).expect("serialize");
        assert_eq!(json, "\"half-open\"");
    }
}
