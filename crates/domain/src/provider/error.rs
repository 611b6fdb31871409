//! Provider call error taxonomy

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::ProviderId;

/// Fixed classification for provider call failures
///
/// Adapters map transport and HTTP failures into exactly one of these
/// codes; the registry and policy engine never see anything finer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderErrorCode {
    /// Transport-level failure before any HTTP status arrived
    Network,
    /// The call exceeded its deadline
    Timeout,
    /// HTTP 429
    RateLimit,
    /// HTTP 404
    NotFound,
    /// HTTP 400 or 422
    Validation,
    /// The response body could not be decoded
    Parse,
    /// HTTP 5xx
    Upstream,
    /// Any other failure
    Unavailable,
}

impl ProviderErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::RateLimit => "rate-limit",
            Self::NotFound => "not-found",
            Self::Validation => "validation",
            Self::Parse => "parse",
            Self::Upstream => "upstream",
            Self::Unavailable => "unavailable",
        }
    }

    /// Whether retrying the same provider later could plausibly succeed
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::Network | Self::Timeout | Self::RateLimit | Self::Upstream | Self::Unavailable
        )
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified provider call failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{provider}: {message}")]
pub struct ProviderError {
    /// Taxonomy classification
    pub code: ProviderErrorCode,
    /// Which provider failed
    pub provider: ProviderId,
    /// Human-readable description of the failure
    pub message: String,
    /// HTTP status, when one was received
    pub status: Option<u16>,
    /// Retry hint in milliseconds, from a Retry-After header
    pub retry_after_ms: Option<u64>,
    /// The endpoint that failed, when known
    pub endpoint: Option<String>,
}

impl ProviderError {
    #[must_use]
    pub fn new(code: ProviderErrorCode, provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            code,
            provider,
            message: message.into(),
            status: None,
            retry_after_ms: None,
            endpoint: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_retry_after_ms(mut self, retry_after_ms: u64) -> Self {
        self.retry_after_ms = Some(retry_after_ms);
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_names_the_provider() {
        let err = ProviderError::new(
            ProviderErrorCode::Upstream,
            ProviderId::new("nws"),
            "Request failed with status code 500",
        )
        .with_status(500);

        assert_eq!(err.to_string(), "nws: Request failed with status code 500");
        assert_eq!(err.status, Some(500));
        assert_eq!(err.code, ProviderErrorCode::Upstream);
    }

    #[test]
    fn rate_limit_carries_retry_hint() {
        let err = ProviderError::new(
            ProviderErrorCode::RateLimit,
            ProviderId::new("openweather"),
            "Request failed with status code 429",
        )
        .with_status(429)
        .with_retry_after_ms(7000);

        assert_eq!(err.retry_after_ms, Some(7000));
    }

    #[test]
    fn code_display_is_kebab_case() {
        assert_eq!(ProviderErrorCode::RateLimit.to_string(), "rate-limit");
        assert_eq!(ProviderErrorCode::NotFound.as_str(), "not-found");
    }

    #[test]
    fn retryable_classification() {
        assert!(ProviderErrorCode::Timeout.is_retryable());
        assert!(ProviderErrorCode::Upstream.is_retryable());
        assert!(!ProviderErrorCode::NotFound.is_retryable());
        assert!(!ProviderErrorCode::Validation.is_retryable());
        assert!(!ProviderErrorCode::Parse.is_retryable());
    }

    #[test]
    fn code_serde_roundtrip() {
        let json = serde_json::to_string(&ProviderErrorCode::RateLimit).expect("serialize");
        assert_eq!(json, "\"rate-limit\"");
        let back: ProviderErrorCode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ProviderErrorCode::RateLimit);
    }
}
