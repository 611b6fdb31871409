//! Application-level errors

use domain::{DomainError, ProviderError, ProviderId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A provider call failed and no further candidate recovered it
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A region-restricted provider does not cover the requested location
    #[error("Provider {provider} does not cover the requested location")]
    LocationNotSupported {
        /// The provider that declined the location
        provider: ProviderId,
    },

    /// No provider was available to attempt the request
    #[error("No weather provider available for this request")]
    NoProviderAvailable,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cache backend error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApplicationError {
    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Provider(error) if error.code.is_retryable())
    }
}
