//! Cache port definition
//!
//! Defines the interface for the TTL cache that memoizes weather results
//! per location bucket. Implementations may use an in-process map or an
//! embedded key-value store.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Cache port for storing and retrieving string values with a TTL
///
/// Implementations should be thread-safe and support async operations.
/// Values are stored as strings - callers handle serialization.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Get a cached value by key
    ///
    /// Returns `None` if the key doesn't exist or has expired. Backend
    /// failures surface as errors and are never folded into a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;

    /// Set a cached value with an optional time-to-live
    ///
    /// If the key already exists, its value and TTL are replaced. When
    /// `ttl` is `None` the implementation applies its configured default.
    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), ApplicationError>;
}

/// Standard TTL values for cached data
pub mod ttl {
    use std::time::Duration;

    /// TTL for current weather results (5 minutes)
    pub const WEATHER_CURRENT: Duration = Duration::from_secs(5 * 60);
}
