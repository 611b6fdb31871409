//! In-process TTL cache
//!
//! HashMap-backed cache for single-instance deployments. Expiry is
//! checked lazily on read against an injectable clock, so TTL behavior
//! is testable without sleeping.

use std::{collections::HashMap, sync::Arc, time::Duration};

use application::{
    error::ApplicationError,
    ports::{CachePort, Clock, SystemClock, ttl},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

/// A stored value with its absolute expiry instant
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory cache with per-entry TTL
///
/// Entries are evicted lazily: a read at or past the expiry instant
/// removes the entry and reports a miss. Writes replace an existing
/// entry wholesale, value and TTL both.
#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Create an empty cache with the system clock and a 5 minute default TTL
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock: Arc::new(SystemClock),
            default_ttl: ttl::WEATHER_CURRENT,
        }
    }

    /// Replace the default TTL applied when `set` receives no TTL
    #[must_use]
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Replace the clock used for expiry decisions
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn expiry_for(&self, ttl: Duration) -> Result<DateTime<Utc>, ApplicationError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| ApplicationError::Cache(format!("TTL out of range: {e}")))?;
        Ok(self.clock.now() + ttl)
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let now = self.clock.now();
        let mut entries = self.entries.write();

        let expired = entries.get(key).is_some_and(|entry| now >= entry.expires_at);
        if expired {
            entries.remove(key);
            debug!(key = %key, "Cache entry expired (memory)");
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), ApplicationError> {
        let expires_at = self.expiry_for(ttl.unwrap_or(self.default_ttl))?;
        self.entries.write().insert(
            key.to_owned(),
            CacheEntry {
                value,
                expires_at,
            },
        );
        Ok(())
    }
}
