//! Redb embedded cache
//!
//! Persistent TTL cache for deployments that should keep warm entries
//! across restarts. Uses Redb for ACID storage without an external
//! service.
//!
//! # Auto-Recovery
//!
//! If the database file is unreadable (e.g. after an incompatible
//! upgrade), it is deleted and recreated instead of failing startup.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use application::{error::ApplicationError, ports::CachePort};
use async_trait::async_trait;
use bincode::{Decode, Encode};
use redb::{Database, ReadableDatabase, TableDefinition};
use tokio::task;
use tracing::{debug, warn};

/// Table holding one entry per location bucket
const CACHE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("weather_cache");

/// Stored value with its absolute expiry in Unix milliseconds
#[derive(Debug, PartialEq, Encode, Decode)]
struct StoredEntry {
    value: String,
    expires_at_unix_ms: u64,
}

/// Redb-backed persistent cache
///
/// Expiry is checked lazily on read; an expired entry is removed and
/// reported as a miss. Database work runs on the blocking thread pool.
pub struct RedbCache {
    db: Arc<Database>,
    path: Option<PathBuf>,
    default_ttl: Duration,
}

impl std::fmt::Debug for RedbCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbCache")
            .field("path", &self.path)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl RedbCache {
    /// Open or create a cache database at the given path
    ///
    /// An existing file that cannot be opened is removed and recreated.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created after retry.
    pub fn new<P: AsRef<Path>>(path: P, default_ttl: Duration) -> Result<Self, ApplicationError> {
        let path_buf = path.as_ref().to_path_buf();

        let db = match Database::create(&path_buf) {
            Ok(db) => db,
            Err(e) => {
                warn!(
                    path = %path_buf.display(),
                    error = %e,
                    "Cache database unreadable, recreating"
                );
                if path_buf.exists() {
                    fs::remove_file(&path_buf).map_err(|e| {
                        ApplicationError::Cache(format!(
                            "Failed to remove unreadable cache database: {e}"
                        ))
                    })?;
                }
                Database::create(&path_buf).map_err(|e| {
                    ApplicationError::Cache(format!("Failed to create cache database: {e}"))
                })?
            },
        };

        Self::prepare(db, Some(path_buf), default_ttl)
    }

    /// Create an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory(default_ttl: Duration) -> Result<Self, ApplicationError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| {
                ApplicationError::Cache(format!("Failed to create in-memory database: {e}"))
            })?;
        Self::prepare(db, None, default_ttl)
    }

    /// Ensure the cache table exists before first use
    fn prepare(
        db: Database,
        path: Option<PathBuf>,
        default_ttl: Duration,
    ) -> Result<Self, ApplicationError> {
        let write_txn = db.begin_write().map_err(|e| {
            ApplicationError::Cache(format!("Failed to begin write transaction: {e}"))
        })?;
        {
            let _ = write_txn
                .open_table(CACHE_TABLE)
                .map_err(|e| ApplicationError::Cache(format!("Failed to open cache table: {e}")))?;
        }
        write_txn
            .commit()
            .map_err(|e| ApplicationError::Cache(format!("Failed to commit transaction: {e}")))?;

        Ok(Self {
            db: Arc::new(db),
            path,
            default_ttl,
        })
    }

    /// Current Unix time in milliseconds
    fn now_unix_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            })
    }

    async fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        let db = Arc::clone(&self.db);
        let owned_key = key.to_owned();

        task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.remove(owned_key.as_str())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await
        .map_err(|e| ApplicationError::Cache(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Cache(format!("Redb remove error: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl CachePort for RedbCache {
    async fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        let db = Arc::clone(&self.db);
        let owned_key = key.to_owned();

        let bytes = task::spawn_blocking(move || {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(CACHE_TABLE)?;
            Ok::<_, redb::Error>(
                table
                    .get(owned_key.as_str())?
                    .map(|guard| guard.value().to_vec()),
            )
        })
        .await
        .map_err(|e| ApplicationError::Cache(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Cache(format!("Redb read error: {e}")))?;

        let Some(bytes) = bytes else {
            debug!(key = %key, "Cache miss (redb)");
            return Ok(None);
        };

        let (entry, _): (StoredEntry, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| ApplicationError::Cache(format!("Cache entry decode error: {e}")))?;

        if Self::now_unix_ms() >= entry.expires_at_unix_ms {
            self.remove(key).await?;
            debug!(key = %key, "Cache entry expired (redb)");
            return Ok(None);
        }

        debug!(key = %key, "Cache hit (redb)");
        Ok(Some(entry.value))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl: Option<Duration>,
    ) -> Result<(), ApplicationError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entry = StoredEntry {
            value,
            expires_at_unix_ms: Self::now_unix_ms().saturating_add(ttl_ms),
        };

        let bytes = bincode::encode_to_vec(&entry, bincode::config::standard())
            .map_err(|e| ApplicationError::Cache(format!("Cache entry encode error: {e}")))?;

        let db = Arc::clone(&self.db);
        let owned_key = key.to_owned();

        task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.insert(owned_key.as_str(), bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await
        .map_err(|e| ApplicationError::Cache(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Cache(format!("Redb write error: {e}")))?;

        debug!(key = %key, ttl_ms = ttl_ms, "Cache set (redb)");
        Ok(())
    }
}
