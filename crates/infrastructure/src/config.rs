//! Application configuration
//!
//! Loaded from an optional TOML file plus `WEATHERMUX_` environment
//! variables. Nested fields use `__` as the separator, for example
//! `WEATHERMUX_CACHE__BACKEND=redb` or `WEATHERMUX_HTTP__TIMEOUT_SECS=5`.

use std::{collections::HashMap, path::PathBuf, time::Duration};

use application::error::ApplicationError;
use domain::{FallbackPolicyConfig, GeohashCell};
use serde::{Deserialize, Serialize};

/// Cache backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map, lost on restart
    #[default]
    Memory,
    /// Embedded redb database at `cache.path`
    Redb,
}

/// Cache backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Backend selection (default: memory)
    #[serde(default)]
    pub backend: CacheBackend,

    /// Database file for the redb backend
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Outbound HTTP settings shared by the provider clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent to upstream APIs
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "weathermux (https://github.com/weathermux/weathermux)".to_owned()
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Providers to register, in fallback priority order (default: nws)
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,

    /// API keys by provider id
    #[serde(default)]
    pub api_keys: HashMap<String, String>,

    /// Geohash precision for cache keys (default: 5, roughly 5 km cells)
    #[serde(default = "default_geohash_precision")]
    pub geohash_precision: u8,

    /// How long cached current conditions stay fresh, in seconds
    /// (default: 5 minutes)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Cache backend configuration
    #[serde(default)]
    pub cache: CacheSettings,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Fallback policy and circuit tuning
    #[serde(default)]
    pub fallback: FallbackPolicyConfig,
}

fn default_providers() -> Vec<String> {
    vec!["nws".to_owned()]
}

const fn default_geohash_precision() -> u8 {
    5
}

const fn default_cache_ttl_secs() -> u64 {
    5 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            api_keys: HashMap::new(),
            geohash_precision: default_geohash_precision(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache: CacheSettings::default(),
            http: HttpSettings::default(),
            fallback: FallbackPolicyConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `weathermux.toml` (if present) and the
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment variable cannot
    /// be parsed into the expected shape.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from("weathermux")
    }

    /// Load configuration from the named file (extension optional) and
    /// `WEATHERMUX_` environment variables
    ///
    /// The file is optional. Environment variables override file
    /// values; `providers` accepts a comma-separated list.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load_from(file: &str) -> Result<Self, ApplicationError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("WEATHERMUX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("providers")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))
    }

    /// Get the cache TTL as a Duration
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Look up the API key configured for a provider
    #[must_use]
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(String::as_str)
    }

    /// Reject configurations the service cannot start with
    ///
    /// # Errors
    ///
    /// Returns an error when no providers are listed, the geohash
    /// precision is out of range, the TTL is zero, or the redb backend
    /// has no path.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.providers.is_empty() {
            return Err(ApplicationError::Configuration(
                "At least one weather provider must be configured".to_owned(),
            ));
        }
        if !(GeohashCell::MIN_PRECISION..=GeohashCell::MAX_PRECISION)
            .contains(&self.geohash_precision)
        {
            return Err(ApplicationError::Configuration(format!(
                "geohash_precision must be between {} and {}, got {}",
                GeohashCell::MIN_PRECISION,
                GeohashCell::MAX_PRECISION,
                self.geohash_precision
            )));
        }
        if self.cache_ttl_secs == 0 {
            return Err(ApplicationError::Configuration(
                "cache_ttl_secs must be greater than zero".to_owned(),
            ));
        }
        if self.cache.backend == CacheBackend::Redb && self.cache.path.is_none() {
            return Err(ApplicationError::Configuration(
                "cache.path is required for the redb backend".to_owned(),
            ));
        }
        Ok(())
    }
}
