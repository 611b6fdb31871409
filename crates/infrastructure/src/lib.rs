//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer. Contains the
//! provider adapters, the cache backends, configuration loading, and
//! the service assembly entry point.

pub mod adapters;
pub mod bootstrap;
pub mod cache;
pub mod config;

pub use adapters::{NwsAdapter, OpenWeatherAdapter};
pub use bootstrap::{build_weather_service, create_provider};
pub use cache::{MemoryCache, RedbCache};
pub use config::{AppConfig, CacheBackend, CacheSettings, HttpSettings};
