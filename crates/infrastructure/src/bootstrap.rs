//! Service assembly
//!
//! Builds a ready-to-use [`WeatherService`] from an [`AppConfig`]:
//! cache backend, provider registry, and one adapter per configured
//! provider name.

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{CachePort, WeatherProviderPort},
    registry::ProviderRegistry,
    services::{WeatherService, WeatherServiceConfig},
};
use integration_nws::NwsConfig;
use integration_openweather::OpenWeatherConfig;
use tracing::info;

use crate::{
    adapters::{NwsAdapter, OpenWeatherAdapter},
    cache::{MemoryCache, RedbCache},
    config::{AppConfig, CacheBackend},
};

/// Build a provider adapter by its configured name
///
/// # Errors
///
/// Returns an error for an unknown name, a missing OpenWeather API
/// key, or an adapter that fails to initialize.
pub fn create_provider(
    name: &str,
    config: &AppConfig,
) -> Result<Arc<dyn WeatherProviderPort>, ApplicationError> {
    match name {
        "nws" => {
            let adapter = NwsAdapter::with_config(NwsConfig {
                timeout_secs: config.http.timeout_secs,
                user_agent: config.http.user_agent.clone(),
                ..NwsConfig::default()
            })?;
            Ok(Arc::new(adapter))
        },
        "openweather" => {
            let api_key = config.api_key("openweather").ok_or_else(|| {
                ApplicationError::Configuration(
                    "OpenWeather provider requires an API key".to_owned(),
                )
            })?;
            let adapter = OpenWeatherAdapter::with_config(OpenWeatherConfig {
                api_key: api_key.to_owned(),
                timeout_secs: config.http.timeout_secs,
                ..OpenWeatherConfig::default()
            })?;
            Ok(Arc::new(adapter))
        },
        other => Err(ApplicationError::Configuration(format!(
            "provider {other} is not supported yet"
        ))),
    }
}

fn create_cache(config: &AppConfig) -> Result<Arc<dyn CachePort>, ApplicationError> {
    match config.cache.backend {
        CacheBackend::Memory => Ok(Arc::new(
            MemoryCache::new().with_default_ttl(config.cache_ttl()),
        )),
        CacheBackend::Redb => {
            let path = config.cache.path.as_ref().ok_or_else(|| {
                ApplicationError::Configuration(
                    "cache.path is required for the redb backend".to_owned(),
                )
            })?;
            Ok(Arc::new(RedbCache::new(path, config.cache_ttl())?))
        },
    }
}

/// Assemble the weather service from configuration
///
/// Validates the configuration, then wires the cache backend, the
/// registry with its circuit tuning, and the configured providers in
/// fallback priority order.
///
/// # Errors
///
/// Returns an error when validation fails or any component cannot be
/// constructed.
pub fn build_weather_service(config: &AppConfig) -> Result<WeatherService, ApplicationError> {
    config.validate()?;

    let cache = create_cache(config)?;
    let registry = Arc::new(ProviderRegistry::new(config.fallback.circuit));
    let providers = config
        .providers
        .iter()
        .map(|name| create_provider(name, config))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        providers = ?config.providers,
        cache_backend = ?config.cache.backend,
        "Weather service configured"
    );

    WeatherService::new(
        cache,
        registry,
        providers,
        WeatherServiceConfig {
            geohash_precision: config.geohash_precision,
            cache_ttl: config.cache_ttl(),
            fallback: config.fallback.clone(),
        },
    )
}
