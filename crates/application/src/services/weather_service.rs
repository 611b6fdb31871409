//! Weather service - resilient multi-provider orchestration
//!
//! On each request: validate the coordinate, bucket it to a geohash,
//! consult the cache, then walk the policy-ordered candidate list until
//! one provider answers. Every attempt reports its outcome; the fresh
//! result is written back to the cache under the bucket key.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use domain::{
    DomainError, FallbackPolicyConfig, GeoLocation, GeohashCell, ProviderCallOutcome,
    ProviderError, ProviderErrorCode, ProviderId, WeatherFields, WeatherIntent, WeatherReport,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    policy::select_providers,
    ports::{CachePort, Clock, OutcomeReporter, SystemClock, WeatherProviderPort, ttl},
    registry::ProviderRegistry,
};

/// Construction-time tuning for the weather service
#[derive(Debug, Clone)]
pub struct WeatherServiceConfig {
    /// Geohash precision used for cache bucketing
    pub geohash_precision: u8,
    /// TTL applied to cached weather results
    pub cache_ttl: Duration,
    /// Provider selection configuration
    pub fallback: FallbackPolicyConfig,
}

impl Default for WeatherServiceConfig {
    fn default() -> Self {
        Self {
            geohash_precision: GeohashCell::DEFAULT_PRECISION,
            cache_ttl: ttl::WEATHER_CURRENT,
            fallback: FallbackPolicyConfig::default(),
        }
    }
}

/// Per-request options
#[derive(Debug, Clone, Default)]
pub struct WeatherRequestOptions {
    /// Skip the cache read; the fresh result is still written back
    pub bypass_cache: bool,
    /// Upper bound for a single provider attempt
    pub timeout: Option<Duration>,
    /// Data kinds the caller requires
    pub intent: WeatherIntent,
}

/// Orchestrates cache, registry, policy engine and provider clients
pub struct WeatherService {
    cache: Arc<dyn CachePort>,
    registry: Arc<ProviderRegistry>,
    providers: Vec<Arc<dyn WeatherProviderPort>>,
    reporter: Arc<dyn OutcomeReporter>,
    clock: Arc<dyn Clock>,
    config: WeatherServiceConfig,
}

impl fmt::Debug for WeatherService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<&str> = self
            .providers
            .iter()
            .map(|provider| provider.id().as_str())
            .collect();
        f.debug_struct("WeatherService")
            .field("providers", &providers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl WeatherService {
    /// Create a service over an ordered list of provider clients
    ///
    /// Registers each provider's capability and wires the registry as
    /// the outcome reporter. Fails when no provider is configured or the
    /// geohash precision is out of range.
    pub fn new(
        cache: Arc<dyn CachePort>,
        registry: Arc<ProviderRegistry>,
        providers: Vec<Arc<dyn WeatherProviderPort>>,
        config: WeatherServiceConfig,
    ) -> Result<Self, ApplicationError> {
        if providers.is_empty() {
            return Err(ApplicationError::Configuration(
                "At least one weather provider must be configured".to_owned(),
            ));
        }
        if !(GeohashCell::MIN_PRECISION..=GeohashCell::MAX_PRECISION)
            .contains(&config.geohash_precision)
        {
            return Err(ApplicationError::Domain(DomainError::InvalidGeohashPrecision(
                config.geohash_precision,
            )));
        }

        for provider in &providers {
            registry.register(provider.id().clone(), provider.capability());
        }

        let reporter: Arc<dyn OutcomeReporter> = registry.clone();
        Ok(Self {
            cache,
            registry,
            providers,
            reporter,
            clock: Arc::new(SystemClock),
            config,
        })
    }

    /// Replace the outcome reporter
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn OutcomeReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current weather for a coordinate, with default options
    pub async fn get_weather(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ApplicationError> {
        self.get_weather_with_options(latitude, longitude, &WeatherRequestOptions::default())
            .await
    }

    /// Current weather for a coordinate
    #[instrument(skip(self, options), fields(bypass_cache = options.bypass_cache))]
    pub async fn get_weather_with_options(
        &self,
        latitude: f64,
        longitude: f64,
        options: &WeatherRequestOptions,
    ) -> Result<WeatherReport, ApplicationError> {
        let location = GeoLocation::new(latitude, longitude)?;
        let bucket = GeohashCell::encode(&location, self.config.geohash_precision)?;

        if !options.bypass_cache {
            if let Some(raw) = self.cache.get(bucket.as_str()).await? {
                let report: WeatherReport = serde_json::from_str(&raw)?;
                debug!(bucket = %bucket, provider = %report.provider, "Cache hit");
                return Ok(report);
            }
        }

        // Every request in the same bucket queries the bucket center, so
        // nearby coordinates share one effective point.
        let center = bucket.center();
        let selection = select_providers(&self.registry, &options.intent, &self.config.fallback);
        for skipped in &selection.skipped {
            debug!(provider = %skipped.id, reason = %skipped.reason, "Provider skipped");
        }

        let mut last_error: Option<ApplicationError> = None;
        for id in &selection.candidates {
            let Some(provider) = self.provider_client(id) else {
                continue;
            };

            if !provider.covers(&center) {
                warn!(provider = %id, "Location outside provider coverage");
                last_error = Some(ApplicationError::LocationNotSupported {
                    provider: id.clone(),
                });
                continue;
            }

            match self
                .attempt(provider.as_ref(), id, &center, options.timeout)
                .await
            {
                Ok(fields) => {
                    let report = WeatherReport::fresh(id.clone(), fields);
                    self.store(&bucket, &report).await?;
                    info!(provider = %id, bucket = %bucket, "Weather fetched");
                    return Ok(report);
                },
                Err(error) => {
                    last_error = Some(ApplicationError::Provider(error));
                },
            }
        }

        match last_error {
            Some(error) => Err(error),
            None => Err(ApplicationError::NoProviderAvailable),
        }
    }

    /// One provider attempt with latency capture and outcome reporting
    async fn attempt(
        &self,
        provider: &dyn WeatherProviderPort,
        id: &ProviderId,
        location: &GeoLocation,
        timeout: Option<Duration>,
    ) -> Result<WeatherFields, ProviderError> {
        let start = Instant::now();
        let result = match timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, provider.fetch_weather(location)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::new(
                        ProviderErrorCode::Timeout,
                        id.clone(),
                        format!("No answer within {}ms", limit.as_millis()),
                    )),
                }
            },
            None => provider.fetch_weather(location).await,
        };
        let latency_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => {
                self.reporter
                    .record(id, &ProviderCallOutcome::success(latency_ms));
            },
            Err(error) => {
                warn!(provider = %id, code = %error.code, latency_ms, "Provider call failed");
                self.reporter
                    .record(id, &ProviderCallOutcome::from_error(error, latency_ms));
            },
        }

        result
    }

    async fn store(
        &self,
        bucket: &GeohashCell,
        report: &WeatherReport,
    ) -> Result<(), ApplicationError> {
        let cached = report.as_cached(self.clock.now());
        let raw = serde_json::to_string(&cached)?;
        self.cache
            .set(bucket.as_str(), raw, Some(self.config.cache_ttl))
            .await
    }

    fn provider_client(&self, id: &ProviderId) -> Option<&Arc<dyn WeatherProviderPort>> {
        self.providers.iter().find(|provider| provider.id() == id)
    }
}
