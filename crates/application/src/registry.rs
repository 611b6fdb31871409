//! Provider registry with health accounting and circuit breaking
//!
//! Owns every provider's capability descriptor and live health state.
//! All circuit transitions are driven by `record_outcome`; there is no
//! timer thread, so time-based half-open promotion is evaluated lazily
//! at the end of the next recorded outcome.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    CircuitConfig, CircuitState, ProviderCallOutcome, ProviderCapability, ProviderHealthSnapshot,
    ProviderId, WeatherIntent,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::ports::{Clock, OutcomeReporter, SystemClock};

/// Weight of the newest sample in the success-rate moving average
const SUCCESS_RATE_ALPHA: f64 = 0.2;

#[derive(Debug)]
struct ProviderEntry {
    id: ProviderId,
    capability: ProviderCapability,
    health: ProviderHealthSnapshot,
    consecutive_failures: u32,
    consecutive_successes: u32,
    opened_at: Option<DateTime<Utc>>,
}

/// Catalog of registered providers with per-provider health state
#[derive(Debug)]
pub struct ProviderRegistry {
    entries: RwLock<Vec<ProviderEntry>>,
    circuit: CircuitConfig,
    clock: Arc<dyn Clock>,
}

impl ProviderRegistry {
    /// Create a registry with the given circuit tuning and the system clock
    #[must_use]
    pub fn new(circuit: CircuitConfig) -> Self {
        Self::with_clock(circuit, Arc::new(SystemClock))
    }

    /// Create a registry with an injected clock
    #[must_use]
    pub fn with_clock(circuit: CircuitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            circuit,
            clock,
        }
    }

    /// Register a provider's capability
    ///
    /// Idempotent per id: a second registration keeps the first
    /// capability and does not reset health.
    pub fn register(&self, id: ProviderId, capability: ProviderCapability) {
        let mut entries = self.entries.write();
        if entries.iter().any(|entry| entry.id == id) {
            debug!(provider = %id, "Provider already registered");
            return;
        }

        info!(provider = %id, "Provider registered");
        entries.push(ProviderEntry {
            id,
            capability,
            health: ProviderHealthSnapshot::initial(),
            consecutive_failures: 0,
            consecutive_successes: 0,
            opened_at: None,
        });
    }

    /// Capability descriptor for a provider, if registered
    #[must_use]
    pub fn capability(&self, id: &ProviderId) -> Option<ProviderCapability> {
        self.entries
            .read()
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.capability.clone())
    }

    /// Health snapshot for a provider, if registered
    #[must_use]
    pub fn health(&self, id: &ProviderId) -> Option<ProviderHealthSnapshot> {
        self.entries
            .read()
            .iter()
            .find(|entry| &entry.id == id)
            .map(|entry| entry.health.clone())
    }

    /// Ids whose capability satisfies the intent, in registration order
    #[must_use]
    pub fn list_providers(&self, intent: &WeatherIntent) -> Vec<ProviderId> {
        self.entries
            .read()
            .iter()
            .filter(|entry| entry.capability.satisfies(intent))
            .map(|entry| entry.id.clone())
            .collect()
    }

    /// Number of registered providers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no provider has been registered yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Apply one call outcome to a provider's health
    ///
    /// Outcomes for unknown ids are dropped. A success resets the failure
    /// streak and closes a half-open circuit once the success streak
    /// reaches `success_to_close`. A failure resets the success streak,
    /// stamps `last_failure_at` and opens the circuit once the failure
    /// streak reaches `failure_count_to_open`. Afterwards an open circuit
    /// that has waited out `half_open_after_ms` is promoted to half-open
    /// with both streaks cleared.
    pub fn record_outcome(&self, id: &ProviderId, outcome: &ProviderCallOutcome) {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let Some(entry) = entries.iter_mut().find(|entry| &entry.id == id) else {
            debug!(provider = %id, "Outcome for unregistered provider dropped");
            return;
        };

        match outcome {
            ProviderCallOutcome::Success { .. } => {
                entry.consecutive_successes += 1;
                entry.consecutive_failures = 0;
                if entry.health.circuit == CircuitState::HalfOpen
                    && entry.consecutive_successes >= self.circuit.success_to_close
                {
                    info!(provider = %id, "Circuit closed");
                    entry.health.circuit = CircuitState::Closed;
                }
                entry.health.success_rate = update_ema(entry.health.success_rate, 1.0);
            },
            ProviderCallOutcome::Failure { code, .. } => {
                entry.consecutive_failures += 1;
                entry.consecutive_successes = 0;
                entry.health.success_rate = update_ema(entry.health.success_rate, 0.0);
                entry.health.last_failure_at = Some(now);
                if entry.consecutive_failures >= self.circuit.failure_count_to_open {
                    if entry.health.circuit != CircuitState::Open {
                        warn!(
                            provider = %id,
                            code = %code,
                            failures = entry.consecutive_failures,
                            "Circuit opened"
                        );
                    }
                    entry.health.circuit = CircuitState::Open;
                    entry.opened_at = Some(now);
                }
            },
        }

        let waited_out = entry.opened_at.is_some_and(|opened| {
            (now - opened).num_milliseconds()
                >= i64::try_from(self.circuit.half_open_after_ms).unwrap_or(i64::MAX)
        });
        if entry.health.circuit == CircuitState::Open && waited_out {
            info!(provider = %id, "Circuit half-open");
            entry.health.circuit = CircuitState::HalfOpen;
            entry.consecutive_failures = 0;
            entry.consecutive_successes = 0;
        }
    }
}

impl OutcomeReporter for ProviderRegistry {
    fn record(&self, provider: &ProviderId, outcome: &ProviderCallOutcome) {
        self.record_outcome(provider, outcome);
    }
}

fn update_ema(prev: f64, sample: f64) -> f64 {
    prev * (1.0 - SUCCESS_RATE_ALPHA) + sample * SUCCESS_RATE_ALPHA
}
