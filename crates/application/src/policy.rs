//! Provider selection policy engine
//!
//! A pure ordering/filtering pass over the registry's health view. No
//! network calls, no mutation, so every branch is unit-testable.

use std::cmp::Ordering;

use domain::{CircuitState, FallbackPolicy, FallbackPolicyConfig, ProviderId, WeatherIntent};

use crate::registry::ProviderRegistry;

/// Why a provider was left out of the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The provider's circuit is open
    CircuitOpen,
    /// The provider's success rate is below the configured minimum
    BelowSuccessThreshold,
}

impl SkipReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CircuitOpen => "circuit-open",
            Self::BelowSuccessThreshold => "below-success-threshold",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider excluded from selection, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProvider {
    /// The excluded provider
    pub id: ProviderId,
    /// Why it was excluded
    pub reason: SkipReason,
}

/// Outcome of provider selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderSelection {
    /// Providers to try, in order
    pub candidates: Vec<ProviderId>,
    /// Providers excluded by health filtering
    pub skipped: Vec<SkippedProvider>,
}

/// Order candidate providers for one request
///
/// `priority` returns the intent-filtered registration order verbatim.
/// `priority-then-health` drops open-circuit and below-threshold
/// providers, then moves half-open survivors to the end so recovery is
/// probed last. `weighted` applies the same filtering and orders
/// survivors by descending weight (default 1), ties keeping their
/// registration order.
#[must_use]
pub fn select_providers(
    registry: &ProviderRegistry,
    intent: &WeatherIntent,
    config: &FallbackPolicyConfig,
) -> ProviderSelection {
    let base = registry.list_providers(intent);

    match config.policy {
        FallbackPolicy::Priority => ProviderSelection {
            candidates: base,
            skipped: Vec::new(),
        },
        FallbackPolicy::PriorityThenHealth => {
            let (survivors, skipped) = filter_by_health(registry, base, config);
            let (half_open, mut candidates): (Vec<_>, Vec<_>) =
                survivors.into_iter().partition(|id| {
                    registry
                        .health(id)
                        .is_some_and(|health| health.circuit == CircuitState::HalfOpen)
                });
            candidates.extend(half_open);
            ProviderSelection {
                candidates,
                skipped,
            }
        },
        FallbackPolicy::Weighted => {
            let (mut survivors, skipped) = filter_by_health(registry, base, config);
            survivors.sort_by(|a, b| {
                let left = config.weight_for(a.as_str());
                let right = config.weight_for(b.as_str());
                right.partial_cmp(&left).unwrap_or(Ordering::Equal)
            });
            ProviderSelection {
                candidates: survivors,
                skipped,
            }
        },
    }
}

fn filter_by_health(
    registry: &ProviderRegistry,
    base: Vec<ProviderId>,
    config: &FallbackPolicyConfig,
) -> (Vec<ProviderId>, Vec<SkippedProvider>) {
    let mut survivors = Vec::with_capacity(base.len());
    let mut skipped = Vec::new();

    for id in base {
        let Some(health) = registry.health(&id) else {
            continue;
        };
        if health.circuit == CircuitState::Open {
            skipped.push(SkippedProvider {
                id,
                reason: SkipReason::CircuitOpen,
            });
            continue;
        }
        let below_threshold = config
            .health_thresholds
            .min_success_rate
            .is_some_and(|min| health.success_rate < min);
        if below_threshold {
            skipped.push(SkippedProvider {
                id,
                reason: SkipReason::BelowSuccessThreshold,
            });
            continue;
        }
        survivors.push(id);
    }

    (survivors, skipped)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use domain::{
        CircuitConfig, HealthThresholds, ProviderCallOutcome, ProviderCapability, ProviderErrorCode,
    };

    use super::*;
    use crate::ports::ManualClock;

    fn id(name: &str) -> ProviderId {
        ProviderId::from(name)
    }

    fn failure() -> ProviderCallOutcome {
        ProviderCallOutcome::failure(40, ProviderErrorCode::Upstream)
    }

    fn registry_with(ids: &[&str]) -> (ProviderRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let circuit = CircuitConfig {
            failure_count_to_open: 1,
            half_open_after_ms: 1_000,
            success_to_close: 1,
        };
        let registry = ProviderRegistry::with_clock(circuit, clock.clone());
        for name in ids {
            registry.register(id(name), ProviderCapability::current_only());
        }
        (registry, clock)
    }

    fn open_circuit(registry: &ProviderRegistry, name: &str) {
        registry.record_outcome(&id(name), &failure());
    }

    fn half_open_circuit(registry: &ProviderRegistry, clock: &ManualClock, name: &str) {
        registry.record_outcome(&id(name), &failure());
        clock.advance(Duration::milliseconds(1_000));
        registry.record_outcome(&id(name), &ProviderCallOutcome::success(10));
    }

    fn config(policy: FallbackPolicy) -> FallbackPolicyConfig {
        FallbackPolicyConfig {
            policy,
            ..FallbackPolicyConfig::default()
        }
    }

    #[test]
    fn priority_returns_base_order_verbatim() {
        let (registry, _clock) = registry_with(&["nws", "openweather"]);
        open_circuit(&registry, "nws");

        let selection = select_providers(
            &registry,
            &WeatherIntent::current(),
            &config(FallbackPolicy::Priority),
        );

        assert_eq!(selection.candidates, vec![id("nws"), id("openweather")]);
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn priority_then_health_skips_open_circuits() {
        let (registry, _clock) = registry_with(&["nws", "openweather"]);
        open_circuit(&registry, "nws");

        let selection = select_providers(
            &registry,
            &WeatherIntent::current(),
            &config(FallbackPolicy::PriorityThenHealth),
        );

        assert_eq!(selection.candidates, vec![id("openweather")]);
        assert_eq!(
            selection.skipped,
            vec![SkippedProvider {
                id: id("nws"),
                reason: SkipReason::CircuitOpen,
            }]
        );
    }

    #[test]
    fn priority_then_health_skips_below_threshold() {
        let registry = ProviderRegistry::new(CircuitConfig::default());
        registry.register(id("nws"), ProviderCapability::current_only());
        registry.register(id("openweather"), ProviderCapability::current_only());
        // One failure under default circuit tuning leaves the circuit
        // closed but drops the success rate to 0.8.
        registry.record_outcome(&id("nws"), &failure());

        let mut config = config(FallbackPolicy::PriorityThenHealth);
        config.health_thresholds = HealthThresholds {
            min_success_rate: Some(0.9),
            max_p95_ms: None,
        };

        let selection = select_providers(&registry, &WeatherIntent::current(), &config);

        assert_eq!(selection.candidates, vec![id("openweather")]);
        assert_eq!(
            selection.skipped,
            vec![SkippedProvider {
                id: id("nws"),
                reason: SkipReason::BelowSuccessThreshold,
            }]
        );
    }

    #[test]
    fn priority_then_health_probes_half_open_last() {
        let (registry, clock) = registry_with(&["nws", "openweather", "weatherbit"]);
        half_open_circuit(&registry, &clock, "nws");

        let selection = select_providers(
            &registry,
            &WeatherIntent::current(),
            &config(FallbackPolicy::PriorityThenHealth),
        );

        assert_eq!(
            selection.candidates,
            vec![id("openweather"), id("weatherbit"), id("nws")]
        );
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn all_half_open_keeps_base_order() {
        let (registry, clock) = registry_with(&["nws", "openweather"]);
        half_open_circuit(&registry, &clock, "nws");
        half_open_circuit(&registry, &clock, "openweather");

        let selection = select_providers(
            &registry,
            &WeatherIntent::current(),
            &config(FallbackPolicy::PriorityThenHealth),
        );

        assert_eq!(selection.candidates, vec![id("nws"), id("openweather")]);
    }

    #[test]
    fn below_threshold_half_open_is_skipped_not_demoted() {
        let (registry, clock) = registry_with(&["nws", "openweather"]);
        half_open_circuit(&registry, &clock, "nws");

        let mut config = config(FallbackPolicy::PriorityThenHealth);
        config.health_thresholds = HealthThresholds {
            min_success_rate: Some(0.95),
            max_p95_ms: None,
        };

        let selection = select_providers(&registry, &WeatherIntent::current(), &config);

        assert_eq!(selection.candidates, vec![id("openweather")]);
        assert_eq!(
            selection.skipped,
            vec![SkippedProvider {
                id: id("nws"),
                reason: SkipReason::BelowSuccessThreshold,
            }]
        );
    }

    #[test]
    fn weighted_orders_by_descending_weight() {
        let (registry, _clock) = registry_with(&["nws", "openweather", "weatherbit"]);

        let mut config = config(FallbackPolicy::Weighted);
        config.provider_weights.insert("openweather".to_owned(), 5.0);
        config.provider_weights.insert("weatherbit".to_owned(), 2.0);

        let selection = select_providers(&registry, &WeatherIntent::current(), &config);

        assert_eq!(
            selection.candidates,
            vec![id("openweather"), id("weatherbit"), id("nws")]
        );
    }

    #[test]
    fn weighted_ties_keep_registration_order() {
        let (registry, _clock) = registry_with(&["nws", "openweather", "weatherbit"]);

        let mut config = config(FallbackPolicy::Weighted);
        config.provider_weights.insert("weatherbit".to_owned(), 3.0);

        let selection = select_providers(&registry, &WeatherIntent::current(), &config);

        assert_eq!(
            selection.candidates,
            vec![id("weatherbit"), id("nws"), id("openweather")]
        );
    }

    #[test]
    fn weighted_filters_unhealthy_before_sorting() {
        let (registry, _clock) = registry_with(&["nws", "openweather"]);
        open_circuit(&registry, "openweather");

        let mut config = config(FallbackPolicy::Weighted);
        config.provider_weights.insert("openweather".to_owned(), 9.0);

        let selection = select_providers(&registry, &WeatherIntent::current(), &config);

        assert_eq!(selection.candidates, vec![id("nws")]);
        assert_eq!(
            selection.skipped,
            vec![SkippedProvider {
                id: id("openweather"),
                reason: SkipReason::CircuitOpen,
            }]
        );
    }

    #[test]
    fn empty_registry_selects_nothing() {
        let (registry, _clock) = registry_with(&[]);

        let selection = select_providers(
            &registry,
            &WeatherIntent::current(),
            &config(FallbackPolicy::PriorityThenHealth),
        );

        assert!(selection.candidates.is_empty());
        assert!(selection.skipped.is_empty());
    }

    #[test]
    fn intent_filtering_applies_before_policy() {
        let (registry, _clock) = registry_with(&["nws"]);
        let mut alerts = ProviderCapability::current_only();
        alerts.supports.alerts = true;
        registry.register(id("openweather"), alerts);

        let intent = WeatherIntent {
            alerts: true,
            ..WeatherIntent::current()
        };
        let selection = select_providers(&registry, &intent, &config(FallbackPolicy::Priority));

        assert_eq!(selection.candidates, vec![id("openweather")]);
    }

    #[test]
    fn skip_reasons_render_kebab_case() {
        assert_eq!(SkipReason::CircuitOpen.to_string(), "circuit-open");
        assert_eq!(
            SkipReason::BelowSuccessThreshold.to_string(),
            "below-success-threshold"
        );
    }
}
