//! Outcome reporter port
//!
//! Every provider call pushes its outcome through this sink, decoupling
//! the call site from how health is tracked. The registry implements it
//! to drive circuit accounting; the default reporter drops outcomes.

use domain::{ProviderCallOutcome, ProviderId};

/// Sink for per-call provider outcomes
///
/// Implementations must not fail; a reporting problem never aborts the
/// request path.
pub trait OutcomeReporter: Send + Sync {
    /// Record one call outcome for a provider
    fn record(&self, provider: &ProviderId, outcome: &ProviderCallOutcome);
}

/// Reporter that discards every outcome
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOutcomeReporter;

impl OutcomeReporter for NoopOutcomeReporter {
    fn record(&self, _provider: &ProviderId, _outcome: &ProviderCallOutcome) {}
}
