//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod cache_port;
mod clock;
mod outcome_port;
mod provider_port;

#[cfg(test)]
pub use cache_port::MockCachePort;
pub use cache_port::{CachePort, ttl};
pub use clock::{Clock, ManualClock, SystemClock};
pub use outcome_port::{NoopOutcomeReporter, OutcomeReporter};
#[cfg(test)]
pub use provider_port::MockWeatherProviderPort;
pub use provider_port::WeatherProviderPort;
