//! Domain layer for weathermux
//!
//! Contains the normalized weather model, the provider capability and
//! health vocabulary, and coordinate/geohash value objects. This layer
//! has no I/O dependencies and defines the ubiquitous language.

pub mod condition;
pub mod errors;
pub mod provider;
pub mod value_objects;
pub mod weather;

pub use condition::StandardCondition;
pub use errors::DomainError;
pub use provider::{
    CircuitConfig, CircuitState, FallbackPolicy, FallbackPolicyConfig, HealthThresholds,
    ProviderCallOutcome, ProviderCapability, ProviderError, ProviderErrorCode,
    ProviderHealthSnapshot, ProviderId, SupportedData, UnitSystem, WeatherIntent,
};
pub use value_objects::{GeoLocation, GeohashCell};
pub use weather::{Conditions, Percentage, Temperature, TemperatureUnit, WeatherFields, WeatherReport};
