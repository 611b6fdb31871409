//! Application layer - Weather request orchestration
//!
//! Contains the provider registry, the selection policy engine, the
//! orchestrating weather service, and port definitions. Orchestrates
//! domain objects and infrastructure adapters.

pub mod error;
pub mod policy;
pub mod ports;
pub mod registry;
pub mod services;

pub use error::ApplicationError;
pub use policy::{ProviderSelection, SkipReason, SkippedProvider, select_providers};
pub use ports::*;
pub use registry::ProviderRegistry;
pub use services::*;
