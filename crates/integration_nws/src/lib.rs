//! National Weather Service integration
//!
//! Client for api.weather.gov (<https://www.weather.gov/documentation/services-web-api>).
//! Resolves the observation station serving a coordinate and normalizes
//! its latest observation into the shared weather model.

pub mod client;
mod cloudiness;
mod condition;
mod models;

pub use client::{NwsClient, NwsConfig, NwsError};
