//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum DomainError {
    /// Coordinate pair outside the valid latitude/longitude ranges
    #[error("Invalid latitude or longitude: {latitude}, {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Geohash precision outside the supported range
    #[error("Invalid geohash precision: {0} (must be 1 to 19)")]
    InvalidGeohashPrecision(u8),
}
