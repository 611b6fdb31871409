//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod geohash_cell;

pub use geo_location::GeoLocation;
pub use geohash_cell::GeohashCell;
