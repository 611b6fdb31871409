//! Geohash cell value object
//!
//! A geohash snaps a coordinate to a fixed-precision grid cell. The cell
//! hash doubles as the cache key for weather lookups (nearby requests
//! share one entry) and its center is the effective coordinate used for
//! provider calls, so every request mapping to the same cell queries the
//! same point.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;
use crate::value_objects::GeoLocation;

/// Standard geohash base32 alphabet (no a, i, l, o)
const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// A geohash-encoded grid cell at a fixed precision
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeohashCell {
    hash: String,
}

impl GeohashCell {
    /// Smallest supported precision (one character, ~5000 km cells)
    pub const MIN_PRECISION: u8 = 1;

    /// Largest supported precision
    pub const MAX_PRECISION: u8 = 19;

    /// Default precision (~4.9 km cells), a good match for point weather
    pub const DEFAULT_PRECISION: u8 = 5;

    /// Encode a location into its geohash cell at the given precision
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGeohashPrecision` when `precision`
    /// is outside [`Self::MIN_PRECISION`]..=[`Self::MAX_PRECISION`].
    pub fn encode(location: &GeoLocation, precision: u8) -> Result<Self, DomainError> {
        if !(Self::MIN_PRECISION..=Self::MAX_PRECISION).contains(&precision) {
            return Err(DomainError::InvalidGeohashPrecision(precision));
        }

        let latitude = location.latitude();
        let longitude = location.longitude();

        let mut lat_range = (-90.0_f64, 90.0_f64);
        let mut lon_range = (-180.0_f64, 180.0_f64);

        let mut hash = String::with_capacity(precision as usize);
        let mut index: usize = 0;
        let mut bits: u8 = 0;
        let mut even_bit = true;

        while hash.len() < precision as usize {
            if even_bit {
                let mid = (lon_range.0 + lon_range.1) / 2.0;
                if longitude >= mid {
                    index = (index << 1) | 1;
                    lon_range.0 = mid;
                } else {
                    index <<= 1;
                    lon_range.1 = mid;
                }
            } else {
                let mid = (lat_range.0 + lat_range.1) / 2.0;
                if latitude >= mid {
                    index = (index << 1) | 1;
                    lat_range.0 = mid;
                } else {
                    index <<= 1;
                    lat_range.1 = mid;
                }
            }
            even_bit = !even_bit;

            bits += 1;
            if bits == 5 {
                hash.push(char::from(BASE32[index]));
                bits = 0;
                index = 0;
            }
        }

        Ok(Self { hash })
    }

    /// Encode at [`Self::DEFAULT_PRECISION`]
    ///
    /// # Errors
    ///
    /// Never fails for the default precision; kept fallible for
    /// signature symmetry with [`Self::encode`].
    pub fn encode_default(location: &GeoLocation) -> Result<Self, DomainError> {
        Self::encode(location, Self::DEFAULT_PRECISION)
    }

    /// Decode the cell back to its center coordinate
    #[must_use]
    pub fn center(&self) -> GeoLocation {
        let mut lat_range = (-90.0_f64, 90.0_f64);
        let mut lon_range = (-180.0_f64, 180.0_f64);
        let mut even_bit = true;

        for byte in self.hash.bytes() {
            // Bytes can only come from BASE32; unknown bytes contribute nothing.
            let index = BASE32.iter().position(|b| *b == byte).unwrap_or(0);
            for shift in (0..5).rev() {
                let bit = (index >> shift) & 1;
                if even_bit {
                    let mid = (lon_range.0 + lon_range.1) / 2.0;
                    if bit == 1 {
                        lon_range.0 = mid;
                    } else {
                        lon_range.1 = mid;
                    }
                } else {
                    let mid = (lat_range.0 + lat_range.1) / 2.0;
                    if bit == 1 {
                        lat_range.0 = mid;
                    } else {
                        lat_range.1 = mid;
                    }
                }
                even_bit = !even_bit;
            }
        }

        GeoLocation::new_unchecked(
            (lat_range.0 + lat_range.1) / 2.0,
            (lon_range.0 + lon_range.1) / 2.0,
        )
    }

    /// The hash string (used verbatim as the cache key)
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Number of characters in the hash
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn precision(&self) -> u8 {
        self.hash.len() as u8
    }
}

impl fmt::Display for GeohashCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hash)
    }
}
