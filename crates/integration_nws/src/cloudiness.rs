//! Cloud cover derivation from METAR cloud layers
//!
//! Station observations report sky cover as layered METAR amount codes
//! rather than a percentage. The codes map to the midpoint coverage of
//! their METAR oktas band, and the layers average into one figure.

use crate::models::CloudLayer;

/// Average cloud cover percentage across the reported layers
///
/// An empty layer list means a clear sky, so it reports 0.
#[must_use]
pub fn cloudiness_from_layers(layers: &[CloudLayer]) -> f64 {
    if layers.is_empty() {
        return 0.0;
    }

    let sum: f64 = layers
        .iter()
        .map(|layer| cloud_code_to_percent(&layer.amount))
        .sum();
    (sum / layers.len() as f64).round()
}

// Band values per http://www.moratech.com/aviation/metar-class/metar-pg10-sky.html
fn cloud_code_to_percent(code: &str) -> f64 {
    match code {
        "FEW" => 20.0,
        "SCT" => 40.0,
        "BKN" => 75.0,
        // VV means the sky is obscured, treated as fully covered
        "OVC" | "VV" => 100.0,
        _ => 0.0,
    }
}
