//! Provider adapters
//!
//! Adapters implement the application's provider port over the
//! integration clients and own the error classification boundary:
//! whatever shape a client reports a failure in, the rest of the
//! system only ever sees a `ProviderError`.

mod nws_adapter;
mod openweather_adapter;

pub use nws_adapter::NwsAdapter;
pub use openweather_adapter::OpenWeatherAdapter;

use domain::ProviderErrorCode;

/// Classify an HTTP status into a provider error code
///
/// 429 and 404 get dedicated codes, 400 and 422 mark a rejected
/// request, any 5xx is an upstream fault, and everything else falls
/// through to unavailable.
pub(crate) const fn status_error_code(status: u16) -> ProviderErrorCode {
    match status {
        429 => ProviderErrorCode::RateLimit,
        404 => ProviderErrorCode::NotFound,
        400 | 422 => ProviderErrorCode::Validation,
        500..=599 => ProviderErrorCode::Upstream,
        _ => ProviderErrorCode::Unavailable,
    }
}
