//! reqwest-backed transports.

mod async_reqwest;
mod blocking;

use std::time::Duration;

use voiceprint_core::error::TransportError;

pub use async_reqwest::ReqwestTransport;
pub use blocking::BlockingReqwestTransport;

/// User-Agent sent on every request.
pub const USER_AGENT: &str = concat!("voiceprint/", env!("CARGO_PKG_VERSION"));

/// Classify a reqwest failure. `timeout` is the limit the request ran under.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            duration_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Request {
            message: err.to_string(),
        }
    }
}

fn build_error(err: reqwest::Error) -> TransportError {
    TransportError::Request {
        message: format!("failed to build HTTP client: {}", err),
    }
}
