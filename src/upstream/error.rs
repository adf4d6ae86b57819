//! Upstream call errors.

use thiserror::Error;

/// Anything that keeps an upstream payload from reaching the caller.
///
/// Every variant is answered with `502 Bad Gateway`. A non-2xx upstream status
/// is not an error: its body is forwarded like any other.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connect, send or body-read failure.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream declared JSON but sent something else.
    #[error("upstream returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid upstream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid upstream header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}
