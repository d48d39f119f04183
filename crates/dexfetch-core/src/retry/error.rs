//! Per-attempt fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single fetch attempt (curl failure, HTTP error, or bad payload).
/// Classified before deciding on a retry; never surfaces past the fetch client.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be built or parsed.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body arrived but is not the expected JSON document.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}
