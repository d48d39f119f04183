//! Classify HTTP status, curl errors and decode failures into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
pub(crate) fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        400..=499 => ErrorKind::Client(code as u16),
        _ => ErrorKind::Malformed,
    }
}

/// Classify a curl error for retry decisions.
pub(crate) fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
        || e.is_ssl_connect_error()
    {
        return ErrorKind::Connection;
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return ErrorKind::Other;
    }
    // Anything else libcurl reports mid-transfer is treated as a flaky connection.
    ErrorKind::Connection
}

/// Classify a fetch error into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::InvalidUrl { .. } => ErrorKind::Other,
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
        FetchError::Decode(_) => ErrorKind::Malformed,
    }
}
