//! HTTP GET transport.
//!
//! Uses the curl crate (libcurl). Runs in the current thread; each call is
//! one attempt with its own timeout.

use crate::config::MIN_ATTEMPT_TIMEOUT;
use crate::retry::FetchError;
use std::time::Duration;

/// One blocking GET returning the response body on 2xx.
pub trait Transport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError>;
}

/// libcurl-backed transport.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    user_agent: String,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            user_agent: format!("dexfetch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::new();
        // A zero timeout would disable libcurl's limit entirely.
        let timeout = timeout.max(MIN_ATTEMPT_TIMEOUT);

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(timeout)?;
        easy.timeout(timeout)?;

        let mut list = curl::easy::List::new();
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        Ok(body)
    }
}
