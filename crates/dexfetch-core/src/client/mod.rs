//! Transient-fetch client.
//!
//! One logical fetch is a bounded number of GET + JSON-decode attempts. Every
//! failure mode is absorbed here: callers only ever see a decoded record or
//! [`Fetched::Unavailable`].

mod transport;

pub use transport::{CurlTransport, Transport};

use crate::retry::{self, RetryPolicy};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Outcome of a fetch after all attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The record was fetched and decoded.
    Record(T),
    /// Every attempt failed.
    Unavailable,
}

impl<T> Fetched<T> {
    pub fn as_ref(&self) -> Fetched<&T> {
        match self {
            Fetched::Record(r) => Fetched::Record(r),
            Fetched::Unavailable => Fetched::Unavailable,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetched::Unavailable)
    }
}

/// Fetch client: a transport plus the attempt policy and per-attempt timeout.
#[derive(Debug, Clone)]
pub struct FetchClient<T> {
    transport: T,
    policy: RetryPolicy,
    timeout: Duration,
}

impl<T: Transport> FetchClient<T> {
    pub fn new(transport: T, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            transport,
            policy,
            timeout,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and decode the body as `R`, retrying per policy.
    pub fn fetch<R: DeserializeOwned>(&self, url: &str) -> Fetched<R> {
        let result = retry::run_with_retry(&self.policy, |_attempt| {
            let body = self.transport.get(url, self.timeout)?;
            Ok(serde_json::from_slice::<R>(&body)?)
        });
        match result {
            Ok(record) => Fetched::Record(record),
            Err(e) => {
                tracing::warn!(
                    url,
                    attempts = self.policy.max_attempts,
                    kind = ?retry::classify(&e),
                    "fetch unavailable: {}",
                    e
                );
                Fetched::Unavailable
            }
        }
    }
}
