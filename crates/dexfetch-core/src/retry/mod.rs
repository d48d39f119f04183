//! Retry and backoff policy.
//!
//! This module classifies per-attempt fetch failures (timeouts, throttling,
//! connection failures, malformed payloads) and decides whether another
//! attempt is made, so the fetch client and its callers share one policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::classify;
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
