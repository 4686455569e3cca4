//! Request execution layer.
//!
//! Every API call goes through [`RequestExecutor::execute`], which attaches
//! the bearer token and JSON content type, retries HTTP 502 with exponential
//! backoff according to a per-call [`RetryPolicy`], and hands any other
//! non-200 response to [`classify_error_response`].
//!
//! # Features
//!
//! - Per-call retry budget (default single attempt, 3 / 500ms for crawl jobs)
//! - Backoff waits go through a [`Sleeper`], yielding the task instead of blocking
//! - Status-specific error messages (402, 408, 409, 500, other)
//! - Connection failures surface immediately, never retried

mod classify;
mod executor;
mod retry;
mod sleeper;

pub use classify::{NO_DETAILS, classify_error_response};
pub use executor::{ApiRequest, IDEMPOTENCY_KEY_HEADER, RequestExecutor};
pub use retry::{JOB_BACKOFF_BASE, JOB_MAX_ATTEMPTS, RetryPolicy, TRANSIENT_STATUS};
#[cfg(test)]
pub(crate) use sleeper::RecordingSleeper;
pub use sleeper::{Sleeper, TokioSleeper};
