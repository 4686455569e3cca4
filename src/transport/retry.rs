//! Per-call retry policy with exponential backoff.
//!
//! Only one response is considered transient: HTTP 502 (Bad Gateway). Every
//! other status, success or failure, ends the retry loop immediately, and a
//! connection-level failure is never retried.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use firecrawl_client::RetryPolicy;
//!
//! let policy = RetryPolicy::new(3, Duration::from_millis(500));
//! assert_eq!(policy.backoff_for(0), Duration::from_millis(500));
//! assert_eq!(policy.backoff_for(2), Duration::from_millis(2000));
//! ```

use std::time::Duration;

/// The single status code that triggers a retry.
pub const TRANSIENT_STATUS: u16 = 502;

/// Attempts used by job submission and status polling.
pub const JOB_MAX_ATTEMPTS: u32 = 3;

/// Base backoff used by job submission and status polling (500ms).
pub const JOB_BACKOFF_BASE: Duration = Duration::from_millis(500);

/// Exponent cap so the backoff computation cannot overflow.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Attempt budget and base backoff for one request.
///
/// # Default Values
///
/// - `max_attempts`: 1 (no retry)
/// - `backoff_base`: zero
///
/// # Delay Calculation
///
/// ```text
/// delay = backoff_base * 2^attempt_index
/// ```
///
/// where `attempt_index` is 0 for the wait after the first attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_base: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy; `max_attempts` is clamped to at least 1.
    #[must_use]
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Single attempt, no backoff.
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    /// The 3 attempts / 500ms policy used for crawl submission and status checks.
    #[must_use]
    pub fn job() -> Self {
        Self::new(JOB_MAX_ATTEMPTS, JOB_BACKOFF_BASE)
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn backoff_base(&self) -> Duration {
        self.backoff_base
    }

    /// Delay to wait after the attempt with the given 0-based index.
    #[must_use]
    pub fn backoff_for(&self, attempt_index: u32) -> Duration {
        let factor = 1u32 << attempt_index.min(MAX_BACKOFF_EXPONENT);
        self.backoff_base.saturating_mul(factor)
    }

    /// Whether a response with `status` after attempt `attempt_index` should be retried.
    #[must_use]
    pub fn should_retry(&self, status: u16, attempt_index: u32) -> bool {
        status == TRANSIENT_STATUS && attempt_index + 1 < self.max_attempts
    }
}
