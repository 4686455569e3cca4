//! Crawl job lifecycle: status, polling options and the polling state machine.
//!
//! A crawl is submitted once and then observed by repeatedly querying its
//! status. [`poll_until_complete`] owns that loop: it waits between polls,
//! fails on unknown statuses, tolerates a short "completed but no data yet"
//! window, and follows continuation pages once data arrives.
//!
//! The loop reaches the service through the [`StatusSource`] trait, which
//! the client implements over HTTP and tests implement with scripted pages.

mod poller;
mod status;

pub use poller::{MAX_EMPTY_COMPLETIONS, poll_until_complete};
pub use status::JobStatus;

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::FirecrawlError;
use crate::schema::{CrawlProgress, Document, StatusRecord};

/// Smallest wait between status polls, in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 2;

/// Caller-controlled polling behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Requested seconds between polls; floored to [`MIN_POLL_INTERVAL_SECS`].
    pub interval_secs: u64,
    /// Optional budget for the total time spent waiting between polls.
    ///
    /// `None` (the default) polls for as long as the job runs.
    pub max_wait: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval_secs: MIN_POLL_INTERVAL_SECS,
            max_wait: None,
        }
    }
}

impl PollOptions {
    #[must_use]
    pub fn with_interval(interval_secs: u64) -> Self {
        Self {
            interval_secs,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn max_wait(mut self, budget: Duration) -> Self {
        self.max_wait = Some(budget);
        self
    }

    /// The wait actually applied between polls.
    #[must_use]
    pub fn effective_interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(MIN_POLL_INTERVAL_SECS))
    }
}

/// Where to query a job's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTarget {
    pub job_id: String,
    /// Service-provided status location; used instead of the id-based path when set.
    pub location: Option<String>,
}

impl StatusTarget {
    /// Target addressed by job id through the configured base URL.
    #[must_use]
    pub fn job(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            location: None,
        }
    }

    #[must_use]
    pub fn at(job_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            location: Some(location.into()),
        }
    }
}

/// Source of crawl status pages.
#[async_trait]
pub trait StatusSource: Send + Sync {
    type Record: StatusRecord + Send;

    /// Queries the current status of the job.
    async fn fetch_status(&self, target: &StatusTarget) -> Result<Self::Record, FirecrawlError>;

    /// Fetches a continuation page of a completed job's results.
    async fn fetch_page(&self, location: &str) -> Result<Self::Record, FirecrawlError>;
}

/// Final outcome of a successfully completed crawl.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResult {
    pub id: String,
    pub status: JobStatus,
    #[serde(flatten)]
    pub progress: CrawlProgress,
    /// Number of result pages fetched (first page plus continuations).
    pub pages: usize,
    /// All documents, in page-fetch order.
    pub data: Vec<Document>,
}
