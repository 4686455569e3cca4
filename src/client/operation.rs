//! Operations as data, and their results as a tagged union.
//!
//! Callers that dispatch dynamically (the CLI, job runners) build an
//! [`Operation`] and match on the [`OperationOutcome`] instead of inspecting
//! result types at runtime.

use serde::Serialize;

use super::CrawlJob;
use crate::job::{CrawlResult, PollOptions};
use crate::schema::{CrawlOptions, CrawlStatus, Document, MapOptions, MapResult, ScrapeOptions};

/// A single client operation and its inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Scrape {
        url: String,
        options: Option<ScrapeOptions>,
    },
    /// Submit a crawl job without waiting.
    SubmitCrawl {
        url: String,
        options: Option<CrawlOptions>,
        idempotency_key: Option<String>,
    },
    /// Submit a crawl job and poll it to completion.
    Crawl {
        url: String,
        options: Option<CrawlOptions>,
        idempotency_key: Option<String>,
        poll: PollOptions,
    },
    CrawlStatus {
        id: String,
    },
    CancelCrawl {
        id: String,
    },
    Map {
        url: String,
        options: Option<MapOptions>,
    },
}

impl Operation {
    /// Short name used in logs and serialized outcomes.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scrape { .. } => "scrape",
            Self::SubmitCrawl { .. } => "submit_crawl",
            Self::Crawl { .. } => "crawl",
            Self::CrawlStatus { .. } => "crawl_status",
            Self::CancelCrawl { .. } => "cancel_crawl",
            Self::Map { .. } => "map",
        }
    }
}

/// Result of an [`Operation`], keyed by the operation that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "operation", content = "result", rename_all = "snake_case")]
pub enum OperationOutcome {
    Scraped(Document),
    Submitted(CrawlJob),
    Crawled(CrawlResult),
    Status(CrawlStatus),
    Cancelled { id: String, status: String },
    Mapped(MapResult),
}
