//! Firecrawl Client Library
//!
//! A typed async client for the Firecrawl scraping and crawling service. It
//! turns in-process calls (scrape a URL, crawl a site, map a site's links)
//! into authenticated HTTP requests and decodes the JSON responses back into
//! typed results.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Credential, base URL and timeout resolution
//! - [`error`] - The error taxonomy shared by every operation
//! - [`schema`] - Request options, documents and the two response schema versions
//! - [`transport`] - Request execution with 502 retry and error classification
//! - [`job`] - Crawl job status and the polling lifecycle state machine
//! - [`client`] - The [`FirecrawlClient`] facade tying it all together
//!
//! # Example
//!
//! ```no_run
//! use firecrawl_client::{ClientConfig, CrawlOptions, FirecrawlClient, PollOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FirecrawlClient::new(ClientConfig::from_env()?)?;
//! let result = client
//!     .crawl_url("https://example.com", Some(&CrawlOptions::default()), None, PollOptions::default())
//!     .await?;
//! println!("crawled {} pages", result.data.len());
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod schema;
pub mod transport;

// Re-export commonly used types
pub use client::{CrawlJob, FirecrawlClient, Operation, OperationOutcome};
pub use config::{ApiVersion, ClientConfig, DEFAULT_API_URL};
pub use error::FirecrawlError;
pub use job::{CrawlResult, JobStatus, MIN_POLL_INTERVAL_SECS, PollOptions};
pub use schema::{
    CrawlOptions, CrawlStatus, Document, DocumentMetadata, MapOptions, MapResult, ScrapeFormat,
    ScrapeOptions,
};
pub use transport::{RetryPolicy, Sleeper, TokioSleeper};
