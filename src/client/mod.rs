//! The public client facade.
//!
//! [`FirecrawlClient`] holds immutable configuration, a pooled HTTP client
//! and a [`Sleeper`]; it is cheap to clone and safe to share across tasks.
//! Each method performs one logical operation:
//!
//! - [`scrape_url`](FirecrawlClient::scrape_url) and
//!   [`map_url`](FirecrawlClient::map_url): one request, one response
//! - [`async_crawl_url`](FirecrawlClient::async_crawl_url): submit a crawl job
//! - [`wait_for_crawl`](FirecrawlClient::wait_for_crawl): poll a submitted job to completion
//! - [`crawl_url`](FirecrawlClient::crawl_url): submit and poll in one call
//! - [`check_crawl_status`](FirecrawlClient::check_crawl_status) and
//!   [`cancel_crawl`](FirecrawlClient::cancel_crawl): single job queries
//!
//! # Example
//!
//! ```no_run
//! use firecrawl_client::{ClientConfig, FirecrawlClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FirecrawlClient::new(ClientConfig::new(Some("fc-key"), None)?)?;
//! let doc = client.scrape_url("https://example.com", None).await?;
//! println!("{}", doc.markdown.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod operation;

pub use operation::{Operation, OperationOutcome};

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::FirecrawlError;
use crate::job::{CrawlResult, PollOptions, StatusSource, StatusTarget, poll_until_complete};
use crate::schema::{
    ApiVersion, CrawlOptions, CrawlStatus, CrawlStatusRecord, Document, MapOptions, MapResult,
    RequestBody, ScrapeOptions,
};
use crate::transport::{ApiRequest, RequestExecutor, RetryPolicy, Sleeper, TokioSleeper};

const ACTION_SCRAPE: &str = "scrape URL";
const ACTION_START_CRAWL: &str = "start crawl job";
const ACTION_CHECK_STATUS: &str = "check crawl status";
const ACTION_NEXT_PAGE: &str = "fetch next page of crawl status";
const ACTION_CANCEL: &str = "cancel crawl job";
const ACTION_MAP: &str = "map";

/// A submitted crawl job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlJob {
    pub id: String,
    /// Direct status location, when the service provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,
}

impl CrawlJob {
    /// Where to poll this job: the service's location if given, else its id.
    #[must_use]
    pub fn status_target(&self) -> StatusTarget {
        match &self.status_url {
            Some(url) => StatusTarget::at(&self.id, url),
            None => StatusTarget::job(&self.id),
        }
    }
}

/// Client for the Firecrawl API.
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    config: ClientConfig,
    executor: RequestExecutor,
    sleeper: Arc<dyn Sleeper>,
}

impl FirecrawlClient {
    /// Creates a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built or
    /// the API key cannot be sent as a header.
    pub fn new(config: ClientConfig) -> Result<Self, FirecrawlError> {
        let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
        let executor = RequestExecutor::new(&config, Arc::clone(&sleeper))?;
        debug!(base_url = %config.base_url(), version = %config.version(), "client created");
        Ok(Self {
            config,
            executor,
            sleeper,
        })
    }

    /// Replaces the sleeper used for retry backoff and poll intervals.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.executor = self.executor.with_sleeper(Arc::clone(&sleeper));
        self.sleeper = sleeper;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.config.version()
    }

    /// Scrapes a single page.
    ///
    /// # Errors
    ///
    /// Transport and classified API errors, or [`FirecrawlError::ScrapeFailed`]
    /// if the payload reports `success: false`.
    #[instrument(skip(self, options))]
    pub async fn scrape_url(
        &self,
        url: &str,
        options: Option<&ScrapeOptions>,
    ) -> Result<Document, FirecrawlError> {
        let endpoint = self.config.endpoint(&["scrape"]);
        let request =
            ApiRequest::post_json(&endpoint, ACTION_SCRAPE, &RequestBody::new(url, options))?;
        let body = self.executor.execute(request).await?;
        self.version().decode_scrape(&body)
    }

    /// Submits a crawl job and returns without waiting for it.
    ///
    /// The idempotency key, when given, lets the service deduplicate
    /// resubmissions; reusing a key for a different job surfaces as a
    /// 409 Conflict error.
    ///
    /// # Errors
    ///
    /// Transport and classified API errors, or
    /// [`FirecrawlError::MissingJobId`] if the response has no job id.
    #[instrument(skip(self, options, idempotency_key))]
    pub async fn async_crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
    ) -> Result<CrawlJob, FirecrawlError> {
        let endpoint = self.config.endpoint(&["crawl"]);
        let request =
            ApiRequest::post_json(&endpoint, ACTION_START_CRAWL, &RequestBody::new(url, options))?
                .with_idempotency_key(idempotency_key)
                .with_retry(RetryPolicy::job());
        let body = self.executor.execute(request).await?;
        let receipt = self.version().decode_submit(&body)?;
        info!(job_id = %receipt.id, "crawl job submitted");
        Ok(CrawlJob {
            id: receipt.id,
            status_url: receipt.status_url,
        })
    }

    /// Submits a crawl job and polls it until it finishes.
    ///
    /// Status is polled through the configured base URL by job id.
    ///
    /// # Errors
    ///
    /// Any submission error, or any lifecycle error from
    /// [`poll_until_complete`].
    pub async fn crawl_url(
        &self,
        url: &str,
        options: Option<&CrawlOptions>,
        idempotency_key: Option<&str>,
        poll: PollOptions,
    ) -> Result<CrawlResult, FirecrawlError> {
        let job = self.async_crawl_url(url, options, idempotency_key).await?;
        self.poll(&StatusTarget::job(job.id), &poll).await
    }

    /// Polls an already-submitted job until it finishes.
    ///
    /// Uses the job's service-provided status location when present.
    ///
    /// # Errors
    ///
    /// Any lifecycle error from [`poll_until_complete`].
    pub async fn wait_for_crawl(
        &self,
        job: &CrawlJob,
        poll: PollOptions,
    ) -> Result<CrawlResult, FirecrawlError> {
        self.poll(&job.status_target(), &poll).await
    }

    /// Fetches the current status of a job once, without polling or pagination.
    ///
    /// # Errors
    ///
    /// Transport, classified API or decode errors.
    #[instrument(skip(self))]
    pub async fn check_crawl_status(&self, id: &str) -> Result<CrawlStatus, FirecrawlError> {
        let record = self.status_source().fetch_status(&StatusTarget::job(id)).await?;
        Ok(CrawlStatus::from(record))
    }

    /// Cancels a crawl job, returning the status the service reports.
    ///
    /// # Errors
    ///
    /// Transport, classified API or decode errors.
    #[instrument(skip(self))]
    pub async fn cancel_crawl(&self, id: &str) -> Result<String, FirecrawlError> {
        let endpoint = self.config.endpoint(&["crawl", id]);
        let body = self
            .executor
            .execute(ApiRequest::delete(&endpoint, ACTION_CANCEL))
            .await?;
        let status = self.version().decode_cancel(&body)?;
        info!(job_id = id, status = %status, "crawl job cancel requested");
        Ok(status)
    }

    /// Lists the links of a site.
    ///
    /// # Errors
    ///
    /// Transport and classified API errors, or [`FirecrawlError::MapFailed`]
    /// carrying the service's own message.
    #[instrument(skip(self, options))]
    pub async fn map_url(
        &self,
        url: &str,
        options: Option<&MapOptions>,
    ) -> Result<MapResult, FirecrawlError> {
        let endpoint = self.config.endpoint(&["map"]);
        let request = ApiRequest::post_json(&endpoint, ACTION_MAP, &RequestBody::new(url, options))?;
        let body = self.executor.execute(request).await?;
        self.version().decode_map(&body)
    }

    /// Runs any [`Operation`], returning the matching [`OperationOutcome`].
    ///
    /// # Errors
    ///
    /// Whatever the underlying operation returns.
    pub async fn execute(&self, operation: Operation) -> Result<OperationOutcome, FirecrawlError> {
        Ok(match operation {
            Operation::Scrape { url, options } => {
                OperationOutcome::Scraped(self.scrape_url(&url, options.as_ref()).await?)
            }
            Operation::SubmitCrawl {
                url,
                options,
                idempotency_key,
            } => OperationOutcome::Submitted(
                self.async_crawl_url(&url, options.as_ref(), idempotency_key.as_deref())
                    .await?,
            ),
            Operation::Crawl {
                url,
                options,
                idempotency_key,
                poll,
            } => OperationOutcome::Crawled(
                self.crawl_url(&url, options.as_ref(), idempotency_key.as_deref(), poll)
                    .await?,
            ),
            Operation::CrawlStatus { id } => {
                OperationOutcome::Status(self.check_crawl_status(&id).await?)
            }
            Operation::CancelCrawl { id } => {
                let status = self.cancel_crawl(&id).await?;
                OperationOutcome::Cancelled { id, status }
            }
            Operation::Map { url, options } => {
                OperationOutcome::Mapped(self.map_url(&url, options.as_ref()).await?)
            }
        })
    }

    async fn poll(
        &self,
        target: &StatusTarget,
        poll: &PollOptions,
    ) -> Result<CrawlResult, FirecrawlError> {
        info!(
            job_id = %target.job_id,
            interval_secs = poll.effective_interval().as_secs(),
            "waiting for crawl job"
        );
        poll_until_complete(&self.status_source(), target, poll, self.sleeper.as_ref()).await
    }

    fn status_source(&self) -> ApiStatusSource<'_> {
        ApiStatusSource { client: self }
    }
}

/// [`StatusSource`] backed by the HTTP API.
struct ApiStatusSource<'a> {
    client: &'a FirecrawlClient,
}

impl ApiStatusSource<'_> {
    async fn fetch(&self, url: &str, action: &str) -> Result<CrawlStatusRecord, FirecrawlError> {
        let request = ApiRequest::get(url, action).with_retry(RetryPolicy::job());
        let body = self.client.executor.execute(request).await?;
        self.client.version().decode_status(&body, action)
    }
}

#[async_trait]
impl<'a> StatusSource for ApiStatusSource<'a> {
    type Record = CrawlStatusRecord;

    async fn fetch_status(&self, target: &StatusTarget) -> Result<CrawlStatusRecord, FirecrawlError> {
        let url = match &target.location {
            Some(location) => location.clone(),
            None => self.client.config.endpoint(&["crawl", &target.job_id]),
        };
        self.fetch(&url, ACTION_CHECK_STATUS).await
    }

    async fn fetch_page(&self, location: &str) -> Result<CrawlStatusRecord, FirecrawlError> {
        self.fetch(location, ACTION_NEXT_PAGE).await
    }
}
