//! The crawl polling state machine.
//!
//! ```text
//!            in progress: wait interval
//!           ┌──────────┐
//!           ▼          │
//!       ┌─────────┐────┘     completed + data      ┌───────────┐
//!  ───▶ │ Polling │ ──────────────────────────────▶ │ Succeeded │
//!       └─────────┘  (follow continuation pages)    └───────────┘
//!         │     ▲
//!         │     │ completed, no data: wait (at most 3 times)
//!         │     └──────
//!         │
//!         │ unknown status / empty status / 4th empty completion
//!         ▼
//!       ┌────────┐
//!       │ Failed │
//!       └────────┘
//! ```

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::{CrawlResult, JobStatus, PollOptions, StatusSource, StatusTarget};
use crate::error::FirecrawlError;
use crate::schema::StatusRecord;
use crate::transport::Sleeper;

/// Number of consecutive "completed without data" polls tolerated before failing.
pub const MAX_EMPTY_COMPLETIONS: u32 = 3;

/// What one status observation means for the loop.
enum Transition<R> {
    /// Keep polling after the interval.
    Wait,
    /// Completed with data; collect the result pages starting from this one.
    Collect(R),
    Fail(FirecrawlError),
}

/// Polls a crawl job until it completes, fails, or exhausts its budgets.
///
/// Every non-terminal branch waits [`PollOptions::effective_interval`]
/// before the next query, so the loop never spins.
///
/// # Errors
///
/// - [`FirecrawlError::InvalidStatus`] when a response has no status
/// - [`FirecrawlError::JobFailed`] for any status outside the known set
/// - [`FirecrawlError::NoData`] after more than [`MAX_EMPTY_COMPLETIONS`]
///   consecutive completed-but-empty responses
/// - [`FirecrawlError::DeadlineExceeded`] when `max_wait` would be exceeded
/// - Any transport, classification or decode error from the source
#[instrument(skip(source, options, sleeper), fields(job_id = %target.job_id))]
pub async fn poll_until_complete<S>(
    source: &S,
    target: &StatusTarget,
    options: &PollOptions,
    sleeper: &dyn Sleeper,
) -> Result<CrawlResult, FirecrawlError>
where
    S: StatusSource + ?Sized,
{
    let interval = options.effective_interval();
    let mut waited = Duration::ZERO;
    let mut empty_completions = 0u32;
    let mut polls = 0u32;

    loop {
        let record = source.fetch_status(target).await?;
        polls += 1;

        match observe(record, &mut empty_completions) {
            Transition::Collect(record) => {
                info!(polls, "crawl completed, collecting results");
                return collect_pages(source, &target.job_id, record).await;
            }
            Transition::Fail(err) => return Err(err),
            Transition::Wait => {}
        }

        if let Some(budget) = options.max_wait
            && waited + interval > budget
        {
            return Err(FirecrawlError::DeadlineExceeded {
                job_id: target.job_id.clone(),
                waited_secs: waited.as_secs(),
            });
        }

        sleeper.sleep(interval).await;
        waited += interval;
    }
}

fn observe<R: StatusRecord>(record: R, empty_completions: &mut u32) -> Transition<R> {
    let Some(status) = JobStatus::parse(record.status()) else {
        return Transition::Fail(FirecrawlError::InvalidStatus);
    };

    match status {
        JobStatus::Completed if record.has_data() => Transition::Collect(record),
        JobStatus::Completed => {
            *empty_completions += 1;
            if *empty_completions > MAX_EMPTY_COMPLETIONS {
                return Transition::Fail(FirecrawlError::NoData);
            }
            debug!(
                empty_completions = *empty_completions,
                "completed without data, polling again"
            );
            Transition::Wait
        }
        status if status.is_in_progress() => {
            *empty_completions = 0;
            let progress = record.progress();
            debug!(
                status = %status,
                completed = progress.completed,
                total = progress.total,
                "crawl in progress"
            );
            Transition::Wait
        }
        other => Transition::Fail(FirecrawlError::job_failed(other.as_str())),
    }
}

/// Concatenates the first page with every continuation page, in fetch order.
async fn collect_pages<S>(
    source: &S,
    job_id: &str,
    mut record: S::Record,
) -> Result<CrawlResult, FirecrawlError>
where
    S: StatusSource + ?Sized,
{
    let mut data = record.take_documents();
    let mut progress = record.progress();
    let mut next = record.next_page().map(str::to_string);
    let mut visited = HashSet::new();
    let mut pages = 1usize;

    while let Some(location) = next {
        if !visited.insert(location.clone()) {
            return Err(FirecrawlError::PaginationCycle { location });
        }
        debug!(page = pages + 1, location = %location, "fetching next result page");

        let mut page = source.fetch_page(&location).await?;
        data.extend(page.take_documents());
        progress = page.progress();
        next = page.next_page().map(str::to_string);
        pages += 1;
    }

    info!(pages, documents = data.len(), "crawl results collected");
    Ok(CrawlResult {
        id: job_id.to_string(),
        status: JobStatus::Completed,
        progress,
        pages,
        data,
    })
}
