//! Wire schemas for the two API versions.
//!
//! The service exposes the same operations under a `v0` and a `v1` path
//! prefix, with differently shaped payloads. The version is chosen once when
//! the client is built ([`ApiVersion`]); decoding then yields version-neutral
//! types ([`Document`], [`MapResult`]) or, for crawl status, the tagged
//! [`CrawlStatusRecord`] which the polling state machine drives through the
//! [`StatusRecord`] capability trait.
//!
//! # Example
//!
//! ```
//! use firecrawl_client::schema::{ApiVersion, StatusRecord};
//!
//! let record = ApiVersion::V1
//!     .decode_status(br#"{"status":"scraping","total":4,"completed":1}"#, "check crawl status")
//!     .unwrap();
//! assert_eq!(record.status(), "scraping");
//! assert!(!record.has_data());
//! ```

mod document;
mod options;
pub mod v0;
pub mod v1;

pub use document::{Document, DocumentMetadata};
pub use options::{CrawlOptions, MapOptions, ScrapeFormat, ScrapeOptions};
pub(crate) use options::RequestBody;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FirecrawlError;

/// API schema version, selected at client construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V0,
    #[default]
    V1,
}

impl ApiVersion {
    /// Path prefix for this version.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V0 => "v0",
            Self::V1 => "v1",
        }
    }

    /// Decodes a scrape response into its document.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::ScrapeFailed`] when the payload's own `success` flag
    /// is false (even though the transport returned 200), or a decode error.
    pub fn decode_scrape(self, body: &[u8]) -> Result<Document, FirecrawlError> {
        let (success, data) = match self {
            Self::V0 => {
                let resp: v0::ScrapeResponse = decode(body, "scrape URL")?;
                (resp.success, resp.data.map(Document::from))
            }
            Self::V1 => {
                let resp: v1::ScrapeResponse = decode(body, "scrape URL")?;
                (resp.success, resp.data)
            }
        };
        if !success {
            return Err(FirecrawlError::ScrapeFailed);
        }
        Ok(data.unwrap_or_default())
    }

    /// Decodes a crawl submission response.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::MissingJobId`] if the job identifier is empty.
    pub fn decode_submit(self, body: &[u8]) -> Result<SubmitReceipt, FirecrawlError> {
        let receipt = match self {
            Self::V0 => {
                let resp: v0::CrawlSubmitResponse = decode(body, "start crawl job")?;
                SubmitReceipt {
                    id: resp.job_id,
                    status_url: None,
                }
            }
            Self::V1 => {
                let resp: v1::CrawlSubmitResponse = decode(body, "start crawl job")?;
                SubmitReceipt {
                    id: resp.id,
                    status_url: resp.url.filter(|u| !u.is_empty()),
                }
            }
        };
        if receipt.id.is_empty() {
            return Err(FirecrawlError::MissingJobId);
        }
        Ok(receipt)
    }

    /// Decodes a crawl status page into the tagged record for this version.
    ///
    /// # Errors
    ///
    /// A decode error if the payload is not status-shaped JSON.
    pub fn decode_status(
        self,
        body: &[u8],
        action: &str,
    ) -> Result<CrawlStatusRecord, FirecrawlError> {
        Ok(match self {
            Self::V0 => CrawlStatusRecord::V0(decode(body, action)?),
            Self::V1 => CrawlStatusRecord::V1(decode(body, action)?),
        })
    }

    /// Decodes a cancel response into the service-reported status.
    ///
    /// # Errors
    ///
    /// A decode error if the payload is not valid JSON.
    pub fn decode_cancel(self, body: &[u8]) -> Result<String, FirecrawlError> {
        Ok(match self {
            Self::V0 => decode::<v0::CancelResponse>(body, "cancel crawl job")?.status,
            Self::V1 => decode::<v1::CancelResponse>(body, "cancel crawl job")?.status,
        })
    }

    /// Decodes a map response. Both versions share the same shape.
    ///
    /// # Errors
    ///
    /// [`FirecrawlError::MapFailed`] with the service's message when the
    /// payload reports failure.
    pub fn decode_map(self, body: &[u8]) -> Result<MapResult, FirecrawlError> {
        let resp: v1::MapResponse = decode(body, "map")?;
        if resp.success {
            Ok(MapResult { links: resp.links })
        } else {
            Err(FirecrawlError::MapFailed {
                message: resp.error.unwrap_or_default(),
            })
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v0" => Ok(Self::V0),
            "v1" => Ok(Self::V1),
            other => Err(format!("unsupported API version: {other}")),
        }
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], action: &str) -> Result<T, FirecrawlError> {
    serde_json::from_slice(body).map_err(|e| FirecrawlError::decode(action, e))
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Job handle and optional direct status location returned by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: String,
    pub status_url: Option<String>,
}

/// Links discovered by a map operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapResult {
    pub links: Vec<String>,
}

/// Progress counters reported alongside a crawl status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlProgress {
    pub total: u64,
    pub completed: u64,
    pub credits_used: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// What the polling state machine needs to know about a status page.
pub trait StatusRecord {
    /// Raw status string; empty if the field was missing.
    fn status(&self) -> &str;

    /// True when the page carries at least one document.
    fn has_data(&self) -> bool;

    /// Continuation location of the next result page, if any.
    fn next_page(&self) -> Option<&str>;

    fn progress(&self) -> CrawlProgress;

    /// Moves the page's documents out, leaving it empty.
    fn take_documents(&mut self) -> Vec<Document>;
}

/// A decoded crawl status page, tagged by schema version.
#[derive(Debug, Clone)]
pub enum CrawlStatusRecord {
    V0(v0::CrawlStatusResponse),
    V1(v1::CrawlStatusResponse),
}

impl StatusRecord for CrawlStatusRecord {
    fn status(&self) -> &str {
        match self {
            Self::V0(r) => &r.status,
            Self::V1(r) => &r.status,
        }
    }

    fn has_data(&self) -> bool {
        match self {
            Self::V0(r) => r.data.as_ref().is_some_and(|d| !d.is_empty()),
            Self::V1(r) => r.data.as_ref().is_some_and(|d| !d.is_empty()),
        }
    }

    fn next_page(&self) -> Option<&str> {
        match self {
            Self::V0(_) => None,
            Self::V1(r) => r.next.as_deref().filter(|n| !n.is_empty()),
        }
    }

    fn progress(&self) -> CrawlProgress {
        match self {
            Self::V0(r) => CrawlProgress {
                total: r.total,
                completed: r.current,
                credits_used: 0,
                expires_at: None,
            },
            Self::V1(r) => CrawlProgress {
                total: r.total,
                completed: r.completed,
                credits_used: r.credits_used,
                expires_at: r.expires_at.clone(),
            },
        }
    }

    fn take_documents(&mut self) -> Vec<Document> {
        match self {
            Self::V0(r) => r
                .data
                .take()
                .unwrap_or_default()
                .into_iter()
                .map(Document::from)
                .collect(),
            Self::V1(r) => r.data.take().unwrap_or_default(),
        }
    }
}

/// A single status snapshot, as returned by a one-off status check.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatus {
    pub status: String,
    #[serde(flatten)]
    pub progress: CrawlProgress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    pub data: Vec<Document>,
}

impl From<CrawlStatusRecord> for CrawlStatus {
    fn from(mut record: CrawlStatusRecord) -> Self {
        Self {
            status: record.status().to_string(),
            progress: record.progress(),
            next: record.next_page().map(str::to_string),
            data: record.take_documents(),
        }
    }
}
