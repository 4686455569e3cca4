//! Response payloads of the legacy `v0` API.
//!
//! `v0` names the job identifier `jobId`, reports progress as `current`,
//! returns page content under `content`/`linksOnPage`, and never paginates.

use serde::Deserialize;

use super::{Document, DocumentMetadata};

/// A page in the `v0` shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDocument {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub raw_html: Option<String>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub links_on_page: Option<Vec<String>>,
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
}

impl From<LegacyDocument> for Document {
    fn from(doc: LegacyDocument) -> Self {
        Self {
            // v0 always fills `content` with markdown; prefer the explicit field.
            markdown: doc.markdown.or(doc.content),
            html: doc.html,
            raw_html: doc.raw_html,
            screenshot: doc.screenshot,
            links: doc.links_on_page,
            metadata: doc.metadata,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<LegacyDocument>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlSubmitResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub job_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatusResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub current: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total: u64,
    #[serde(default)]
    pub data: Option<Vec<LegacyDocument>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
}
