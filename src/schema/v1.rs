//! Response payloads of the `v1` API.

use serde::Deserialize;

use super::Document;

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Document>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSubmitResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Direct status-check location for the new job.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStatusResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub completed: u64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub credits_used: u64,
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Continuation location for the next page of results.
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Document>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapResponse {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub links: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}
