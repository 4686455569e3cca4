//! Caller-supplied request options.
//!
//! Every field is optional. Absent fields are left out of the outgoing JSON
//! body entirely (never sent as `null`); nothing is defaulted on the
//! caller's behalf.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content formats the service can return for a scraped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrapeFormat {
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "html")]
    Html,
    #[serde(rename = "rawHtml")]
    RawHtml,
    #[serde(rename = "links")]
    Links,
    #[serde(rename = "screenshot")]
    Screenshot,
    #[serde(rename = "screenshot@fullPage")]
    ScreenshotFullPage,
}

impl ScrapeFormat {
    /// Wire name of the format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::RawHtml => "rawHtml",
            Self::Links => "links",
            Self::Screenshot => "screenshot",
            Self::ScreenshotFullPage => "screenshot@fullPage",
        }
    }
}

impl fmt::Display for ScrapeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrapeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "rawHtml" | "raw-html" => Ok(Self::RawHtml),
            "links" => Ok(Self::Links),
            "screenshot" => Ok(Self::Screenshot),
            "screenshot@fullPage" | "screenshot-full-page" => Ok(Self::ScreenshotFullPage),
            other => Err(format!("unknown scrape format: {other}")),
        }
    }
}

/// Options for a single-page scrape, also nested inside [`CrawlOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<ScrapeFormat>>,
    /// Extra headers the service should send when fetching the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_main_content: Option<bool>,
    /// Milliseconds to wait for the page before capturing it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u32>,
    #[serde(rename = "parsePDF", skip_serializing_if = "Option::is_none")]
    pub parse_pdf: Option<bool>,
    /// Service-side timeout in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
}

/// Options for an asynchronous site crawl.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    /// Scrape options applied to every crawled page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_options: Option<ScrapeOptions>,
    /// URL the service notifies as the crawl progresses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_backward_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_external_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,
}

/// Options for a site map (link discovery) request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_subdomains: Option<bool>,
    /// Only return links relevant to this query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Outgoing body: the target URL plus whatever options are present.
#[derive(Debug, Serialize)]
pub(crate) struct RequestBody<'a, O: Serialize> {
    pub url: &'a str,
    #[serde(flatten)]
    pub options: Option<&'a O>,
}

impl<'a, O: Serialize> RequestBody<'a, O> {
    pub(crate) fn new(url: &'a str, options: Option<&'a O>) -> Self {
        Self { url, options }
    }
}
