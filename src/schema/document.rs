//! Scraped documents as returned by scrape and crawl operations.

use serde::{Deserialize, Serialize};

/// A single scraped page.
///
/// Each content field is present only if its format was requested and the
/// service produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_html: Option<String>,
    /// Screenshot reference (usually a URL to the stored image).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Outbound links found on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
}

impl Document {
    /// The URL the page was fetched from, if the service reported it.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.metadata.as_ref()?.source_url.as_deref()
    }

    /// Page-level error, set when this particular page failed to scrape.
    #[must_use]
    pub fn page_error(&self) -> Option<&str> {
        self.metadata.as_ref()?.error.as_deref()
    }
}

/// Descriptive and fetch metadata for a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,

    // OpenGraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_determiner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_locale: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub og_locale_alternate: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_video: Option<String>,

    // Dublin Core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dc_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcterms_keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_section: Option<String>,

    #[serde(rename = "sourceURL", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// HTTP status the service observed when fetching the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_decodes_v1_shape() {
        let raw = r##"{
            "markdown": "# Hello",
            "rawHtml": "<h1>Hello</h1>",
            "links": ["https://example.com/a"],
            "metadata": {
                "title": "Hello",
                "ogLocaleAlternate": ["fr_FR"],
                "sourceURL": "https://example.com",
                "statusCode": 200,
                "dctermsCreated": "2024-01-01"
            }
        }"##;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.markdown.as_deref(), Some("# Hello"));
        assert_eq!(doc.raw_html.as_deref(), Some("<h1>Hello</h1>"));
        assert_eq!(doc.source_url(), Some("https://example.com"));
        let meta = doc.metadata.unwrap();
        assert_eq!(meta.status_code, Some(200));
        assert_eq!(meta.og_locale_alternate, vec!["fr_FR".to_string()]);
        assert_eq!(meta.dcterms_created.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_page_error_surfaces_from_metadata() {
        let raw = r#"{"metadata": {"sourceURL": "https://x.test", "statusCode": 404, "error": "Not Found"}}"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.page_error(), Some("Not Found"));
        assert!(doc.markdown.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let doc: Document =
            serde_json::from_str(r#"{"markdown": "x", "extract": {"k": 1}}"#).unwrap();
        assert_eq!(doc.markdown.as_deref(), Some("x"));
    }
}
