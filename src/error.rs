//! Error types for every client operation.
//!
//! All failures surface through [`FirecrawlError`]. The variants follow the
//! life of a call: configuration problems are caught before any request is
//! made, transport failures abort immediately, non-200 responses are turned
//! into action-specific [`FirecrawlError::Api`] messages by the classifier,
//! and malformed payloads or failed crawl jobs get their own variants.

use thiserror::Error;

/// Errors that can occur while talking to the Firecrawl API.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// No API key was passed and none was found in the environment.
    #[error("no API key provided")]
    MissingApiKey,

    /// The API key contains characters that cannot be sent in a header.
    #[error("API key is not a valid header value")]
    InvalidApiKey,

    /// The configured base URL could not be parsed.
    #[error("invalid API base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Connection-level failure (DNS, refused connection, TLS, timeout).
    #[error("network error during {action}: {source}")]
    Transport {
        /// Action being performed when the request failed.
        action: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-200 response, classified into a human-actionable message.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Action being performed, e.g. "scrape URL".
        action: String,
        /// Fully formatted message (status framing plus service error text).
        message: String,
    },

    /// The body of an error response was not valid JSON.
    #[error("failed to parse error response: {source}")]
    ErrorResponseParse {
        /// HTTP status code of the unparsable response.
        status: u16,
        /// The JSON decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request for {action}: {source}")]
    Encode {
        /// Action whose request failed to encode.
        action: String,
        /// The JSON encode error.
        #[source]
        source: serde_json::Error,
    },

    /// A 200 response body could not be decoded into the expected shape.
    #[error("failed to decode response for {action}: {source}")]
    Decode {
        /// Action whose response failed to decode.
        action: String,
        /// The JSON decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The submit response was 200 but carried no job identifier.
    #[error("failed to get job ID")]
    MissingJobId,

    /// A status response had an empty or missing status field.
    #[error("invalid status in response")]
    InvalidStatus,

    /// The crawl job reached a terminal status other than `completed`.
    #[error("crawl job failed or was stopped. Status: {status}")]
    JobFailed {
        /// The raw status string reported by the service.
        status: String,
    },

    /// The job reported `completed` but never attached any data.
    #[error("crawl job completed but no data was returned")]
    NoData,

    /// The scrape payload reported `success: false`.
    #[error("failed to scrape URL")]
    ScrapeFailed,

    /// The map payload reported `success: false`.
    #[error("map operation failed: {message}")]
    MapFailed {
        /// Service-provided failure message.
        message: String,
    },

    /// A continuation location pointed back at a page already fetched.
    #[error("crawl results pagination revisited {location}")]
    PaginationCycle {
        /// The repeated continuation location.
        location: String,
    },

    /// The caller-supplied polling budget ran out before the job finished.
    #[error("crawl job {job_id} did not finish after waiting {waited_secs}s")]
    DeadlineExceeded {
        /// The job being polled.
        job_id: String,
        /// Seconds spent waiting between polls.
        waited_secs: u64,
    },
}

impl FirecrawlError {
    /// Creates a transport error from a reqwest error.
    pub fn transport(action: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            action: action.into(),
            source,
        }
    }

    /// Creates a decode error for a 200 response that failed to parse.
    pub fn decode(action: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            action: action.into(),
            source,
        }
    }

    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a job failure error carrying the observed status.
    pub fn job_failed(status: impl Into<String>) -> Self {
        Self::JobFailed {
            status: status.into(),
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::ErrorResponseParse { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if this error was raised before any request was sent.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey
                | Self::InvalidApiKey
                | Self::InvalidBaseUrl { .. }
                | Self::ClientBuild { .. }
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_message() {
        assert_eq!(FirecrawlError::MissingApiKey.to_string(), "no API key provided");
        assert!(FirecrawlError::MissingApiKey.is_configuration());
    }

    #[test]
    fn test_job_failed_carries_status() {
        let err = FirecrawlError::job_failed("cancelled");
        assert_eq!(
            err.to_string(),
            "crawl job failed or was stopped. Status: cancelled"
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_api_error_displays_message_verbatim() {
        let err = FirecrawlError::Api {
            status: 402,
            action: "scrape URL".to_string(),
            message: "Payment Required: Failed to scrape URL. quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Payment Required: Failed to scrape URL. quota exceeded"
        );
        assert_eq!(err.status(), Some(402));
    }

    #[test]
    fn test_error_response_parse_has_status() {
        let source = serde_json::from_slice::<serde_json::Value>(b"<html>").unwrap_err();
        let err = FirecrawlError::ErrorResponseParse {
            status: 503,
            source,
        };
        assert!(err.to_string().starts_with("failed to parse error response"));
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_map_failed_uses_service_message() {
        let err = FirecrawlError::MapFailed {
            message: "site unreachable".to_string(),
        };
        assert_eq!(err.to_string(), "map operation failed: site unreachable");
    }
}
