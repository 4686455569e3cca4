//! Client configuration: credentials, base address, API version and timeouts.
//!
//! Values resolve in the order explicit argument, environment variable,
//! built-in default. A missing API key is rejected here, before any client
//! or request exists.

use std::time::Duration;

use url::Url;

use crate::error::FirecrawlError;
pub use crate::schema::ApiVersion;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.firecrawl.dev";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FIRECRAWL_API_KEY";

/// Environment variable overriding the base URL.
pub const API_URL_ENV: &str = "FIRECRAWL_API_URL";

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default per-request timeout (60 seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Resolved configuration for a [`FirecrawlClient`](crate::FirecrawlClient).
///
/// Immutable once built; a client holding it may be shared across tasks.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    version: ApiVersion,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("version", &self.version)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Builds a configuration from explicit values, falling back to the
    /// environment for anything left empty.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError::MissingApiKey`] when neither `api_key` nor
    /// `FIRECRAWL_API_KEY` yields a non-empty key, and
    /// [`FirecrawlError::InvalidBaseUrl`] when the base URL does not parse.
    pub fn new(api_key: Option<&str>, api_url: Option<&str>) -> Result<Self, FirecrawlError> {
        Self::resolve(api_key, api_url, |name| std::env::var(name).ok())
    }

    /// Builds a configuration purely from `FIRECRAWL_API_KEY` / `FIRECRAWL_API_URL`.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::new`].
    pub fn from_env() -> Result<Self, FirecrawlError> {
        Self::new(None, None)
    }

    /// Resolution with an injectable environment lookup.
    pub(crate) fn resolve(
        api_key: Option<&str>,
        api_url: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, FirecrawlError> {
        let api_key = non_empty(api_key.map(str::to_string))
            .or_else(|| non_empty(env(API_KEY_ENV)))
            .ok_or(FirecrawlError::MissingApiKey)?;

        let raw_url = non_empty(api_url.map(str::to_string))
            .or_else(|| non_empty(env(API_URL_ENV)))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        Ok(Self {
            api_key,
            base_url,
            version: ApiVersion::default(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        })
    }

    /// Selects the API schema version.
    #[must_use]
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.version = version;
        self
    }

    /// Overrides the connect and per-request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }

    /// The bearer token sent on every request.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The base address, without a trailing slash in its path.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Builds `{base}/{version}/{segments...}`, percent-encoding each segment.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.push(self.version.as_str());
            for segment in segments {
                path.push(segment);
            }
        }
        url.to_string()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url, FirecrawlError> {
    let url = Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| FirecrawlError::invalid_base_url(raw, e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(FirecrawlError::invalid_base_url(raw, "cannot be a base URL"));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FirecrawlError::invalid_base_url(
            raw,
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(url)
}
