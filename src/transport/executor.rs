//! Single-request execution with bounded 502 retry.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::classify::classify_error_response;
use super::retry::RetryPolicy;
use super::sleeper::Sleeper;
use crate::config::ClientConfig;
use crate::error::FirecrawlError;

/// Header carrying the caller's idempotency key on job submission.
pub const IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";

const USER_AGENT: &str = concat!("firecrawl-client/", env!("CARGO_PKG_VERSION"));

/// One API call: where to send it, what to send, and how hard to try.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub body: Option<Vec<u8>>,
    pub idempotency_key: Option<&'a str>,
    /// Human-readable action, interpolated into classified errors.
    pub action: &'a str,
    pub retry: RetryPolicy,
}

impl<'a> ApiRequest<'a> {
    /// A body-less GET with the default single-attempt policy.
    #[must_use]
    pub fn get(url: &'a str, action: &'a str) -> Self {
        Self::new(Method::GET, url, action)
    }

    #[must_use]
    pub fn delete(url: &'a str, action: &'a str) -> Self {
        Self::new(Method::DELETE, url, action)
    }

    /// A POST carrying `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError::Encode`] if `body` cannot be serialized.
    pub fn post_json<B: Serialize>(
        url: &'a str,
        action: &'a str,
        body: &B,
    ) -> Result<Self, FirecrawlError> {
        let encoded = serde_json::to_vec(body).map_err(|source| FirecrawlError::Encode {
            action: action.to_string(),
            source,
        })?;
        Ok(Self {
            body: Some(encoded),
            ..Self::new(Method::POST, url, action)
        })
    }

    fn new(method: Method, url: &'a str, action: &'a str) -> Self {
        Self {
            method,
            url,
            body: None,
            idempotency_key: None,
            action,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_idempotency_key(mut self, key: Option<&'a str>) -> Self {
        self.idempotency_key = key.filter(|k| !k.is_empty());
        self
    }
}

/// Sends authenticated requests and applies the retry policy.
///
/// Holds only immutable state plus a pooled [`reqwest::Client`], so one
/// executor can serve many concurrent calls.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    headers: HeaderMap,
    sleeper: Arc<dyn Sleeper>,
}

impl RequestExecutor {
    /// Builds the HTTP client and the headers shared by every request.
    ///
    /// # Errors
    ///
    /// Returns [`FirecrawlError::ClientBuild`] if the HTTP client cannot be
    /// built, or [`FirecrawlError::InvalidApiKey`] if the key cannot be used
    /// as a header value.
    pub fn new(config: &ClientConfig, sleeper: Arc<dyn Sleeper>) -> Result<Self, FirecrawlError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|source| FirecrawlError::ClientBuild { source })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key()))
            .map_err(|_| FirecrawlError::InvalidApiKey)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client,
            headers,
            sleeper,
        })
    }

    /// Replaces the sleeper used for backoff.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Executes `request`, returning the body of a 200 response.
    ///
    /// A 502 response is retried after `backoff_base * 2^attempt_index`
    /// while the attempt budget lasts. Any other status stops the loop. A
    /// connection failure aborts at once without retry.
    ///
    /// # Errors
    ///
    /// - [`FirecrawlError::Transport`] on connection failure
    /// - [`FirecrawlError::Api`] / [`FirecrawlError::ErrorResponseParse`]
    ///   for the final non-200 response
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url, action = request.action))]
    pub async fn execute(&self, request: ApiRequest<'_>) -> Result<Vec<u8>, FirecrawlError> {
        let mut attempt_index = 0u32;
        loop {
            let response = self.send_once(&request).await?;
            let status = response.status().as_u16();
            debug!(attempt = attempt_index + 1, status, "response received");

            if request.retry.should_retry(status, attempt_index) {
                let delay = request.retry.backoff_for(attempt_index);
                warn!(
                    attempt = attempt_index + 1,
                    max_attempts = request.retry.max_attempts(),
                    delay_ms = delay.as_millis(),
                    "bad gateway, retrying"
                );
                self.sleeper.sleep(delay).await;
                attempt_index += 1;
                continue;
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| FirecrawlError::transport(request.action, e))?;

            if status != 200 {
                return Err(classify_error_response(status, &body, request.action));
            }
            return Ok(body.to_vec());
        }
    }

    async fn send_once(&self, request: &ApiRequest<'_>) -> Result<Response, FirecrawlError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url)
            .headers(self.headers.clone());

        if let Some(key) = request.idempotency_key {
            builder = builder.header(IDEMPOTENCY_KEY_HEADER, key);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        builder
            .send()
            .await
            .map_err(|e| FirecrawlError::transport(request.action, e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::transport::RecordingSleeper;

    #[test]
    fn test_post_json_encodes_body() {
        let request = ApiRequest::post_json(
            "http://localhost/v1/scrape",
            "scrape URL",
            &json!({"url": "https://example.com"}),
        )
        .unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"url":"https://example.com"}"#.as_slice())
        );
        assert_eq!(request.retry, RetryPolicy::default());
    }

    #[test]
    fn test_empty_idempotency_key_is_dropped() {
        let request =
            ApiRequest::get("http://localhost/v1/crawl/x", "check").with_idempotency_key(Some(""));
        assert!(request.idempotency_key.is_none());

        let request =
            ApiRequest::get("http://localhost/v1/crawl/x", "check").with_idempotency_key(Some("k1"));
        assert_eq!(request.idempotency_key, Some("k1"));
    }

    #[test]
    fn test_executor_rejects_unencodable_key() {
        let config = ClientConfig::resolve(Some("bad\nkey"), None, |_| None).unwrap();
        let result = RequestExecutor::new(&config, Arc::new(RecordingSleeper::new()));
        assert!(matches!(result, Err(FirecrawlError::InvalidApiKey)));
    }
}
