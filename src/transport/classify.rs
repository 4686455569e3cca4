//! Maps non-200 responses to action-specific errors.

use serde_json::Value;

use crate::error::FirecrawlError;

/// Message used when the error body has no usable `error` field.
pub const NO_DETAILS: &str = "No additional error details provided.";

/// Classifies a failed response into a [`FirecrawlError`].
///
/// The body is parsed as JSON and its `error` string (if any) is
/// interpolated into a template chosen by status code:
///
/// | Status | Framing |
/// |--------|---------|
/// | 402 | Payment Required |
/// | 408 | Request Timeout |
/// | 409 | Conflict (e.g. reused idempotency key) |
/// | 500 | Internal Server Error |
/// | other | Unexpected error, with the status code |
///
/// A body that is not JSON at all yields
/// [`FirecrawlError::ErrorResponseParse`].
#[must_use]
pub fn classify_error_response(status: u16, body: &[u8], action: &str) -> FirecrawlError {
    let parsed: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(source) => return FirecrawlError::ErrorResponseParse { status, source },
    };

    let detail = parsed
        .as_object()
        .and_then(|obj| obj.get("error"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(NO_DETAILS);

    let message = match status {
        402 => format!("Payment Required: Failed to {action}. {detail}"),
        408 => format!("Request Timeout: Failed to {action} as the request timed out. {detail}"),
        409 => format!("Conflict: Failed to {action} due to a conflict. {detail}"),
        500 => format!("Internal Server Error: Failed to {action}. {detail}"),
        _ => format!("Unexpected error during {action}: Status code {status}. {detail}"),
    };

    FirecrawlError::Api {
        status,
        action: action.to_string(),
        message,
    }
}
