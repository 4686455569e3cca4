//! Crawl job status enumeration.

use std::fmt;

use serde::{Serialize, Serializer};

/// Status of a crawl job as reported by the service.
///
/// `queued`, `waiting`, `pending`, `active`, `paused` and `scraping` mean the
/// job is still running; `completed` is terminal success; any other value is
/// a terminal failure kept verbatim in [`JobStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Queued,
    Waiting,
    Pending,
    Active,
    Paused,
    Scraping,
    Completed,
    Other(String),
}

impl JobStatus {
    /// Parses a raw status; `None` for an empty string.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let status = match raw {
            "" => return None,
            "queued" => Self::Queued,
            "waiting" => Self::Waiting,
            "pending" => Self::Pending,
            "active" => Self::Active,
            "paused" => Self::Paused,
            "scraping" => Self::Scraping,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        };
        Some(status)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Waiting => "waiting",
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Scraping => "scraping",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }

    /// True for the statuses that mean "keep waiting".
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Queued
                | Self::Waiting
                | Self::Pending
                | Self::Active
                | Self::Paused
                | Self::Scraping
        )
    }

    /// True for every status outside the known set.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const IN_PROGRESS: [&str; 6] = ["queued", "waiting", "pending", "active", "paused", "scraping"];

    #[test]
    fn test_in_progress_set() {
        for raw in IN_PROGRESS {
            let status = JobStatus::parse(raw).unwrap();
            assert!(status.is_in_progress(), "{raw} should be in progress");
            assert!(!status.is_failure());
            assert_eq!(status.as_str(), raw);
        }
    }

    #[test]
    fn test_completed_is_neither_progress_nor_failure() {
        let status = JobStatus::parse("completed").unwrap();
        assert_eq!(status, JobStatus::Completed);
        assert!(!status.is_in_progress());
        assert!(!status.is_failure());
    }

    #[test]
    fn test_unknown_values_are_failures() {
        for raw in ["failed", "cancelled", "COMPLETED", "Active", "stopped"] {
            let status = JobStatus::parse(raw).unwrap();
            assert!(status.is_failure(), "{raw} should be a failure");
            assert_eq!(status.to_string(), raw);
        }
    }

    #[test]
    fn test_empty_is_none() {
        assert!(JobStatus::parse("").is_none());
    }

    #[test]
    fn test_serializes_as_raw_string() {
        let json = serde_json::to_string(&JobStatus::Other("failed".to_string())).unwrap();
        assert_eq!(json, r#""failed""#);
    }
}
