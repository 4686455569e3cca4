//! Suspension points used for retry backoff and poll intervals.
//!
//! Waiting goes through the [`Sleeper`] trait so the async runtime's timer is
//! used in production (the task yields instead of blocking its thread) and
//! tests can observe the requested delays without waiting for them.

#[cfg(test)]
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

/// Something that can suspend the current task for a duration.
#[async_trait]
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records every requested delay and returns immediately.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSleeper {
    calls: Arc<Mutex<Vec<Duration>>>,
}

#[cfg(test)]
impl RecordingSleeper {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// All delays requested so far, in order.
    pub(crate) fn calls(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Sum of all requested delays.
    pub(crate) fn total(&self) -> Duration {
        self.calls().iter().sum()
    }
}

#[cfg(test)]
#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut guard) = self.calls.lock() {
            guard.push(duration);
        }
    }
}
