use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults;

/// Bounded-retry policy for judge calls: fixed attempt budget with
/// exponential backoff, doubling per attempt up to the cap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per item, the first call included.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl RetryConfig {
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: defaults::DEFAULT_RETRY_MAX_ATTEMPTS,
            initial_backoff_ms: defaults::DEFAULT_RETRY_INITIAL_BACKOFF_MS,
            max_backoff_ms: defaults::DEFAULT_RETRY_MAX_BACKOFF_MS,
        }
    }
}
