//! Bounded retry around judge calls.
//!
//! The judge is remote, latency-bound, and failure-prone; every call the
//! engine makes goes through this policy. Backoff doubles per attempt up
//! to the configured cap. Non-retryable errors propagate immediately —
//! a client-side mistake does not get better by asking again.

use tracing::{debug, warn};

use caliper_core::config::RetryConfig;
use caliper_core::errors::JudgeError;
use caliper_core::models::JudgeScore;
use caliper_core::traits::IJudge;
use caliper_core::Item;

/// Fixed attempt budget with exponential backoff for one judge call.
///
/// Injected into the engine as a value; call sites never hand-roll
/// retry loops.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Evaluate one item, retrying transient judge failures.
    ///
    /// Returns the first successful score. When every attempt is spent
    /// the caller gets [`JudgeError::RetriesExhausted`]; the individual
    /// causes are in the log, not the error.
    pub async fn evaluate<J>(&self, judge: &J, item: &Item) -> Result<JudgeScore, JudgeError>
    where
        J: IJudge + ?Sized,
    {
        let mut backoff = self.config.initial_backoff();

        for attempt in 1..=self.config.max_attempts {
            if attempt > 1 {
                debug!(
                    item_id = %item.id,
                    attempt,
                    max_attempts = self.config.max_attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    "retrying judge call"
                );
                tokio::time::sleep(backoff).await;
                backoff = (backoff * 2).min(self.config.max_backoff());
            }

            match judge.evaluate(item).await {
                Ok(score) => return Ok(score),
                Err(error) if error.is_retryable() => {
                    warn!(item_id = %item.id, attempt, %error, "judge call failed");
                }
                Err(error) => return Err(error),
            }
        }

        Err(JudgeError::RetriesExhausted {
            item_id: item.id.clone(),
            attempts: self.config.max_attempts,
        })
    }
}
