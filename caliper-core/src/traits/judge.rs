use async_trait::async_trait;

use crate::errors::JudgeError;
use crate::item::Item;
use crate::models::JudgeScore;

/// The expensive, authoritative evaluator. A remote service: untrusted for
/// latency and availability, so callers own retries and concurrency limits.
#[async_trait]
pub trait IJudge: Send + Sync {
    /// Obtain the authoritative gestalt verdict for one item.
    async fn evaluate(&self, item: &Item) -> Result<JudgeScore, JudgeError>;
}
