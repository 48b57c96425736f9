use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestrator batch and concurrency limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Items requested from the repository per iteration.
    pub batch_size: usize,
    /// Concurrent in-flight judge calls within one iteration.
    pub max_concurrent_judgments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::DEFAULT_BATCH_SIZE,
            max_concurrent_judgments: defaults::DEFAULT_MAX_CONCURRENT_JUDGMENTS,
        }
    }
}
