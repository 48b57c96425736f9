use serde::{Deserialize, Serialize};

/// An item dropped from one iteration after its judge call kept failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    pub item_id: String,
    pub error: String,
}

/// Outcome record for one calibration iteration. Appended to the history,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationMetrics {
    /// 1-based iteration counter.
    pub iteration_number: usize,
    /// Items pulled from the repository this iteration.
    pub batch_size: usize,
    /// Items that produced a dual score.
    pub evaluated: usize,
    /// Items skipped after judge retries were exhausted.
    pub skipped: usize,
    pub mean_abs_gap: f64,
    pub max_abs_gap: f64,
    pub committed_this_iteration: Vec<String>,
    pub rejected_this_iteration: Vec<String>,
    pub retired_this_iteration: Vec<String>,
    pub proposed_this_iteration: Vec<String>,
    pub converged: bool,
    pub diverged: bool,
}
