use serde::{Deserialize, Serialize};

use super::defaults;

/// Cheap-mode scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum coverage ratio for a pattern to match an item. One value
    /// shared by scoring and lifecycle bookkeeping so accuracy statistics
    /// stay consistent with what actually scored.
    pub match_coverage: f64,
    /// Gestalt at or above this is the good bucket.
    pub good_score_threshold: f64,
    /// Gestalt at or below this is the bad bucket.
    pub bad_score_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_coverage: defaults::DEFAULT_MATCH_COVERAGE,
            good_score_threshold: defaults::DEFAULT_GOOD_SCORE_THRESHOLD,
            bad_score_threshold: defaults::DEFAULT_BAD_SCORE_THRESHOLD,
        }
    }
}
