use serde::{Deserialize, Serialize};

use super::defaults;
use crate::pattern::MatchStats;

/// Pattern lifecycle thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// A proposed pattern needs at least this many matches to commit.
    pub commit_min_matches: u64,
    /// ...and at least this accuracy.
    pub commit_min_accuracy: f64,
    /// A proposed pattern with at least this many matches can be rejected.
    pub reject_min_matches: u64,
    /// ...when its accuracy is at or below this.
    pub reject_max_accuracy: f64,
    /// Jaccard overlap at or above this makes two committed patterns duplicates.
    pub duplicate_overlap: f64,
}

impl LifecycleConfig {
    /// The commit gate. Single source of truth: live resolution and
    /// migrated-status inference both go through here.
    pub fn qualifies_for_commit(&self, stats: MatchStats) -> bool {
        stats.match_count() >= self.commit_min_matches
            && stats.accuracy() >= self.commit_min_accuracy
    }

    /// The reject gate.
    pub fn qualifies_for_reject(&self, stats: MatchStats) -> bool {
        stats.match_count() >= self.reject_min_matches
            && stats.accuracy() <= self.reject_max_accuracy
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            commit_min_matches: defaults::DEFAULT_COMMIT_MIN_MATCHES,
            commit_min_accuracy: defaults::DEFAULT_COMMIT_MIN_ACCURACY,
            reject_min_matches: defaults::DEFAULT_REJECT_MIN_MATCHES,
            reject_max_accuracy: defaults::DEFAULT_REJECT_MAX_ACCURACY,
            duplicate_overlap: defaults::DEFAULT_DUPLICATE_OVERLAP,
        }
    }
}
