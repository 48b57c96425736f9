use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::base::{Pattern, PatternStatus};
use crate::constants::LIBRARY_SCHEMA_VERSION;

/// Where a migrated library came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationProvenance {
    pub source_schema: u32,
    pub migrated_at: DateTime<Utc>,
}

/// The versioned collection of learned patterns.
///
/// Exactly one library is active at a time. Every mutation produces a whole
/// new library value with `version + 1`; readers always observe either the
/// previous or the fully-updated library, never a mixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternLibrary {
    /// Persisted format version, not the revision counter.
    pub schema_version: u32,
    /// Monotonic revision, bumped on every lifecycle application.
    pub version: u64,
    pub patterns: BTreeMap<String, Pattern>,
    pub provenance: Option<MigrationProvenance>,
}

impl PatternLibrary {
    pub fn empty() -> Self {
        Self {
            schema_version: LIBRARY_SCHEMA_VERSION,
            version: 0,
            patterns: BTreeMap::new(),
            provenance: None,
        }
    }

    pub fn insert(&mut self, pattern: Pattern) {
        self.patterns.insert(pattern.id.clone(), pattern);
    }

    pub fn get(&self, id: &str) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Committed patterns in deterministic scan order: creation time, then id.
    /// Scoring reasons and dedup outcomes are reproducible because of this.
    pub fn committed_scan(&self) -> Vec<&Pattern> {
        let mut committed: Vec<&Pattern> = self
            .patterns
            .values()
            .filter(|p| p.status == PatternStatus::Committed)
            .collect();
        committed.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        committed
    }

    pub fn status_count(&self, status: PatternStatus) -> usize {
        self.patterns
            .values()
            .filter(|p| p.status == status)
            .count()
    }

    pub fn summary(&self) -> LibrarySummary {
        LibrarySummary::from_library(self)
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cheap per-status diagnostics for dashboards and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibrarySummary {
    pub version: u64,
    pub total_patterns: usize,
    pub proposed: usize,
    pub committed: usize,
    pub rejected: usize,
    pub retired: usize,
    /// Mean accuracy over committed patterns; 0.0 when none are committed.
    pub mean_committed_accuracy: f64,
}

impl LibrarySummary {
    pub fn from_library(library: &PatternLibrary) -> Self {
        let committed: Vec<&Pattern> = library
            .patterns
            .values()
            .filter(|p| p.status == PatternStatus::Committed)
            .collect();
        let mean_committed_accuracy = if committed.is_empty() {
            0.0
        } else {
            committed.iter().map(|p| p.accuracy()).sum::<f64>() / committed.len() as f64
        };

        Self {
            version: library.version,
            total_patterns: library.len(),
            proposed: library.status_count(PatternStatus::Proposed),
            committed: committed.len(),
            rejected: library.status_count(PatternStatus::Rejected),
            retired: library.status_count(PatternStatus::Retired),
            mean_committed_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::base::Polarity;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn pattern(id: &str, created_secs: i64, status: PatternStatus) -> Pattern {
        let mut p = Pattern::new(
            ["login", "auth"].iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            Polarity::Bad,
        );
        p.id = id.to_string();
        p.created_at = Utc.timestamp_opt(created_secs, 0).unwrap();
        p.status = status;
        p
    }

    #[test]
    fn committed_scan_orders_by_creation_then_id() {
        let mut library = PatternLibrary::empty();
        library.insert(pattern("b", 200, PatternStatus::Committed));
        library.insert(pattern("c", 100, PatternStatus::Committed));
        library.insert(pattern("a", 200, PatternStatus::Committed));
        library.insert(pattern("d", 50, PatternStatus::Proposed));

        let order: Vec<&str> = library.committed_scan().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn summary_counts_by_status() {
        let mut library = PatternLibrary::empty();
        library.version = 7;
        library.insert(pattern("a", 1, PatternStatus::Proposed));
        library.insert(pattern("b", 2, PatternStatus::Committed));
        library.insert(pattern("c", 3, PatternStatus::Rejected));
        library.insert(pattern("d", 4, PatternStatus::Retired));

        let summary = library.summary();
        assert_eq!(summary.version, 7);
        assert_eq!(summary.total_patterns, 4);
        assert_eq!(summary.proposed, 1);
        assert_eq!(summary.committed, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.retired, 1);
    }
}
