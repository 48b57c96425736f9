use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, info};

use caliper_core::config::{CaliperConfig, LifecycleConfig, ScoringConfig};
use caliper_core::models::DualScore;
use caliper_core::pattern::{
    Pattern, PatternLibrary, PatternProposal, PatternStatus, Polarity,
};
use caliper_core::Item;
use caliper_keywords::KeywordExtractor;

use crate::similarity::jaccard;

/// An item paired with its dual verdict for one iteration.
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub item: Item,
    pub dual: DualScore,
}

impl ItemOutcome {
    pub fn new(item: Item, dual: DualScore) -> Self {
        Self { item, dual }
    }
}

/// What one lifecycle pass did, plus the library it produced.
#[derive(Debug, Clone)]
pub struct LifecycleOutcome {
    /// The next library value; version = input version + 1. Not yet
    /// authoritative — persist it before adopting it.
    pub library: PatternLibrary,
    pub committed: Vec<String>,
    pub rejected: Vec<String>,
    pub retired: Vec<String>,
    pub proposed: Vec<String>,
}

/// Applies one iteration of evidence to the pattern library.
///
/// Phases run in a fixed order: statistics, commit/reject resolution,
/// duplicate retirement, proposal admission. A pattern committed in phase
/// two is already a dedup candidate in phase three.
pub struct LifecycleManager {
    extractor: KeywordExtractor,
    lifecycle: LifecycleConfig,
    scoring: ScoringConfig,
}

impl LifecycleManager {
    pub fn new(config: &CaliperConfig) -> Self {
        Self {
            extractor: KeywordExtractor::new(&config.keywords),
            lifecycle: config.lifecycle.clone(),
            scoring: config.scoring.clone(),
        }
    }

    /// Run one full lifecycle pass. Pure value-in/value-out: the input
    /// library is untouched.
    pub fn apply(&self, library: &PatternLibrary, outcomes: &[ItemOutcome]) -> LifecycleOutcome {
        let mut next = library.clone();
        next.version += 1;

        let item_keywords: Vec<BTreeSet<String>> = outcomes
            .iter()
            .map(|o| self.extractor.extract(&o.item.full_text()))
            .collect();

        self.update_statistics(&mut next, outcomes, &item_keywords);
        let (committed, rejected) = self.resolve_proposed(&mut next);
        let retired = self.retire_duplicates(&mut next);
        let proposed = self.admit_proposals(&mut next, outcomes, &item_keywords);

        info!(
            version = next.version,
            committed = committed.len(),
            rejected = rejected.len(),
            retired = retired.len(),
            proposed = proposed.len(),
            "lifecycle pass applied"
        );

        LifecycleOutcome {
            library: next,
            committed,
            rejected,
            retired,
            proposed,
        }
    }

    /// Re-match every live pattern against the batch with the same coverage
    /// rule the scorer uses, and record whether the pattern's polarity
    /// agreed with the expensive verdict. Terminal patterns accrue nothing.
    fn update_statistics(
        &self,
        library: &mut PatternLibrary,
        outcomes: &[ItemOutcome],
        item_keywords: &[BTreeSet<String>],
    ) {
        for pattern in library.patterns.values_mut() {
            if pattern.status.is_terminal() {
                continue;
            }
            for (outcome, keywords) in outcomes.iter().zip(item_keywords) {
                if pattern.coverage(keywords) < self.scoring.match_coverage {
                    continue;
                }
                let expensive = outcome.dual.expensive.gestalt.value();
                let correct = match pattern.polarity {
                    Polarity::Good => expensive >= self.scoring.good_score_threshold,
                    Polarity::Bad => expensive <= self.scoring.bad_score_threshold,
                };
                pattern.stats.record(correct);
            }
        }
    }

    /// Commit or reject proposed patterns that have accumulated enough
    /// evidence; everything in between stays proposed.
    fn resolve_proposed(&self, library: &mut PatternLibrary) -> (Vec<String>, Vec<String>) {
        let mut committed = Vec::new();
        let mut rejected = Vec::new();

        for pattern in library.patterns.values_mut() {
            if pattern.status != PatternStatus::Proposed {
                continue;
            }
            if self.lifecycle.qualifies_for_commit(pattern.stats) {
                if pattern.transition_to(PatternStatus::Committed) {
                    info!(
                        pattern_id = %pattern.id,
                        matches = pattern.stats.match_count(),
                        accuracy = pattern.accuracy(),
                        "pattern committed"
                    );
                    committed.push(pattern.id.clone());
                }
            } else if self.lifecycle.qualifies_for_reject(pattern.stats) {
                if pattern.transition_to(PatternStatus::Rejected) {
                    info!(
                        pattern_id = %pattern.id,
                        matches = pattern.stats.match_count(),
                        accuracy = pattern.accuracy(),
                        "pattern rejected"
                    );
                    rejected.push(pattern.id.clone());
                }
            }
        }
        (committed, rejected)
    }

    /// Pairwise Jaccard over committed patterns in scan order; the weaker
    /// of each duplicate pair is retired. The loser's statistics go with
    /// it — nothing is merged into the survivor.
    fn retire_duplicates(&self, library: &mut PatternLibrary) -> Vec<String> {
        let scan_ids: Vec<String> = library
            .committed_scan()
            .into_iter()
            .map(|p| p.id.clone())
            .collect();

        let mut retired = Vec::new();
        for i in 0..scan_ids.len() {
            for j in (i + 1)..scan_ids.len() {
                let (Some(a), Some(b)) = (library.get(&scan_ids[i]), library.get(&scan_ids[j]))
                else {
                    continue;
                };
                // Either may have lost an earlier pair already.
                if !a.is_committed() || !b.is_committed() {
                    continue;
                }
                let overlap = jaccard(&a.keywords, &b.keywords);
                if overlap < self.lifecycle.duplicate_overlap {
                    continue;
                }

                let loser_id = Self::duplicate_loser(a, b).id.clone();
                if let Some(loser) = library.patterns.get_mut(&loser_id) {
                    if loser.transition_to(PatternStatus::Retired) {
                        info!(pattern_id = %loser_id, overlap, "duplicate committed pattern retired");
                        retired.push(loser_id);
                    }
                }
            }
        }
        retired
    }

    /// Which of two duplicate committed patterns is retired: lower
    /// accuracy, then lower match count, then earlier creation, then id.
    fn duplicate_loser<'a>(a: &'a Pattern, b: &'a Pattern) -> &'a Pattern {
        let ordering = a
            .accuracy()
            .total_cmp(&b.accuracy())
            .then_with(|| a.stats.match_count().cmp(&b.stats.match_count()))
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id));
        if ordering == Ordering::Greater {
            b
        } else {
            a
        }
    }

    /// One proposal per item the two evaluators disagreed on, polarized by
    /// the expensive verdict. Admission is refused when the keyword set
    /// duplicates any known pattern — terminal ones included, so a dead
    /// pattern's keywords stay dead.
    fn admit_proposals(
        &self,
        library: &mut PatternLibrary,
        outcomes: &[ItemOutcome],
        item_keywords: &[BTreeSet<String>],
    ) -> Vec<String> {
        let mut admitted = Vec::new();

        for (outcome, keywords) in outcomes.iter().zip(item_keywords) {
            let cheap_bucket = outcome.dual.cheap.gestalt.bucket(
                self.scoring.good_score_threshold,
                self.scoring.bad_score_threshold,
            );
            let expensive_bucket = outcome.dual.expensive.gestalt.bucket(
                self.scoring.good_score_threshold,
                self.scoring.bad_score_threshold,
            );
            if cheap_bucket == expensive_bucket {
                continue;
            }
            // A neutral expensive verdict implies no polarity to learn.
            let Some(polarity) = Polarity::from_bucket(expensive_bucket) else {
                continue;
            };
            if keywords.is_empty() {
                continue;
            }

            let proposal = PatternProposal::new(
                keywords.clone(),
                polarity,
                BTreeSet::from([outcome.item.id.clone()]),
            );
            if let Some(reason) = self.admission_block(&proposal, library) {
                debug!(item_id = %outcome.item.id, %reason, "proposal blocked");
                continue;
            }

            let pattern = Pattern::from_proposal(proposal);
            let pattern_id = pattern.id.clone();
            info!(
                pattern_id = %pattern_id,
                item_id = %outcome.item.id,
                %polarity,
                "pattern proposed"
            );
            library.insert(pattern);
            admitted.push(pattern_id);
        }
        admitted
    }

    /// The reason a proposal may not enter the library, if one exists.
    fn admission_block(
        &self,
        proposal: &PatternProposal,
        library: &PatternLibrary,
    ) -> Option<String> {
        let fingerprint = proposal.fingerprint();
        for existing in library.patterns.values() {
            if existing.fingerprint() == fingerprint {
                return Some(format!(
                    "exact duplicate of {} ({})",
                    existing.id, existing.status
                ));
            }
            let overlap = jaccard(&proposal.keywords, &existing.keywords);
            if overlap >= self.lifecycle.duplicate_overlap {
                return Some(format!(
                    "near duplicate of {} (jaccard {overlap:.2})",
                    existing.id
                ));
            }
        }
        None
    }
}
