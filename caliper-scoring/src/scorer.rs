use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::debug;

use caliper_core::config::{CaliperConfig, ScoringConfig};
use caliper_core::models::{CheapScore, ScoreReason};
use caliper_core::pattern::PatternLibrary;
use caliper_core::Item;
use caliper_keywords::KeywordExtractor;

use crate::vote;

/// Scores items against the committed patterns of a library.
///
/// Deterministic: patterns are scanned in (created_at, id) order, so the
/// reasons list and the resulting gestalt are identical for identical
/// inputs. Proposed, rejected, and retired patterns never vote.
pub struct CheapScorer {
    extractor: KeywordExtractor,
    config: ScoringConfig,
}

impl CheapScorer {
    pub fn new(config: &CaliperConfig) -> Self {
        Self {
            extractor: KeywordExtractor::new(&config.keywords),
            config: config.scoring.clone(),
        }
    }

    /// Score one item. An item nothing speaks to gets the baseline with a
    /// `NoPatternMatched` reason, never an empty result.
    pub fn score(&self, item: &Item, library: &PatternLibrary) -> CheapScore {
        let item_keywords = self.extractor.extract(&item.full_text());

        let mut reasons = Vec::new();
        let mut matched_pattern_ids = BTreeSet::new();
        let mut votes = Vec::new();

        for pattern in library.committed_scan() {
            let coverage = pattern.coverage(&item_keywords);
            if coverage < self.config.match_coverage {
                continue;
            }
            let accuracy = pattern.accuracy();
            let vote = vote::vote_value(pattern.polarity, accuracy);
            reasons.push(ScoreReason::PatternVote {
                pattern_id: pattern.id.clone(),
                polarity: pattern.polarity,
                coverage,
                vote,
                // Zero for a pattern with no evidence yet: the vote is
                // visible in the reasons but absent from the mean.
                weight: accuracy,
            });
            matched_pattern_ids.insert(pattern.id.clone());
            votes.push((vote, accuracy));
        }

        if matched_pattern_ids.is_empty() {
            return CheapScore::baseline();
        }

        let gestalt = vote::aggregate(&votes);
        debug!(
            item_id = %item.id,
            matched = matched_pattern_ids.len(),
            gestalt = %gestalt,
            "cheap score"
        );
        CheapScore {
            gestalt,
            reasons,
            matched_pattern_ids,
        }
    }

    /// Score a batch in parallel. Output order follows input order.
    pub fn score_batch(&self, items: &[Item], library: &PatternLibrary) -> Vec<CheapScore> {
        items
            .par_iter()
            .map(|item| self.score(item, library))
            .collect()
    }
}
