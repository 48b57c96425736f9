use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::gestalt::Gestalt;
use crate::pattern::Polarity;

/// One entry in a cheap score's explanation, in library scan order.
/// The full reasons list reconstructs the score exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreReason {
    /// A committed pattern matched and cast a vote.
    PatternVote {
        pattern_id: String,
        polarity: Polarity,
        /// Fraction of the pattern's keywords the item covered.
        coverage: f64,
        /// The gestalt value the pattern voted for.
        vote: f64,
        /// Vote weight = the pattern's accuracy; 0.0 means recorded but ignored.
        weight: f64,
    },
    /// Nothing in the library spoke to this item; baseline applies.
    NoPatternMatched,
}

/// Local, explainable approximation of the gestalt score.
/// Produced fresh per evaluation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheapScore {
    pub gestalt: Gestalt,
    pub reasons: Vec<ScoreReason>,
    pub matched_pattern_ids: BTreeSet<String>,
}

impl CheapScore {
    /// The baseline result for an item no pattern matched.
    pub fn baseline() -> Self {
        Self {
            gestalt: Gestalt::baseline(),
            reasons: vec![ScoreReason::NoPatternMatched],
            matched_pattern_ids: BTreeSet::new(),
        }
    }

    pub fn matched_any(&self) -> bool {
        !self.matched_pattern_ids.is_empty()
    }
}
