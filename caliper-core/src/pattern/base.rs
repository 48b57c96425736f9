use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::stats::MatchStats;
use crate::gestalt::ScoreBucket;

/// Which way a pattern's evidence points: items it matches tend to score
/// high (good) or low (bad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Good,
    Bad,
}

impl Polarity {
    /// The polarity implied by a score bucket; neutral implies none.
    pub fn from_bucket(bucket: ScoreBucket) -> Option<Self> {
        match bucket {
            ScoreBucket::Good => Some(Polarity::Good),
            ScoreBucket::Bad => Some(Polarity::Bad),
            ScoreBucket::Neutral => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Good => write!(f, "good"),
            Polarity::Bad => write!(f, "bad"),
        }
    }
}

/// Lifecycle state of a pattern. Rejected and retired are terminal;
/// a dead pattern is never resurrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternStatus {
    Proposed,
    Committed,
    Rejected,
    Retired,
}

impl PatternStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PatternStatus::Rejected | PatternStatus::Retired)
    }

    /// Check whether a transition between states is allowed.
    pub fn can_transition_to(self, next: PatternStatus) -> bool {
        matches!(
            (self, next),
            (PatternStatus::Proposed, PatternStatus::Committed)
                | (PatternStatus::Proposed, PatternStatus::Rejected)
                | (PatternStatus::Committed, PatternStatus::Retired)
        )
    }
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternStatus::Proposed => write!(f, "proposed"),
            PatternStatus::Committed => write!(f, "committed"),
            PatternStatus::Rejected => write!(f, "rejected"),
            PatternStatus::Retired => write!(f, "retired"),
        }
    }
}

/// A learned keyword rule with accumulated accuracy evidence.
///
/// Identity is the `id`; the keyword set is immutable after creation —
/// migration and dedup produce new patterns rather than editing keywords
/// in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// UUID v4 identifier.
    pub id: String,
    /// Normalized tokens; an item matches when it covers enough of them.
    pub keywords: BTreeSet<String>,
    pub polarity: Polarity,
    #[serde(flatten)]
    pub stats: MatchStats,
    pub status: PatternStatus,
    pub created_at: DateTime<Utc>,
    /// Items whose evidence seeded this pattern.
    pub source_item_ids: BTreeSet<String>,
}

impl Pattern {
    /// A fresh proposed pattern with no evidence.
    pub fn new(keywords: BTreeSet<String>, polarity: Polarity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            keywords,
            polarity,
            stats: MatchStats::new(),
            status: PatternStatus::Proposed,
            created_at: Utc::now(),
            source_item_ids: BTreeSet::new(),
        }
    }

    /// Admit a proposal as a proposed pattern.
    pub fn from_proposal(proposal: PatternProposal) -> Self {
        Self {
            source_item_ids: proposal.supporting_item_ids,
            ..Self::new(proposal.keywords, proposal.polarity)
        }
    }

    pub fn accuracy(&self) -> f64 {
        self.stats.accuracy()
    }

    pub fn is_committed(&self) -> bool {
        self.status == PatternStatus::Committed
    }

    /// Fraction of this pattern's keywords present in the item's keywords.
    /// 0.0 for an empty keyword set (such a pattern can never match).
    pub fn coverage(&self, item_keywords: &BTreeSet<String>) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }
        let overlap = self.keywords.intersection(item_keywords).count();
        overlap as f64 / self.keywords.len() as f64
    }

    /// Content fingerprint over polarity + sorted keywords, for exact
    /// duplicate checks at proposal admission.
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.keywords, self.polarity)
    }

    /// Apply a transition if the state machine allows it.
    pub fn transition_to(&mut self, next: PatternStatus) -> bool {
        if self.status.can_transition_to(next) {
            self.status = next;
            true
        } else {
            false
        }
    }
}

/// Content fingerprint for a keyword set + polarity.
pub(crate) fn fingerprint(keywords: &BTreeSet<String>, polarity: Polarity) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(polarity.to_string().as_bytes());
    for keyword in keywords {
        hasher.update(b"\n");
        hasher.update(keyword.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// A candidate pattern not yet admitted to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternProposal {
    pub keywords: BTreeSet<String>,
    pub polarity: Polarity,
    pub supporting_item_ids: BTreeSet<String>,
}

impl PatternProposal {
    pub fn new(
        keywords: BTreeSet<String>,
        polarity: Polarity,
        supporting_item_ids: BTreeSet<String>,
    ) -> Self {
        Self {
            keywords,
            polarity,
            supporting_item_ids,
        }
    }

    pub fn fingerprint(&self) -> String {
        fingerprint(&self.keywords, self.polarity)
    }
}
