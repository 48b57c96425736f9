use serde::{Deserialize, Serialize};

/// Accumulated match evidence for one pattern.
///
/// Fields are private and the only mutator is [`MatchStats::record`], so
/// `correct_count <= match_count` holds by construction. Serde goes through
/// a validated snapshot so a hand-edited or corrupt library file cannot
/// smuggle in impossible counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "StatsSnapshot", into = "StatsSnapshot")]
pub struct MatchStats {
    match_count: u64,
    correct_count: u64,
}

impl MatchStats {
    /// Fresh stats with no evidence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from historical counts. `None` when `correct > matched`.
    pub fn from_counts(match_count: u64, correct_count: u64) -> Option<Self> {
        if correct_count > match_count {
            None
        } else {
            Some(Self {
                match_count,
                correct_count,
            })
        }
    }

    /// Record one matched item and whether the pattern called it correctly.
    pub fn record(&mut self, correct: bool) {
        self.match_count += 1;
        if correct {
            self.correct_count += 1;
        }
    }

    pub fn match_count(self) -> u64 {
        self.match_count
    }

    pub fn correct_count(self) -> u64 {
        self.correct_count
    }

    /// Fraction of matches the pattern called correctly; 0.0 with no evidence.
    pub fn accuracy(self) -> f64 {
        if self.match_count == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.match_count as f64
        }
    }

    /// True when the pattern has never matched anything.
    pub fn is_empty(self) -> bool {
        self.match_count == 0
    }
}

/// Serde-facing form of [`MatchStats`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub match_count: u64,
    pub correct_count: u64,
}

impl From<MatchStats> for StatsSnapshot {
    fn from(stats: MatchStats) -> Self {
        Self {
            match_count: stats.match_count,
            correct_count: stats.correct_count,
        }
    }
}

impl TryFrom<StatsSnapshot> for MatchStats {
    type Error = String;

    fn try_from(snapshot: StatsSnapshot) -> Result<Self, Self::Error> {
        MatchStats::from_counts(snapshot.match_count, snapshot.correct_count).ok_or_else(|| {
            format!(
                "correct_count {} exceeds match_count {}",
                snapshot.correct_count, snapshot.match_count
            )
        })
    }
}
