use serde::{Deserialize, Serialize};
use std::fmt;

/// Gestalt quality score clamped to [1.0, 5.0].
/// Produced by the expensive judge or approximated by the cheap scorer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Gestalt(f64);

impl Gestalt {
    /// Lowest representable score.
    pub const MIN: f64 = 1.0;
    /// Highest representable score.
    pub const MAX: f64 = 5.0;
    /// Neutral baseline — the score of an item no pattern can speak to.
    pub const BASELINE: f64 = 3.0;
    /// Default lower edge of the good bucket.
    pub const GOOD: f64 = 4.0;
    /// Default upper edge of the bad bucket.
    pub const BAD: f64 = 2.0;

    /// Create a new Gestalt, clamping to [1.0, 5.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Neutral baseline score.
    pub fn baseline() -> Self {
        Self(Self::BASELINE)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Bucket this score against explicit good/bad edges.
    pub fn bucket(self, good_threshold: f64, bad_threshold: f64) -> ScoreBucket {
        if self.0 >= good_threshold {
            ScoreBucket::Good
        } else if self.0 <= bad_threshold {
            ScoreBucket::Bad
        } else {
            ScoreBucket::Neutral
        }
    }

    /// Signed difference to another score (not clamped — this is a gap, not a score).
    pub fn gap_from(self, other: Gestalt) -> f64 {
        self.0 - other.0
    }
}

impl Default for Gestalt {
    fn default() -> Self {
        Self(Self::BASELINE)
    }
}

impl fmt::Display for Gestalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Gestalt {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Gestalt> for f64 {
    fn from(g: Gestalt) -> Self {
        g.0
    }
}

/// Coarse quality bucket a gestalt score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Good,
    Neutral,
    Bad,
}

impl fmt::Display for ScoreBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBucket::Good => write!(f, "good"),
            ScoreBucket::Neutral => write!(f, "neutral"),
            ScoreBucket::Bad => write!(f, "bad"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_score_range() {
        assert_eq!(Gestalt::new(0.0).value(), 1.0);
        assert_eq!(Gestalt::new(9.3).value(), 5.0);
        assert_eq!(Gestalt::new(3.7).value(), 3.7);
        assert!(Gestalt::new(f64::NEG_INFINITY).value() >= Gestalt::MIN);
    }

    #[test]
    fn buckets_against_default_edges() {
        assert_eq!(Gestalt::new(4.5).bucket(4.0, 2.0), ScoreBucket::Good);
        assert_eq!(Gestalt::new(4.0).bucket(4.0, 2.0), ScoreBucket::Good);
        assert_eq!(Gestalt::new(3.0).bucket(4.0, 2.0), ScoreBucket::Neutral);
        assert_eq!(Gestalt::new(2.0).bucket(4.0, 2.0), ScoreBucket::Bad);
        assert_eq!(Gestalt::new(1.2).bucket(4.0, 2.0), ScoreBucket::Bad);
    }

    #[test]
    fn gap_is_signed_and_unclamped() {
        let expensive = Gestalt::new(5.0);
        let cheap = Gestalt::new(1.0);
        assert_eq!(expensive.gap_from(cheap), 4.0);
        assert_eq!(cheap.gap_from(expensive), -4.0);
    }
}
