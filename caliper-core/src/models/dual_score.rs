use serde::{Deserialize, Serialize};

use super::cheap_score::CheapScore;
use super::judge_score::JudgeScore;

/// Both verdicts for one item, plus the calibration gap between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualScore {
    pub item_id: String,
    pub cheap: CheapScore,
    pub expensive: JudgeScore,
    /// expensive − cheap. Signed; the absolute value is this item's
    /// calibration error.
    pub gap: f64,
}

impl DualScore {
    pub fn new(item_id: impl Into<String>, cheap: CheapScore, expensive: JudgeScore) -> Self {
        let gap = expensive.gestalt.gap_from(cheap.gestalt);
        Self {
            item_id: item_id.into(),
            cheap,
            expensive,
            gap,
        }
    }

    pub fn abs_gap(&self) -> f64 {
        self.gap.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestalt::Gestalt;

    #[test]
    fn gap_is_expensive_minus_cheap() {
        let mut cheap = CheapScore::baseline();
        cheap.gestalt = Gestalt::new(2.0);
        let dual = DualScore::new("item-1", cheap, JudgeScore::new(4.5, "solid fix"));
        assert!((dual.gap - 2.5).abs() < f64::EPSILON);
        assert!((dual.abs_gap() - 2.5).abs() < f64::EPSILON);
    }
}
