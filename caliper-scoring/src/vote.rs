//! Vote formula: how one matching committed pattern pulls the gestalt.
//!
//! ```text
//! good vote = max(4.0, 3.0 + 2.0 × accuracy)    in [4.0, 5.0]
//! bad vote  = min(2.0, 3.0 − 2.0 × accuracy)    in [1.0, 2.0]
//! weight    = accuracy
//! gestalt   = (1.0 × 3.0 + Σ weightᵢ × voteᵢ) / (1.0 + Σ weightᵢ)
//! ```
//!
//! The baseline always participates with weight 1.0, so a single
//! low-accuracy vote nudges the score rather than owning it. A pattern
//! with no evidence yet votes with weight 0.0: recorded in the reasons,
//! invisible in the number.

use caliper_core::{Gestalt, Polarity};

/// The gestalt value a matching pattern votes for. Good votes start at
/// the good edge and rise with accuracy; bad votes mirror them downward.
pub fn vote_value(polarity: Polarity, accuracy: f64) -> f64 {
    match polarity {
        Polarity::Good => (Gestalt::BASELINE + 2.0 * accuracy).max(Gestalt::GOOD),
        Polarity::Bad => (Gestalt::BASELINE - 2.0 * accuracy).min(Gestalt::BAD),
    }
}

/// Weighted mean of the neutral baseline and every `(vote, weight)` pair.
pub fn aggregate(votes: &[(f64, f64)]) -> Gestalt {
    let mut weighted_sum = Gestalt::BASELINE;
    let mut weight_sum = 1.0;
    for &(vote, weight) in votes {
        weighted_sum += vote * weight;
        weight_sum += weight;
    }
    Gestalt::new(weighted_sum / weight_sum)
}
