//! Exact Jaccard overlap between keyword sets. Pattern sets stay small
//! (a library holds hundreds, not millions), so pairwise exact comparison
//! is the whole story.

use std::collections::BTreeSet;

/// J(A, B) = |A ∩ B| / |A ∪ B|. Returns 0.0 when both sets are empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}
