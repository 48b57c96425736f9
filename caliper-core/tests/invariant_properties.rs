use std::collections::BTreeSet;

use caliper_core::{Gestalt, MatchStats, Pattern, Polarity};
use proptest::prelude::*;

proptest! {
    #[test]
    fn correct_never_exceeds_matched(outcomes in prop::collection::vec(any::<bool>(), 0..200)) {
        let mut stats = MatchStats::new();
        for correct in outcomes {
            stats.record(correct);
            prop_assert!(stats.correct_count() <= stats.match_count());
            prop_assert!((0.0..=1.0).contains(&stats.accuracy()));
        }
    }

    #[test]
    fn from_counts_only_accepts_possible_histories(matched in 0u64..1000, correct in 0u64..1000) {
        let stats = MatchStats::from_counts(matched, correct);
        prop_assert_eq!(stats.is_some(), correct <= matched);
        if let Some(stats) = stats {
            prop_assert!(stats.correct_count() <= stats.match_count());
        }
    }

    #[test]
    fn gestalt_always_lands_in_score_range(value in -1e6f64..1e6) {
        let g = Gestalt::new(value);
        prop_assert!((Gestalt::MIN..=Gestalt::MAX).contains(&g.value()));
    }

    #[test]
    fn coverage_is_a_ratio(
        pattern_words in prop::collection::btree_set("[a-z]{3,8}", 1..8),
        item_words in prop::collection::btree_set("[a-z]{3,8}", 0..20),
    ) {
        let pattern = Pattern::new(
            pattern_words.iter().cloned().collect::<BTreeSet<_>>(),
            Polarity::Good,
        );
        let coverage = pattern.coverage(&item_words);
        prop_assert!((0.0..=1.0).contains(&coverage));
    }
}
