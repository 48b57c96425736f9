use caliper_core::Polarity;
use caliper_scoring::vote::{aggregate, vote_value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn votes_stay_inside_their_band(accuracy in 0.0f64..=1.0) {
        let good = vote_value(Polarity::Good, accuracy);
        prop_assert!((4.0..=5.0).contains(&good), "good vote {good} out of band");

        let bad = vote_value(Polarity::Bad, accuracy);
        prop_assert!((1.0..=2.0).contains(&bad), "bad vote {bad} out of band");
    }

    #[test]
    fn aggregate_never_leaves_the_scale(
        votes in prop::collection::vec((1.0f64..=5.0, 0.0f64..=1.0), 0..12),
    ) {
        let g = aggregate(&votes).value();
        prop_assert!((1.0..=5.0).contains(&g), "aggregate {g} out of scale");
    }

    #[test]
    fn each_vote_pulls_the_mean_toward_itself(
        votes in prop::collection::vec((1.0f64..=5.0, 0.0f64..=1.0), 0..8),
        vote in 1.0f64..=5.0,
        weight in 0.0f64..=1.0,
    ) {
        let before = aggregate(&votes).value();

        let mut extended = votes.clone();
        extended.push((vote, weight));
        let after = aggregate(&extended).value();

        let lo = before.min(vote) - 1e-9;
        let hi = before.max(vote) + 1e-9;
        prop_assert!(
            (lo..=hi).contains(&after),
            "adding ({vote}, {weight}) moved {before} to {after}, outside [{lo}, {hi}]"
        );
    }
}
