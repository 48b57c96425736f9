//! Multi-iteration lifecycle flows: a pattern's whole life from first
//! disagreement to committed rule, and the guarantees that dead patterns
//! stay dead and that dedup resolves pairs in one deterministic order.

use std::collections::BTreeSet;

use caliper_core::config::CaliperConfig;
use caliper_core::models::{CheapScore, DualScore, JudgeScore};
use caliper_core::pattern::{MatchStats, Pattern, PatternLibrary, PatternStatus, Polarity};
use caliper_core::{Gestalt, Item};
use caliper_lifecycle::{ItemOutcome, LifecycleManager};
use chrono::TimeZone;

fn keywords(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn outcome(id: &str, text: &str, cheap: f64, expensive: f64) -> ItemOutcome {
    let item = Item::new(id, "Report", text);
    let mut cheap_score = CheapScore::baseline();
    cheap_score.gestalt = Gestalt::new(cheap);
    let dual = DualScore::new(id, cheap_score, JudgeScore::new(expensive, "scripted"));
    ItemOutcome::new(item, dual)
}

fn committed_pattern(
    id: &str,
    words: &[&str],
    counts: (u64, u64),
    created_day: u32,
) -> Pattern {
    let mut p = Pattern::new(keywords(words), Polarity::Bad);
    p.id = id.to_string();
    p.status = PatternStatus::Committed;
    p.stats = MatchStats::from_counts(counts.0, counts.1).unwrap();
    p.created_at = chrono::Utc
        .with_ymd_and_hms(2024, 11, created_day, 9, 0, 0)
        .unwrap();
    p
}

#[test]
fn disagreement_becomes_a_committed_pattern_over_iterations() {
    let manager = LifecycleManager::new(&CaliperConfig::default());
    let mut library = PatternLibrary::empty();

    // Iteration 1: the cheap side is blind to this failure mode, the
    // judge is not. One proposal enters the library.
    let result = manager.apply(
        &library,
        &[outcome("it-0", "checkout timeout failure", 3.0, 1.5)],
    );
    assert_eq!(result.proposed.len(), 1);
    let pattern_id = result.proposed[0].clone();
    library = result.library;

    // Iterations 2..=6: the same failure keeps arriving and the judge
    // keeps agreeing with the pattern's polarity. Evidence accrues
    // before resolution, so the commit lands exactly when the volume
    // gate is reached.
    for i in 1..=5 {
        let result = manager.apply(
            &library,
            &[outcome(
                &format!("it-{i}"),
                "checkout timeout failure",
                3.0,
                1.5,
            )],
        );
        // The recurring disagreement proposes nothing new: the keyword
        // set is already owned by the admitted pattern.
        assert!(result.proposed.is_empty());

        if i < 5 {
            assert!(result.committed.is_empty());
        } else {
            assert_eq!(result.committed, vec![pattern_id.clone()]);
        }
        library = result.library;
    }

    let pattern = library.get(&pattern_id).unwrap();
    assert_eq!(pattern.status, PatternStatus::Committed);
    assert_eq!(pattern.stats.match_count(), 5);
    assert_eq!(pattern.stats.correct_count(), 5);
    assert_eq!(library.version, 6);
}

#[test]
fn rejected_keywords_never_return() {
    let manager = LifecycleManager::new(&CaliperConfig::default());

    let mut dead = Pattern::new(keywords(&["refund", "missing", "money"]), Polarity::Bad);
    dead.id = "pat-dead".to_string();
    dead.status = PatternStatus::Rejected;
    dead.stats = MatchStats::from_counts(5, 1).unwrap();

    let mut library = PatternLibrary::empty();
    library.insert(dead);

    // The same disagreement keeps arriving; the dead pattern's keyword
    // set keeps it out of the library, iteration after iteration.
    for i in 0..3 {
        let result = manager.apply(
            &library,
            &[outcome(&format!("it-{i}"), "refund missing money", 3.0, 1.5)],
        );
        assert!(result.proposed.is_empty());
        assert_eq!(result.library.len(), 1);

        let pattern = result.library.get("pat-dead").unwrap();
        assert_eq!(pattern.status, PatternStatus::Rejected);
        assert_eq!(pattern.stats.match_count(), 5);
        library = result.library;
    }
}

#[test]
fn dedup_resolves_pairs_in_scan_order() {
    // a ~ b and b ~ c are duplicate pairs; a ~ c is not. The (a, b) pair
    // is judged first, b loses, and the (b, c) pair is then moot — c
    // survives even though it would have lost to b.
    let a = committed_pattern("pat-a", &["login", "auth", "password", "reset"], (10, 9), 1);
    let b = committed_pattern(
        "pat-b",
        &["login", "auth", "password", "reset", "loop"],
        (10, 8),
        2,
    );
    let c = committed_pattern(
        "pat-c",
        &["login", "auth", "password", "reset", "loop", "session"],
        (10, 1),
        3,
    );

    let mut library = PatternLibrary::empty();
    library.insert(a);
    library.insert(b);
    library.insert(c);

    let manager = LifecycleManager::new(&CaliperConfig::default());
    let result = manager.apply(&library, &[]);

    assert_eq!(result.retired, vec!["pat-b"]);
    assert_eq!(
        result.library.get("pat-a").unwrap().status,
        PatternStatus::Committed
    );
    assert_eq!(
        result.library.get("pat-c").unwrap().status,
        PatternStatus::Committed
    );
}

#[test]
fn full_pass_reports_every_transition_kind_at_once() {
    let manager = LifecycleManager::new(&CaliperConfig::default());
    let mut library = PatternLibrary::empty();

    // Will commit: enough volume, high accuracy.
    let mut commit_me = Pattern::new(keywords(&["sync", "conflict"]), Polarity::Bad);
    commit_me.id = "pat-commit".to_string();
    commit_me.stats = MatchStats::from_counts(10, 8).unwrap();
    library.insert(commit_me);

    // Will reject: enough volume, poor accuracy.
    let mut reject_me = Pattern::new(keywords(&["billing", "question"]), Polarity::Bad);
    reject_me.id = "pat-reject".to_string();
    reject_me.stats = MatchStats::from_counts(5, 1).unwrap();
    library.insert(reject_me);

    // Duplicate committed pair: the weaker retires.
    library.insert(committed_pattern(
        "pat-keep",
        &["upload", "stuck", "progress"],
        (12, 11),
        1,
    ));
    library.insert(committed_pattern(
        "pat-drop",
        &["upload", "stuck", "progress", "spinner"],
        (12, 6),
        2,
    ));

    // And one disagreement that seeds a brand-new proposal.
    let outcomes = vec![outcome("it-9", "export attachment corrupted", 3.0, 1.2)];

    let result = manager.apply(&library, &outcomes);

    assert_eq!(result.committed, vec!["pat-commit"]);
    assert_eq!(result.rejected, vec!["pat-reject"]);
    assert_eq!(result.retired, vec!["pat-drop"]);
    assert_eq!(result.proposed.len(), 1);

    let summary = result.library.summary();
    assert_eq!(summary.total_patterns, 5);
    assert_eq!(summary.committed, 2);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.retired, 1);
    assert_eq!(summary.proposed, 1);
}
