//! End-to-end migration over the shared legacy fixture: a schema-1 file
//! with a mix of healthy and malformed entries flows through the
//! migrator, survives a save/load cycle, and validates clean against
//! sample items.

use caliper_core::config::CaliperConfig;
use caliper_core::errors::{CaliperError, StoreError};
use caliper_core::pattern::{PatternStatus, Polarity};
use caliper_core::traits::ILibraryStore;
use caliper_keywords::KeywordExtractor;
use caliper_store::{JsonLibraryStore, LegacyPattern, Migrator};
use test_fixtures::{fixture_path, legacy_rules, legacy_rules_path, support_items};

fn migrator() -> Migrator {
    Migrator::new(KeywordExtractor::default(), &CaliperConfig::default())
}

#[test]
fn legacy_fixture_migrates_with_per_entry_warnings() {
    let (library, warnings) = migrator()
        .migrate_library(legacy_rules_path())
        .unwrap();

    // 7 legacy entries: 3 representable, 4 skipped for distinct reasons.
    assert_eq!(library.len(), 3);
    assert_eq!(warnings.len(), 4);

    assert_eq!(library.status_count(PatternStatus::Committed), 1);
    assert_eq!(library.status_count(PatternStatus::Proposed), 1);
    assert_eq!(library.status_count(PatternStatus::Rejected), 1);

    let provenance = library.provenance.as_ref().unwrap();
    assert_eq!(provenance.source_schema, 1);
}

#[test]
fn migration_warnings_name_the_entry_and_the_reason() {
    let (_, warnings) = migrator()
        .migrate_library(legacy_rules_path())
        .unwrap();

    let reasons: Vec<(usize, &str)> = warnings
        .iter()
        .map(|w| (w.index, w.reason.as_str()))
        .collect();

    // Stop-word-only rule yields no keywords.
    assert_eq!(warnings[0].index, 3);
    assert!(reasons[0].1.contains("no keywords"));
    // Unknown polarity string.
    assert_eq!(warnings[1].index, 4);
    assert!(reasons[1].1.contains("sideways"));
    // correct_count above match_count.
    assert_eq!(warnings[2].index, 5);
    assert!(reasons[2].1.contains("exceeds"));
    // Entry that is not even an object.
    assert_eq!(warnings[3].index, 6);
    assert_eq!(warnings[3].rule_excerpt, "<no rule field>");
}

#[test]
fn migrated_counts_match_the_legacy_fixture_verbatim() {
    let (library, _) = migrator()
        .migrate_library(legacy_rules_path())
        .unwrap();

    let committed = library
        .patterns
        .values()
        .find(|p| p.status == PatternStatus::Committed)
        .unwrap();
    assert_eq!(committed.stats.match_count(), 10);
    assert_eq!(committed.stats.correct_count(), 8);
    assert_eq!(committed.polarity, Polarity::Bad);

    let rejected = library
        .patterns
        .values()
        .find(|p| p.status == PatternStatus::Rejected)
        .unwrap();
    assert_eq!(rejected.stats.match_count(), 5);
    assert_eq!(rejected.stats.correct_count(), 1);
}

#[test]
fn migrated_library_round_trips_through_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let (library, _) = migrator()
        .migrate_library(legacy_rules_path())
        .unwrap();

    let store = JsonLibraryStore::new(dir.path().join("patterns.json"));
    store.save(&library).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.len(), library.len());
    assert_eq!(loaded.schema_version, 2);
    assert!(loaded.provenance.is_some());
}

#[test]
fn migration_validates_clean_against_the_sample_items() {
    let m = migrator();
    let (library, _) = m
        .migrate_library(legacy_rules_path())
        .unwrap();

    // The representable legacy entries, re-read as typed values.
    let raw = legacy_rules();
    let legacy: Vec<LegacyPattern> = raw["patterns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect();

    let items = support_items();
    let discrepancies = m.validate_migration(&legacy, &library, &items);

    // Keyword-equivalent rules and patterns predict identical polarities,
    // including the skipped entries: none of them match any sample item
    // strongly enough to flip a majority.
    assert!(
        discrepancies.is_empty(),
        "unexpected discrepancies: {discrepancies:?}"
    );
}

#[test]
fn current_schema_fixture_loads_directly() {
    let store = JsonLibraryStore::new(fixture_path("library_v2.json"));
    let library = store.load().unwrap();

    assert_eq!(library.version, 4);
    assert_eq!(library.committed_scan().len(), 2);
}

#[test]
fn legacy_fixture_is_refused_by_the_store() {
    let store = JsonLibraryStore::new(legacy_rules_path());
    let err = store.load().unwrap_err();
    assert!(matches!(
        err,
        CaliperError::Store(StoreError::LegacySchema { found: 1 })
    ));
}
