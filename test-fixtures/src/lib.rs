//! Shared JSON fixtures for the caliper workspace.
//!
//! The files under `data/` are the canonical datasets the crate tests
//! exercise: a batch of support interactions, a current (schema 2)
//! pattern library, and a legacy (schema 1) free-text rule file for the
//! migrator. Typed loaders cover the common cases; `load_fixture` is
//! the escape hatch for anything else.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

use caliper_core::{Item, PatternLibrary};

/// Absolute path of a fixture under this crate's `data/` directory.
///
/// Anchored on the crate's own manifest directory at compile time, so
/// tests in any workspace member resolve the same file no matter where
/// cargo was invoked.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}

/// Deserialize a fixture into any serde-compatible type.
///
/// A missing or malformed fixture is a bug in the test suite, not a
/// condition to recover from, so failures panic with the offending path.
pub fn load_fixture<T: DeserializeOwned>(name: &str) -> T {
    let path = fixture_path(name);
    let text = fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("cannot read fixture {}: {error}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|error| panic!("cannot parse fixture {}: {error}", path.display()))
}

/// The shared support-interaction batch (`items.json`).
pub fn support_items() -> Vec<Item> {
    load_fixture("items.json")
}

/// The current-schema pattern library snapshot (`library_v2.json`),
/// one pattern in every lifecycle status plus migration provenance.
pub fn pattern_library() -> PatternLibrary {
    load_fixture("library_v2.json")
}

/// Path of the legacy schema-1 rule file (`legacy_patterns_v1.json`);
/// the migrator takes the path, not parsed content.
pub fn legacy_rules_path() -> PathBuf {
    fixture_path("legacy_patterns_v1.json")
}

/// The legacy rule file as loose JSON, for shape assertions that must
/// not depend on the migrator's own parsing.
pub fn legacy_rules() -> serde_json::Value {
    load_fixture("legacy_patterns_v1.json")
}
