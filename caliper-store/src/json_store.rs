use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use caliper_core::constants::{LEGACY_SCHEMA_VERSION, LIBRARY_SCHEMA_VERSION};
use caliper_core::errors::{CaliperResult, StoreError};
use caliper_core::pattern::PatternLibrary;
use caliper_core::traits::ILibraryStore;

/// Just enough of the file to decide what schema it claims.
#[derive(Deserialize)]
struct SchemaProbe {
    schema_version: u32,
}

/// One JSON file holding the whole library.
///
/// Saves write a sibling temp file, fsync it, then rename it over the
/// target — a crash mid-write leaves either the previous file or the
/// fully-updated one, never a mixture.
#[derive(Debug, Clone)]
pub struct JsonLibraryStore {
    path: PathBuf,
}

impl JsonLibraryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "library.json".to_string());
        self.path.with_file_name(format!("{file_name}.tmp"))
    }
}

impl ILibraryStore for JsonLibraryStore {
    /// Load the current library. A missing file is an empty library, not an
    /// error; anything else unreadable or unparsable fails loudly.
    fn load(&self) -> CaliperResult<PatternLibrary> {
        if !self.path.exists() {
            return Ok(PatternLibrary::empty());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;

        let probe: SchemaProbe =
            serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                details: format!("no readable schema_version: {e}"),
            })?;
        if probe.schema_version == LEGACY_SCHEMA_VERSION {
            return Err(StoreError::LegacySchema {
                found: probe.schema_version,
            }
            .into());
        }
        if probe.schema_version > LIBRARY_SCHEMA_VERSION {
            return Err(StoreError::SchemaTooNew {
                found: probe.schema_version,
                supported: LIBRARY_SCHEMA_VERSION,
            }
            .into());
        }

        let library: PatternLibrary =
            serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
                details: e.to_string(),
            })?;
        debug!(
            version = library.version,
            patterns = library.len(),
            "pattern library loaded"
        );
        Ok(library)
    }

    /// Atomically replace the persisted library.
    fn save(&self, library: &PatternLibrary) -> CaliperResult<()> {
        let json =
            serde_json::to_string_pretty(library).map_err(|e| StoreError::Serialize {
                message: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.sync_all().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::ReplaceFailed {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(
            version = library.version,
            patterns = library.len(),
            path = %self.path.display(),
            "pattern library saved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caliper_core::errors::CaliperError;
    use caliper_core::pattern::{Pattern, Polarity};
    use std::collections::BTreeSet;

    fn keywords(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn missing_file_loads_as_empty_library() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLibraryStore::new(dir.path().join("patterns.json"));
        let library = store.load().unwrap();
        assert!(library.is_empty());
        assert_eq!(library.version, 0);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLibraryStore::new(dir.path().join("patterns.json"));

        let mut library = PatternLibrary::empty();
        library.version = 3;
        library.insert(Pattern::new(keywords(&["login", "crash"]), Polarity::Bad));
        store.save(&library).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.version, 3);
        assert_eq!(loaded.len(), 1);
        assert!(!dir.path().join("patterns.json.tmp").exists());
    }

    #[test]
    fn save_replaces_rather_than_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonLibraryStore::new(dir.path().join("patterns.json"));

        let mut library = PatternLibrary::empty();
        library.insert(Pattern::new(keywords(&["refund", "delay"]), Polarity::Bad));
        store.save(&library).unwrap();

        library.version += 1;
        store.save(&library).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn corrupt_file_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonLibraryStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            CaliperError::Store(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn newer_schema_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, r#"{"schema_version": 9, "version": 0, "patterns": {}}"#).unwrap();

        let err = JsonLibraryStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            CaliperError::Store(StoreError::SchemaTooNew { found: 9, .. })
        ));
    }

    #[test]
    fn legacy_schema_is_routed_to_migration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        fs::write(&path, r#"{"schema_version": 1, "patterns": []}"#).unwrap();

        let err = JsonLibraryStore::new(&path).load().unwrap_err();
        assert!(matches!(
            err,
            CaliperError::Store(StoreError::LegacySchema { found: 1 })
        ));
    }
}
