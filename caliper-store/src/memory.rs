use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use caliper_core::errors::{CaliperResult, StoreError};
use caliper_core::pattern::PatternLibrary;
use caliper_core::traits::ILibraryStore;

/// In-memory store with the same observable semantics as the JSON store.
/// Test double; `fail_saves` simulates a persistence outage.
#[derive(Debug, Default)]
pub struct InMemoryLibraryStore {
    library: RwLock<PatternLibrary>,
    fail_saves: AtomicBool,
}

impl InMemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(library: PatternLibrary) -> Self {
        Self {
            library: RwLock::new(library),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Make every subsequent save fail, as a crashed disk would.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// The library as last successfully saved.
    pub fn current(&self) -> PatternLibrary {
        self.library.read().expect("store lock poisoned").clone()
    }
}

impl ILibraryStore for InMemoryLibraryStore {
    fn load(&self) -> CaliperResult<PatternLibrary> {
        Ok(self.current())
    }

    fn save(&self, library: &PatternLibrary) -> CaliperResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::ReplaceFailed {
                path: "<memory>".to_string(),
                message: "injected save failure".to_string(),
            }
            .into());
        }
        *self.library.write().expect("store lock poisoned") = library.clone();
        Ok(())
    }
}
