use crate::errors::CaliperResult;
use crate::pattern::PatternLibrary;

/// Pattern library persistence with atomic-replace semantics: a save either
/// fully lands or fails loudly, and a crash mid-write leaves the previous
/// library intact.
pub trait ILibraryStore: Send + Sync {
    fn load(&self) -> CaliperResult<PatternLibrary>;

    fn save(&self, library: &PatternLibrary) -> CaliperResult<()>;
}
