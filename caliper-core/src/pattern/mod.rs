pub mod base;
pub mod library;
pub mod stats;

pub use base::{Pattern, PatternProposal, PatternStatus, Polarity};
pub use library::{LibrarySummary, MigrationProvenance, PatternLibrary};
pub use stats::{MatchStats, StatsSnapshot};
