//! # caliper-core
//!
//! Foundation crate for the caliper calibration engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod gestalt;
pub mod item;
pub mod models;
pub mod pattern;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CaliperConfig;
pub use errors::{CaliperError, CaliperResult};
pub use gestalt::{Gestalt, ScoreBucket};
pub use item::Item;
pub use pattern::{MatchStats, Pattern, PatternLibrary, PatternProposal, PatternStatus, Polarity};
