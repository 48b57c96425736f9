//! # caliper-store
//!
//! Owns the pattern library on disk: a single JSON file replaced atomically
//! on every save, plus the migrator that upgrades legacy (schema 1)
//! free-text rule files into the current keyword representation.

pub mod json_store;
pub mod memory;
pub mod migration;

pub use json_store::JsonLibraryStore;
pub use memory::InMemoryLibraryStore;
pub use migration::{LegacyPattern, MigrationDiscrepancy, MigrationWarning, Migrator};
