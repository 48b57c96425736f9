/// Caliper engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Schema version of the persisted pattern library format.
pub const LIBRARY_SCHEMA_VERSION: u32 = 2;

/// Schema version of the legacy free-text rule format the migrator accepts.
pub const LEGACY_SCHEMA_VERSION: u32 = 1;
