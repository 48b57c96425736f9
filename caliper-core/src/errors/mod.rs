pub mod config_error;
pub mod judge_error;
pub mod migration_error;
pub mod store_error;

pub use config_error::ConfigError;
pub use judge_error::JudgeError;
pub use migration_error::MigrationError;
pub use store_error::StoreError;

/// Convenience alias used across the workspace.
pub type CaliperResult<T> = Result<T, CaliperError>;

/// Top-level error wrapping every subsystem's taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum CaliperError {
    #[error("judge error: {0}")]
    Judge(#[from] JudgeError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
