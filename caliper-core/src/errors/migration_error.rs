/// Whole-file migration failures. Per-entry problems are not errors —
/// they surface as warnings and the migration continues.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("legacy library unreadable at {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("not a legacy pattern file: {details}")]
    NotLegacy { details: String },
}
