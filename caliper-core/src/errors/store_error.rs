/// Pattern library persistence errors. Any of these is fatal to the
/// iteration that triggered the save; the previously persisted library
/// stays authoritative.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("library I/O failed at {path}: {message}")]
    Io { path: String, message: String },

    #[error("library serialization failed: {message}")]
    Serialize { message: String },

    #[error("library file corrupt: {details}")]
    Corrupt { details: String },

    #[error("library schema {found} is newer than supported schema {supported}")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error("library file uses legacy schema {found}; migrate it first")]
    LegacySchema { found: u32 },

    #[error("atomic replace of {path} failed: {message}")]
    ReplaceFailed { path: String, message: String },
}
