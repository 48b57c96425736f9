/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file unreadable at {path}: {message}")]
    Io { path: String, message: String },

    #[error("config parse failed: {message}")]
    Parse { message: String },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}
