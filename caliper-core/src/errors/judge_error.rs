/// Failures from the expensive judge — a remote, latency-bound service.
#[derive(Debug, Clone, thiserror::Error)]
pub enum JudgeError {
    #[error("judge call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("judge unavailable: {message}")]
    Unavailable { message: String },

    #[error("judge returned HTTP {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("judge response malformed: {message}")]
    Malformed { message: String },

    #[error("judge failed for item {item_id} after {attempts} attempts")]
    RetriesExhausted { item_id: String, attempts: u32 },
}

impl JudgeError {
    /// Whether another attempt could plausibly succeed. Client-side HTTP
    /// errors and exhausted retries are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            JudgeError::Timeout { .. }
            | JudgeError::Unavailable { .. }
            | JudgeError::Malformed { .. } => true,
            JudgeError::Remote { status, .. } => *status >= 500,
            JudgeError::RetriesExhausted { .. } => false,
        }
    }
}
