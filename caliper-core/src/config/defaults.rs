// Single source of truth for all default values.

// --- Keyword extraction ---
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

// --- Scoring ---
pub const DEFAULT_MATCH_COVERAGE: f64 = 0.75;
pub const DEFAULT_GOOD_SCORE_THRESHOLD: f64 = 4.0;
pub const DEFAULT_BAD_SCORE_THRESHOLD: f64 = 2.0;

// --- Lifecycle ---
pub const DEFAULT_COMMIT_MIN_MATCHES: u64 = 5;
pub const DEFAULT_COMMIT_MIN_ACCURACY: f64 = 0.7;
pub const DEFAULT_REJECT_MIN_MATCHES: u64 = 5;
pub const DEFAULT_REJECT_MAX_ACCURACY: f64 = 0.3;
pub const DEFAULT_DUPLICATE_OVERLAP: f64 = 0.7;

// --- Convergence ---
pub const DEFAULT_GAP_TARGET: f64 = 0.5;
pub const DEFAULT_CONVERGENCE_WINDOW: usize = 3;
pub const DEFAULT_MIN_ITERATIONS: usize = 5;
pub const DEFAULT_DIVERGENCE_DELTA: f64 = 0.3;

// --- Engine ---
pub const DEFAULT_BATCH_SIZE: usize = 25;
pub const DEFAULT_MAX_CONCURRENT_JUDGMENTS: usize = 4;

// --- Retry ---
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_RETRY_MAX_BACKOFF_MS: u64 = 30_000;
