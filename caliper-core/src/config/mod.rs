pub mod convergence_config;
pub mod defaults;
pub mod engine_config;
pub mod keyword_config;
pub mod lifecycle_config;
pub mod retry_config;
pub mod scoring_config;

pub use convergence_config::ConvergenceConfig;
pub use engine_config::EngineConfig;
pub use keyword_config::KeywordConfig;
pub use lifecycle_config::LifecycleConfig;
pub use retry_config::RetryConfig;
pub use scoring_config::ScoringConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;
use crate::gestalt::Gestalt;

/// Aggregated engine configuration. An immutable value injected at
/// construction; tests override individual fields with struct updates,
/// never ambient globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaliperConfig {
    pub keywords: KeywordConfig,
    pub scoring: ScoringConfig,
    pub lifecycle: LifecycleConfig,
    pub convergence: ConvergenceConfig,
    pub engine: EngineConfig,
    pub retry: RetryConfig,
}

impl CaliperConfig {
    /// Parse from TOML text, one section per subsystem; missing sections
    /// and fields fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field: field.to_string(),
                reason: reason.into(),
            }
        }

        if self.keywords.min_token_len == 0 {
            return Err(invalid("keywords.min_token_len", "must be at least 1"));
        }
        if !(self.scoring.match_coverage > 0.0 && self.scoring.match_coverage <= 1.0) {
            return Err(invalid("scoring.match_coverage", "must be in (0, 1]"));
        }
        if self.scoring.good_score_threshold <= self.scoring.bad_score_threshold {
            return Err(invalid(
                "scoring.good_score_threshold",
                "must exceed bad_score_threshold",
            ));
        }
        for (field, value) in [
            ("scoring.good_score_threshold", self.scoring.good_score_threshold),
            ("scoring.bad_score_threshold", self.scoring.bad_score_threshold),
        ] {
            if !(Gestalt::MIN..=Gestalt::MAX).contains(&value) {
                return Err(invalid(field, "must be within the score range [1, 5]"));
            }
        }
        for (field, value) in [
            ("lifecycle.commit_min_accuracy", self.lifecycle.commit_min_accuracy),
            ("lifecycle.reject_max_accuracy", self.lifecycle.reject_max_accuracy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be in [0, 1]"));
            }
        }
        if self.lifecycle.reject_max_accuracy >= self.lifecycle.commit_min_accuracy {
            return Err(invalid(
                "lifecycle.reject_max_accuracy",
                "must be below commit_min_accuracy",
            ));
        }
        if !(self.lifecycle.duplicate_overlap > 0.0 && self.lifecycle.duplicate_overlap <= 1.0) {
            return Err(invalid("lifecycle.duplicate_overlap", "must be in (0, 1]"));
        }
        if self.convergence.window == 0 {
            return Err(invalid("convergence.window", "must be at least 1"));
        }
        if self.convergence.gap_target < 0.0 {
            return Err(invalid("convergence.gap_target", "must not be negative"));
        }
        if self.convergence.divergence_delta < 0.0 {
            return Err(invalid("convergence.divergence_delta", "must not be negative"));
        }
        if self.engine.batch_size == 0 {
            return Err(invalid("engine.batch_size", "must be at least 1"));
        }
        if self.engine.max_concurrent_judgments == 0 {
            return Err(invalid("engine.max_concurrent_judgments", "must be at least 1"));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry.max_attempts", "must be at least 1"));
        }
        Ok(())
    }
}
