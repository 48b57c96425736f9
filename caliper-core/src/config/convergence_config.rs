use serde::{Deserialize, Serialize};

use super::defaults;

/// Convergence and divergence detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    /// Mean absolute gap at or below this counts toward convergence.
    pub gap_target: f64,
    /// Trailing iterations that must all hit the gap target.
    pub window: usize,
    /// Convergence is never declared before this many iterations.
    pub min_iterations: usize,
    /// Iteration-over-iteration mean gap increase that flags divergence.
    pub divergence_delta: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            gap_target: defaults::DEFAULT_GAP_TARGET,
            window: defaults::DEFAULT_CONVERGENCE_WINDOW,
            min_iterations: defaults::DEFAULT_MIN_ITERATIONS,
            divergence_delta: defaults::DEFAULT_DIVERGENCE_DELTA,
        }
    }
}
