//! Convergence and divergence detection over the iteration history.
//!
//! Both checks read nothing but the sequence of per-iteration mean
//! absolute gaps, so they stay pure and trivially testable. The engine
//! calls them with the current iteration's gap already appended.

use caliper_core::config::ConvergenceConfig;

/// True when the calibration loop may stop: the run has cleared the
/// minimum iteration floor and every gap in the trailing window sits at
/// or below the target. A window that is not fully populated never
/// converges.
pub fn converged(mean_gaps: &[f64], config: &ConvergenceConfig) -> bool {
    if mean_gaps.len() < config.min_iterations || mean_gaps.len() < config.window {
        return false;
    }
    mean_gaps[mean_gaps.len() - config.window..]
        .iter()
        .all(|gap| *gap <= config.gap_target)
}

/// True when the mean gap grew by more than `divergence_delta` since the
/// previous iteration. Advisory only; the loop keeps running.
pub fn diverged(previous: f64, current: f64, config: &ConvergenceConfig) -> bool {
    current - previous > config.divergence_delta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConvergenceConfig {
        ConvergenceConfig {
            gap_target: 0.5,
            window: 3,
            min_iterations: 5,
            divergence_delta: 0.3,
        }
    }

    #[test]
    fn converges_once_floor_and_window_are_both_satisfied() {
        let gaps = [0.6, 0.55, 0.4, 0.3, 0.2];

        assert!(converged(&gaps, &config()));
        // The same shrinking trend truncated to four iterations is still
        // below the floor.
        assert!(!converged(&gaps[..4], &config()));
    }

    #[test]
    fn one_gap_over_target_inside_the_window_blocks_convergence() {
        let gaps = [0.6, 0.55, 0.51, 0.3, 0.2];
        assert!(!converged(&gaps, &config()));
    }

    #[test]
    fn gap_exactly_at_target_counts() {
        let gaps = [0.9, 0.8, 0.5, 0.5, 0.5];
        assert!(converged(&gaps, &config()));
    }

    #[test]
    fn short_history_never_converges_even_when_quiet() {
        assert!(!converged(&[0.1, 0.1, 0.1], &config()));

        // Floor lower than the window: the window still has to fill up.
        let loose = ConvergenceConfig {
            min_iterations: 2,
            ..config()
        };
        assert!(!converged(&[0.1, 0.1], &loose));
    }

    #[test]
    fn divergence_is_a_strict_increase_beyond_delta() {
        assert!(diverged(0.3, 0.7, &config()));
        // Exactly delta is not divergence.
        assert!(!diverged(0.3, 0.6, &config()));
        assert!(!diverged(0.7, 0.3, &config()));
    }
}
