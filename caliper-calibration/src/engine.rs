//! The calibration engine: sequential iterations, concurrent judge calls.
//!
//! One iteration pulls a batch, computes cheap scores locally, fans the
//! expensive calls out under a semaphore bound, reconciles the library
//! through the lifecycle pass, and persists the result before adopting
//! it. Per-item judge failures skip the item; only a failed save fails
//! the iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use caliper_core::config::CaliperConfig;
use caliper_core::errors::JudgeError;
use caliper_core::models::{
    ComponentHealth, DualScore, HealthReport, IterationMetrics, JudgeScore, SkippedItem,
};
use caliper_core::pattern::LibrarySummary;
use caliper_core::traits::{IItemSource, IJudge, ILibraryStore};
use caliper_core::{CaliperResult, Item, PatternLibrary};
use caliper_lifecycle::{ItemOutcome, LifecycleManager};
use caliper_scoring::CheapScorer;

use crate::convergence;
use crate::retry::RetryPolicy;

/// What one `run_iteration` call produced.
#[derive(Debug, Clone)]
pub enum IterationOutcome {
    /// A batch was evaluated and the library advanced one version.
    Completed {
        metrics: IterationMetrics,
        /// Per-item dual scores for the audit log, surviving items only.
        results: Vec<DualScore>,
        skipped: Vec<SkippedItem>,
    },
    /// The item repository returned an empty batch; there is no more work.
    Exhausted,
}

/// Why a `run` loop handed control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Converged,
    Exhausted,
    IterationCap,
    StopRequested,
}

/// Drives calibration iterations against the three injected seams.
///
/// The engine holds the authoritative in-memory library. A new library
/// version is adopted only after the store accepted it, so a save
/// failure leaves the previous version in effect.
pub struct CalibrationEngine<J, S, L> {
    judge: Arc<J>,
    items: Arc<S>,
    store: Arc<L>,
    config: CaliperConfig,
    scorer: CheapScorer,
    lifecycle: LifecycleManager,
    retry: RetryPolicy,
    semaphore: Arc<Semaphore>,
    library: PatternLibrary,
    history: Vec<IterationMetrics>,
    stop: Arc<AtomicBool>,
    last_save_failed: bool,
    migration_warnings: usize,
}

impl<J, S, L> CalibrationEngine<J, S, L>
where
    J: IJudge + 'static,
    S: IItemSource,
    L: ILibraryStore,
{
    /// Load the library from the store and stand up an engine around it.
    pub fn new(
        judge: Arc<J>,
        items: Arc<S>,
        store: Arc<L>,
        config: CaliperConfig,
    ) -> CaliperResult<Self> {
        let library = store.load()?;
        info!(
            version = library.version,
            patterns = library.len(),
            "pattern library loaded"
        );

        let scorer = CheapScorer::new(&config);
        let lifecycle = LifecycleManager::new(&config);
        let retry = RetryPolicy::new(config.retry.clone());
        let semaphore = Arc::new(Semaphore::new(config.engine.max_concurrent_judgments));

        Ok(Self {
            judge,
            items,
            store,
            config,
            scorer,
            lifecycle,
            retry,
            semaphore,
            library,
            history: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
            last_save_failed: false,
            migration_warnings: 0,
        })
    }

    /// Run one full iteration: batch, dual scores, lifecycle, persist.
    pub async fn run_iteration(&mut self) -> CaliperResult<IterationOutcome> {
        let iteration_number = self.history.len() + 1;

        let batch = self.items.next_batch(self.config.engine.batch_size).await?;
        if batch.is_empty() {
            info!(iteration_number, "item repository exhausted");
            return Ok(IterationOutcome::Exhausted);
        }
        let batch_size = batch.len();
        info!(iteration_number, batch_size, "iteration started");

        // Cheap scores are pure local computation; they never wait on
        // the judge.
        let cheap_scores = self.scorer.score_batch(&batch, &self.library);
        let judged = self.judge_batch(&batch).await;

        let mut outcomes = Vec::with_capacity(batch_size);
        let mut skipped = Vec::new();
        for ((item, cheap), verdict) in batch.into_iter().zip(cheap_scores).zip(judged) {
            match verdict {
                Ok(expensive) => {
                    let dual = DualScore::new(item.id.clone(), cheap, expensive);
                    outcomes.push(ItemOutcome::new(item, dual));
                }
                Err(judge_error) => {
                    warn!(item_id = %item.id, error = %judge_error, "item skipped this iteration");
                    skipped.push(SkippedItem {
                        item_id: item.id,
                        error: judge_error.to_string(),
                    });
                }
            }
        }

        let (mean_abs_gap, max_abs_gap) = gap_stats(&outcomes);

        let lifecycle_outcome = self.lifecycle.apply(&self.library, &outcomes);

        // Persist before adopting; on failure the previous library
        // remains authoritative.
        if let Err(save_error) = self.store.save(&lifecycle_outcome.library) {
            self.last_save_failed = true;
            error!(
                iteration_number,
                error = %save_error,
                "library save failed; previous version remains in effect"
            );
            return Err(save_error);
        }
        self.last_save_failed = false;
        self.library = lifecycle_outcome.library;

        // Convergence and divergence read agreement evidence, and only
        // iterations with surviving items carry any. An all-skipped
        // iteration records zeros in its metrics but contributes no
        // window entry and can neither converge the run nor fake a
        // divergence jump for the iteration after it.
        let (converged, diverged) = if outcomes.is_empty() {
            (false, false)
        } else {
            let mut gap_history: Vec<f64> = self
                .history
                .iter()
                .filter(|m| m.evaluated > 0)
                .map(|m| m.mean_abs_gap)
                .collect();
            let previous = gap_history.last().copied();
            gap_history.push(mean_abs_gap);
            (
                convergence::converged(&gap_history, &self.config.convergence),
                previous.map_or(false, |prev| {
                    convergence::diverged(prev, mean_abs_gap, &self.config.convergence)
                }),
            )
        };
        if diverged {
            warn!(
                iteration_number,
                mean_abs_gap, "mean gap grew; cheap and expensive modes are drifting apart"
            );
        }

        let metrics = IterationMetrics {
            iteration_number,
            batch_size,
            evaluated: outcomes.len(),
            skipped: skipped.len(),
            mean_abs_gap,
            max_abs_gap,
            committed_this_iteration: lifecycle_outcome.committed,
            rejected_this_iteration: lifecycle_outcome.rejected,
            retired_this_iteration: lifecycle_outcome.retired,
            proposed_this_iteration: lifecycle_outcome.proposed,
            converged,
            diverged,
        };
        info!(
            iteration_number,
            evaluated = metrics.evaluated,
            skipped = metrics.skipped,
            mean_abs_gap,
            max_abs_gap,
            converged,
            diverged,
            library_version = self.library.version,
            "iteration finished"
        );
        self.history.push(metrics.clone());

        let results = outcomes.into_iter().map(|o| o.dual).collect();
        Ok(IterationOutcome::Completed {
            metrics,
            results,
            skipped,
        })
    }

    /// Iterate until convergence, source exhaustion, the cap, or a stop
    /// request. The stop flag is honored at iteration boundaries only.
    pub async fn run(&mut self, max_iterations: usize) -> CaliperResult<StopReason> {
        for _ in 0..max_iterations {
            if self.stop.load(Ordering::SeqCst) {
                info!("stop requested; halting at iteration boundary");
                return Ok(StopReason::StopRequested);
            }
            match self.run_iteration().await? {
                IterationOutcome::Exhausted => return Ok(StopReason::Exhausted),
                IterationOutcome::Completed { metrics, .. } => {
                    if metrics.converged {
                        info!(
                            iteration_number = metrics.iteration_number,
                            "calibration converged"
                        );
                        return Ok(StopReason::Converged);
                    }
                }
            }
        }
        Ok(StopReason::IterationCap)
    }

    /// Fan the judge calls out, bounded by the concurrency semaphore.
    /// Results come back in batch order.
    async fn judge_batch(&self, batch: &[Item]) -> Vec<Result<JudgeScore, JudgeError>> {
        let mut handles = Vec::with_capacity(batch.len());
        for item in batch {
            let judge = Arc::clone(&self.judge);
            let retry = self.retry.clone();
            let semaphore = Arc::clone(&self.semaphore);
            let item = item.clone();
            handles.push(tokio::spawn(async move {
                let _permit =
                    semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| JudgeError::Unavailable {
                            message: "judge concurrency gate closed".to_string(),
                        })?;
                retry.evaluate(judge.as_ref(), &item).await
            }));
        }

        let mut verdicts = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.await {
                Ok(verdict) => verdicts.push(verdict),
                Err(join_error) => verdicts.push(Err(JudgeError::Unavailable {
                    message: format!("judge task aborted: {join_error}"),
                })),
            }
        }
        verdicts
    }

    /// Handle for requesting a cooperative stop from another task.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Worst-wins health across the engine's components.
    pub fn health(&self) -> HealthReport {
        let mut components = vec![ComponentHealth::ready("extractor")];

        components.push(if self.library.committed_scan().is_empty() {
            ComponentHealth::degraded("scorer", "no committed patterns; every verdict is baseline")
        } else {
            ComponentHealth::ready("scorer")
        });

        let last_skipped = self.history.last().map_or(0, |m| m.skipped);
        components.push(if last_skipped > 0 {
            ComponentHealth::degraded(
                "judge",
                format!("{last_skipped} items skipped last iteration"),
            )
        } else {
            ComponentHealth::ready("judge")
        });

        components.push(if self.last_save_failed {
            ComponentHealth::degraded("store", "last save failed; library changes not persisted")
        } else {
            ComponentHealth::ready("store")
        });

        components.push(if self.migration_warnings > 0 {
            ComponentHealth::degraded(
                "migrator",
                format!("{} entries warned during migration", self.migration_warnings),
            )
        } else {
            ComponentHealth::ready("migrator")
        });

        HealthReport::from_components(components)
    }

    /// Record how many warnings the schema migration emitted, so the
    /// health report can surface them.
    pub fn note_migration_warnings(&mut self, count: usize) {
        self.migration_warnings = count;
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    pub fn metrics_history(&self) -> &[IterationMetrics] {
        &self.history
    }

    pub fn summary(&self) -> LibrarySummary {
        self.library.summary()
    }
}

/// Mean and max absolute gap over the surviving items. An iteration
/// where everything was skipped reports zeros; health reporting carries
/// the skip count.
fn gap_stats(outcomes: &[ItemOutcome]) -> (f64, f64) {
    if outcomes.is_empty() {
        return (0.0, 0.0);
    }
    let sum: f64 = outcomes.iter().map(|o| o.dual.abs_gap()).sum();
    let max = outcomes
        .iter()
        .map(|o| o.dual.abs_gap())
        .fold(0.0_f64, f64::max);
    (sum / outcomes.len() as f64, max)
}
