//! # caliper-calibration
//!
//! The iteration loop that makes the cheap scorer trustworthy: pull a
//! batch of items, score them locally, score them through the remote
//! judge, feed both verdicts to the pattern lifecycle, persist the new
//! library, and repeat until the two modes agree closely enough.
//!
//! The engine owns the authoritative in-memory library copy and only
//! adopts a new version after it has been persisted. Every iteration
//! leaves an immutable [`IterationMetrics`](caliper_core::models::IterationMetrics)
//! record behind; convergence and divergence are judged over that history.

pub mod convergence;
pub mod engine;
pub mod retry;

pub use engine::{CalibrationEngine, IterationOutcome, StopReason};
pub use retry::RetryPolicy;
