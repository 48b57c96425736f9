//! # caliper-lifecycle
//!
//! Turns one iteration's dual verdicts into the next pattern library:
//! update accuracy evidence, commit or reject proposals that have enough
//! of it, retire near-duplicate committed patterns, and admit fresh
//! proposals from items the two evaluators disagreed on. Pure values in
//! and out — persistence and adoption are the caller's problem.

pub mod manager;
pub mod similarity;

pub use manager::{ItemOutcome, LifecycleManager, LifecycleOutcome};
