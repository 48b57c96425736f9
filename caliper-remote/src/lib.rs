//! # caliper-remote
//!
//! HTTP adapter for the expensive judge: posts one item at a time to a
//! configured endpoint and maps transport, HTTP, and decode failures
//! into the judge error taxonomy. Deliberately retry-free — the
//! calibration loop owns retries and concurrency limits.

pub mod judge;

pub use judge::{HttpJudge, RemoteJudgeConfig};
