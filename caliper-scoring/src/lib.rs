//! # caliper-scoring
//!
//! The cheap half of dual-mode evaluation: committed patterns vote on an
//! item's gestalt score, locally and deterministically, with a reasons
//! list that reconstructs the number exactly. No network, no model —
//! this is the side that runs on every item, every iteration.

pub mod scorer;
pub mod vote;

pub use scorer::CheapScorer;
