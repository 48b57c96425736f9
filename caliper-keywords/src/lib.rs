//! # caliper-keywords
//!
//! Turns free text into the normalized token sets patterns are built from.
//! Deterministic and side-effect-free; no network or disk access.

pub mod extractor;
pub mod lexicon;

pub use extractor::KeywordExtractor;
