use std::collections::BTreeSet;

use caliper_core::config::KeywordConfig;

use crate::lexicon;

/// Whitespace + lowercase tokenizer with stop-word removal and a
/// domain-lexicon exemption from the minimum-length filter.
///
/// The same extractor instance feeds scoring, lifecycle bookkeeping, and
/// migration, so all three see identical token sets for identical text.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_token_len: usize,
    extra_stop_words: BTreeSet<String>,
    extra_domain_terms: BTreeSet<String>,
}

impl KeywordExtractor {
    pub fn new(config: &KeywordConfig) -> Self {
        Self {
            min_token_len: config.min_token_len,
            extra_stop_words: config
                .extra_stop_words
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
            extra_domain_terms: config
                .extra_domain_terms
                .iter()
                .map(|w| w.to_lowercase())
                .collect(),
        }
    }

    /// Extract the normalized keyword set for a piece of text.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        text.split_whitespace()
            .map(|w| {
                w.to_lowercase()
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
            })
            .filter(|w| !w.is_empty())
            .filter(|w| !self.is_stop_word(w))
            .filter(|w| w.len() >= self.min_token_len || self.is_domain_term(w))
            .collect()
    }

    fn is_stop_word(&self, word: &str) -> bool {
        lexicon::is_stop_word(word) || self.extra_stop_words.contains(word)
    }

    fn is_domain_term(&self, word: &str) -> bool {
        lexicon::is_domain_term(word) || self.extra_domain_terms.contains(word)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(&KeywordConfig::default())
    }
}
