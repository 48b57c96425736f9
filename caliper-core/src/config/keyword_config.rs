use serde::{Deserialize, Serialize};

use super::defaults;

/// Keyword extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Tokens shorter than this are dropped unless they are domain terms.
    pub min_token_len: usize,
    /// Deployment-specific stop words, on top of the built-in list.
    pub extra_stop_words: Vec<String>,
    /// Deployment-specific domain terms kept regardless of length.
    pub extra_domain_terms: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_token_len: defaults::DEFAULT_MIN_TOKEN_LEN,
            extra_stop_words: Vec::new(),
            extra_domain_terms: Vec::new(),
        }
    }
}
