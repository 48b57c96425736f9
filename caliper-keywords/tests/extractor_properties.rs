use caliper_keywords::{lexicon, KeywordExtractor};
use proptest::prelude::*;

proptest! {
    #[test]
    fn tokens_are_normalized(text in ".{0,300}") {
        let extractor = KeywordExtractor::default();
        for token in extractor.extract(&text) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric()));
            prop_assert_eq!(token.to_lowercase(), token.clone());
            prop_assert!(!lexicon::is_stop_word(&token));
            prop_assert!(token.len() >= 3 || lexicon::is_domain_term(&token));
        }
    }

    #[test]
    fn extraction_is_deterministic(text in ".{0,300}") {
        let extractor = KeywordExtractor::default();
        prop_assert_eq!(extractor.extract(&text), extractor.extract(&text));
    }
}
