use std::collections::HashSet;
use std::sync::OnceLock;

/// Standard English stopword list (NLTK's set, minus tokens that are not
/// purely alphabetic since the normalizer drops those anyway).
static ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am",
    "an", "and", "any", "are", "aren", "as", "at", "be", "because", "been",
    "before", "being", "below", "between", "both", "but", "by", "can",
    "couldn", "d", "did", "didn", "do", "does", "doesn", "doing", "don",
    "down", "during", "each", "few", "for", "from", "further", "had", "hadn",
    "has", "hasn", "have", "haven", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
    "isn", "it", "its", "itself", "just", "ll", "m", "ma", "me", "mightn",
    "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not",
    "now", "o", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "ourselves", "out", "over", "own", "re", "s", "same", "shan",
    "she", "should", "shouldn", "so", "some", "such", "t", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "ve", "very", "was", "wasn", "we", "were", "weren", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "wouldn", "y", "you", "your", "yours", "yourself", "yourselves",
];

/// Generic, uninformative review terms excluded from labels and tokens by
/// default. Overridable through `AnalyzeConfig::domain_stopwords`.
pub static DOMAIN_DEFAULTS: &[&str] = &[
    "get", "great", "like", "really", "good", "gym", "place", "love", "hate",
    "one", "trainer",
];

/// Process-wide read-only English stopword set, built once on first use and
/// shared by every `analyze` call.
pub fn english() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_set_contains_common_words() {
        let set = english();
        for w in ["the", "was", "and", "is", "not"] {
            assert!(set.contains(w), "missing stopword {w}");
        }
        assert!(!set.contains("staff"));
        assert!(!set.contains("equipment"));
    }

    #[test]
    fn english_set_is_shared() {
        let a = english() as *const _;
        let b = english() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn domain_defaults_match_review_noise_terms() {
        assert!(DOMAIN_DEFAULTS.contains(&"gym"));
        assert!(DOMAIN_DEFAULTS.contains(&"great"));
        assert_eq!(DOMAIN_DEFAULTS.len(), 11);
    }
}
