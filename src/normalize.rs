use std::collections::BTreeSet;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::AnalyzeError;
use crate::stopwords;

/// Lowercase, tokenize, and stopword-filter one batch of raw reviews.
///
/// Output is one token sequence per review, same length and order as the
/// input. Tokens are purely alphabetic; everything else is a separator.
/// A review may normalize to an empty sequence — the corpus-level emptiness
/// check belongs to the dictionary builder, not here.
pub fn normalize(
    reviews: &[String],
    domain_stopwords: &BTreeSet<String>,
) -> Result<Vec<Vec<String>>, AnalyzeError> {
    if reviews.is_empty() {
        return Err(AnalyzeError::InvalidInput(
            "review batch is empty".to_string(),
        ));
    }

    let english = stopwords::english();
    let normalized: Vec<Vec<String>> = reviews
        .iter()
        .map(|review| {
            let folded = review.nfc().collect::<String>().to_lowercase();
            folded
                .split(|c: char| !c.is_alphabetic())
                .filter(|t| !t.is_empty())
                .filter(|t| !english.contains(t) && !domain_stopwords.contains(*t))
                .map(str::to_string)
                .collect()
        })
        .collect();

    let token_total: usize = normalized.iter().map(Vec::len).sum();
    debug!(
        "Normalization completed - reviews={}, tokens={}",
        normalized.len(),
        token_total
    );

    Ok(normalized)
}
