use thiserror::Error;

/// Terminal failures for one `analyze` batch. The pipeline never retries and
/// never returns partial results; callers re-invoke with adjusted input.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The input batch was empty or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Normalization stripped every token from every review.
    #[error("empty corpus: {0}")]
    EmptyCorpus(String),

    /// The fitted TF-IDF vocabulary came out empty; the corpus is too small
    /// relative to the document-frequency bounds.
    #[error("insufficient vocabulary: {0}")]
    InsufficientVocabulary(String),

    /// Topic model or clustering failed to execute.
    #[error("model fit failed: {0}")]
    ModelFit(String),
}
