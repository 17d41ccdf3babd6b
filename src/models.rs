use serde::{Deserialize, Serialize};

/// Sentinel cluster id for reviews the density clusterer could not group.
pub const NOISE_CLUSTER: i32 = -1;

/// Per-review analysis record. One entry per input review, same order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    /// Lexicon polarity rescaled onto [0, 5].
    pub sentiment: f64,
    /// Lexicon subjectivity rescaled onto [0, 5].
    pub polarity: f64,
    /// Category labels attached to this review (never empty).
    pub named_labels: Vec<String>,
    /// Density cluster id; -1 marks noise.
    pub cluster: i32,
}

/// Per-category aggregate over every review carrying that label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub average_sentiment: f64,
    pub average_polarity: f64,
}

/// Full output of one `analyze` batch. Nothing here survives across calls;
/// labels and clusters are re-derived from scratch for every input set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub per_review: Vec<ReviewAnalysis>,
    pub per_category: Vec<CategorySummary>,
}

/// One latent topic: (term, weight) pairs ranked by descending weight,
/// weights summing to ~1 over the full vocabulary.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: usize,
    pub terms: Vec<(String, f64)>,
}
