use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::stopwords::DOMAIN_DEFAULTS;

/// Tuning knobs for one `analyze` invocation. Defaults are the constants the
/// production pipeline settled on; every divergent historical copy of the
/// pipeline collapses into overrides of this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    /// Number of latent topics fit by the LDA stage.
    pub topic_count: usize,
    /// Full corpus sweeps of the LDA expectation/maximization loop.
    pub lda_passes: usize,
    /// Top terms exposed per topic when pooling label candidates.
    pub terms_per_topic: usize,
    /// Maximum number of category labels synthesized per batch.
    pub label_count: usize,
    /// Cosine similarity a label must clear to attach to a cluster centroid.
    pub similarity_threshold: f64,
    /// Minimum members for a density cluster to survive.
    pub min_cluster_size: usize,
    /// Neighborhood size used for core distances.
    pub min_samples: usize,
    /// Seed threaded through every stochastic sub-step.
    pub random_seed: u64,
    /// Labels forced to the front of the synthesized set when present in the
    /// pooled topic terms.
    pub priority_terms: Vec<String>,
    /// Generic terms excluded from tokens and labels, on top of the English
    /// stopword list.
    pub domain_stopwords: BTreeSet<String>,
    /// Ignore terms appearing in more than this fraction of documents.
    pub max_df: f64,
    /// Ignore terms appearing in fewer than this many documents.
    pub min_df: usize,
    /// Inclusive n-gram range for the TF-IDF space.
    pub ngram_range: (usize, usize),
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            topic_count: 10,
            lda_passes: 20,
            terms_per_topic: 10,
            label_count: 5,
            similarity_threshold: 0.5,
            min_cluster_size: 2,
            min_samples: 2,
            random_seed: 42,
            priority_terms: Vec::new(),
            domain_stopwords: DOMAIN_DEFAULTS.iter().map(|s| s.to_string()).collect(),
            max_df: 0.85,
            min_df: 2,
            ngram_range: (1, 2),
        }
    }
}
