use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::AnalyzeError;

/// TF-IDF vector space shared by reviews and label sentences.
///
/// Fit once over the space-joined normalized reviews; label sentences are
/// only ever transformed through the fitted space, never refit. That
/// asymmetry is what makes centroid-to-label cosine similarity meaningful.
///
/// Semantics follow the reference vectorizer the pipeline grew up with:
/// raw term counts, smoothed idf `ln((1 + n) / (1 + df)) + 1`, rows
/// L2-normalized, vocabulary sorted lexicographically, document-frequency
/// bounds applied before vocabulary assembly.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
}

impl TfidfSpace {
    /// Fit the space over whitespace-tokenized documents.
    pub fn fit(
        documents: &[String],
        max_df: f64,
        min_df: usize,
        ngram_range: (usize, usize),
    ) -> Result<Self, AnalyzeError> {
        let n_docs = documents.len();
        let max_df_count = ((max_df * n_docs as f64).floor() as usize).max(1);

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let tokens = whitespace_tokens(doc);
            let mut seen: HashSet<String> = HashSet::new();
            for term in ngrams(&tokens, ngram_range) {
                seen.insert(term);
            }
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut vocabulary: Vec<String> = doc_freq
            .iter()
            .filter(|(_, &df)| df >= min_df && df <= max_df_count)
            .map(|(term, _)| term.clone())
            .collect();
        vocabulary.sort();

        if vocabulary.is_empty() {
            return Err(AnalyzeError::InsufficientVocabulary(format!(
                "no term satisfies min_df={min_df}, max_df={max_df} over {n_docs} documents; \
                 relax the bounds or supply more reviews"
            )));
        }

        let index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| {
                let df = doc_freq[t] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        debug!(
            "TF-IDF space fitted - documents={}, vocabulary={}, min_df={}, max_df_count={}",
            n_docs,
            vocabulary.len(),
            min_df,
            max_df_count
        );

        Ok(Self {
            vocabulary,
            index,
            idf,
            ngram_range,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Embed documents into the fitted space. Rows are L2-normalized;
    /// documents with no in-vocabulary term map to the zero vector.
    pub fn transform(&self, documents: &[String]) -> Vec<Vec<f64>> {
        documents
            .iter()
            .map(|doc| {
                let tokens = whitespace_tokens(doc);
                let mut row = vec![0.0; self.vocabulary.len()];
                for term in ngrams(&tokens, self.ngram_range) {
                    if let Some(&i) = self.index.get(&term) {
                        row[i] += 1.0;
                    }
                }
                for (i, value) in row.iter_mut().enumerate() {
                    *value *= self.idf[i];
                }
                l2_normalize(&mut row);
                row
            })
            .collect()
    }
}

fn whitespace_tokens(doc: &str) -> Vec<String> {
    doc.split_whitespace().map(|t| t.to_lowercase()).collect()
}

fn ngrams(tokens: &[String], (lo, hi): (usize, usize)) -> Vec<String> {
    let mut out = Vec::new();
    for n in lo.max(1)..=hi.max(1) {
        for window in tokens.windows(n) {
            out.push(window.join(" "));
        }
    }
    out
}

fn l2_normalize(row: &mut [f64]) {
    let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
}
