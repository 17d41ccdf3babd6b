use std::collections::HashMap;

use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::AnalyzeError;
use crate::models::Topic;

/// Term dictionary over one normalized corpus: unique terms with stable
/// integer ids assigned in first-occurrence order.
#[derive(Debug, Clone)]
pub struct Dictionary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Build from token sequences. Fails with `EmptyCorpusError` semantics
    /// when no review contributed a single usable token.
    pub fn build(token_docs: &[Vec<String>]) -> Result<Self, AnalyzeError> {
        let mut terms = Vec::new();
        let mut index = HashMap::new();
        for doc in token_docs {
            for token in doc {
                if !index.contains_key(token) {
                    index.insert(token.clone(), terms.len());
                    terms.push(token.clone());
                }
            }
        }
        if terms.is_empty() {
            return Err(AnalyzeError::EmptyCorpus(
                "normalization stripped every token; supply at least one review with a usable term"
                    .to_string(),
            ));
        }
        debug!("Dictionary built - terms={}", terms.len());
        Ok(Self { terms, index })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, id: usize) -> &str {
        &self.terms[id]
    }

    /// Bag-of-words for one document: (term id, count) pairs in id order.
    pub fn doc_to_bow(&self, doc: &[String]) -> Vec<(usize, f64)> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in doc {
            if let Some(&id) = self.index.get(token) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let mut bow: Vec<(usize, f64)> = counts.into_iter().collect();
        bow.sort_by_key(|&(id, _)| id);
        bow
    }
}

/// Latent Dirichlet Allocation fit over a bag-of-words corpus.
///
/// Uses a seeded expectation/maximization loop: each pass re-estimates the
/// per-document topic mixture and the per-topic term distribution from the
/// expected topic assignment of every (document, term) count. The seed fully
/// determines the initialization noise, so identical input and seed give
/// identical topics across runs.
#[derive(Debug)]
pub struct TopicModel {
    topic_count: usize,
    /// topic_count x vocab rows, each row a distribution over terms.
    topic_term: Vec<Vec<f64>>,
}

impl TopicModel {
    pub fn fit(
        dictionary: &Dictionary,
        bows: &[Vec<(usize, f64)>],
        topic_count: usize,
        passes: usize,
        seed: u64,
    ) -> Result<Self, AnalyzeError> {
        if topic_count == 0 {
            return Err(AnalyzeError::ModelFit(
                "topic_count must be at least 1".to_string(),
            ));
        }
        let n_docs = bows.len();
        let n_terms = dictionary.len();
        debug!(
            "LDA fit starting - docs={}, terms={}, topics={}, passes={}, seed={}",
            n_docs, n_terms, topic_count, passes, seed
        );

        // Uniform init plus seeded noise so topics break symmetry the same
        // way on every run.
        let mut doc_topic = vec![vec![1.0 / topic_count as f64; topic_count]; n_docs];
        let mut topic_term = vec![vec![1.0 / n_terms as f64; n_terms]; topic_count];
        for (d, row) in doc_topic.iter_mut().enumerate() {
            for (k, p) in row.iter_mut().enumerate() {
                *p += 0.01 * seeded_unit(seed, (d * topic_count + k) as u64);
            }
            normalize_row(row);
        }
        for (k, row) in topic_term.iter_mut().enumerate() {
            for (v, p) in row.iter_mut().enumerate() {
                *p += 0.01 * seeded_unit(seed ^ 0x9e37_79b9, (k * n_terms + v) as u64);
            }
            normalize_row(row);
        }

        let mut scratch = vec![0.0; topic_count];
        for _ in 0..passes {
            let mut next_doc_topic = vec![vec![0.0; topic_count]; n_docs];
            let mut next_topic_term = vec![vec![0.0; n_terms]; topic_count];

            for (d, bow) in bows.iter().enumerate() {
                for &(v, count) in bow {
                    let mut sum = 0.0;
                    for k in 0..topic_count {
                        scratch[k] = doc_topic[d][k] * topic_term[k][v];
                        sum += scratch[k];
                    }
                    if sum <= 1e-12 {
                        continue;
                    }
                    for k in 0..topic_count {
                        let resp = count * scratch[k] / sum;
                        next_doc_topic[d][k] += resp;
                        next_topic_term[k][v] += resp;
                    }
                }
            }

            for row in next_doc_topic.iter_mut() {
                normalize_row(row);
            }
            for row in next_topic_term.iter_mut() {
                normalize_row(row);
            }
            doc_topic = next_doc_topic;
            topic_term = next_topic_term;
        }

        info!(
            "LDA fit completed - topics={}, vocabulary={}",
            topic_count, n_terms
        );
        Ok(Self {
            topic_count,
            topic_term,
        })
    }

    pub fn topic_count(&self) -> usize {
        self.topic_count
    }

    /// Topics with their top-N terms by weight, descending. Equal weights
    /// break ties on term id (first occurrence in the corpus).
    pub fn topics(&self, dictionary: &Dictionary, top_n: usize) -> Vec<Topic> {
        self.topic_term
            .iter()
            .enumerate()
            .map(|(id, row)| {
                let mut ranked: Vec<(usize, f64)> =
                    row.iter().copied().enumerate().collect();
                ranked.sort_by(|a, b| {
                    b.1.partial_cmp(&a.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then(a.0.cmp(&b.0))
                });
                ranked.truncate(top_n);
                Topic {
                    id,
                    terms: ranked
                        .into_iter()
                        .map(|(v, w)| (dictionary.term(v).to_string(), w))
                        .collect(),
                }
            })
            .collect()
    }
}

/// Deterministic noise in [0, 1) derived from the run seed and a stream
/// index, mixed through xxh3 so adjacent indices decorrelate.
fn seeded_unit(seed: u64, index: u64) -> f64 {
    let h = xxh3_64(&[seed.to_le_bytes(), index.to_le_bytes()].concat());
    (h >> 11) as f64 / (1u64 << 53) as f64
}

fn normalize_row(row: &mut [f64]) {
    let sum: f64 = row.iter().sum();
    if sum > 1e-12 {
        for p in row.iter_mut() {
            *p /= sum;
        }
    }
}
