use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::config::AnalyzeConfig;
use crate::models::Topic;

/// Derive category labels from the pooled top terms of every topic.
///
/// Terms are counted across topics, domain stopwords dropped, and the pool
/// ranked by descending frequency. Ties keep first-appearance order (topic 0
/// outranks topic 1, and within a topic higher-weighted terms come first).
/// Priority terms present in the pool are pinned to the front regardless of
/// frequency. At most `label_count` unique labels come back.
pub fn synthesize(topics: &[Topic], config: &AnalyzeConfig) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut appearance: Vec<&str> = Vec::new();

    for topic in topics {
        for (term, _) in &topic.terms {
            if config.domain_stopwords.contains(term.as_str()) {
                continue;
            }
            let entry = counts.entry(term.as_str()).or_insert(0);
            if *entry == 0 {
                appearance.push(term.as_str());
            }
            *entry += 1;
        }
    }

    let pinned: Vec<&str> = config
        .priority_terms
        .iter()
        .map(String::as_str)
        .filter(|t| counts.contains_key(*t))
        .unique()
        .collect();

    // Stable sort: equal counts preserve first-appearance order.
    let mut ranked = appearance.clone();
    ranked.sort_by_key(|t| std::cmp::Reverse(counts[t]));

    let labels: Vec<String> = pinned
        .iter()
        .copied()
        .chain(ranked.into_iter().filter(|t| !pinned.contains(t)))
        .take(config.label_count)
        .map(str::to_string)
        .collect();

    debug!(
        "Label synthesis completed - pool={}, pinned={}, labels={:?}",
        appearance.len(),
        pinned.len(),
        labels
    );
    labels
}
