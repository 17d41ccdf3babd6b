use std::collections::BTreeMap;

use tracing::debug;

use crate::models::NOISE_CLUSTER;

/// Map every review to at least one label.
///
/// Non-noise clusters get the labels whose cosine similarity against the
/// cluster centroid clears `threshold`; if none clear it, the single best
/// label attaches instead, so no cluster ever ends up unlabeled. Reviews in
/// the same cluster therefore always share an identical label set.
///
/// Noise reviews (-1) are assigned independently by their own vector's
/// nearest label rather than through a shared noise centroid; a pooled
/// centroid over unrelated outliers carries no meaning.
pub fn assign_labels(
    review_vectors: &[Vec<f64>],
    cluster_ids: &[i32],
    labels: &[String],
    label_vectors: &[Vec<f64>],
    threshold: f64,
) -> Vec<Vec<String>> {
    let mut members: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, &c) in cluster_ids.iter().enumerate() {
        members.entry(c).or_default().push(i);
    }

    let mut cluster_labels: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (&cluster, idxs) in &members {
        if cluster == NOISE_CLUSTER {
            continue;
        }
        let centroid = mean_vector(review_vectors, idxs);
        let picked = labels_over_threshold(&centroid, label_vectors, threshold);
        debug!(
            "Cluster label assignment - cluster={}, members={}, labels={:?}",
            cluster,
            idxs.len(),
            picked.iter().map(|&i| labels[i].as_str()).collect::<Vec<_>>()
        );
        cluster_labels.insert(cluster, picked);
    }

    cluster_ids
        .iter()
        .enumerate()
        .map(|(i, &cluster)| {
            let picked = if cluster == NOISE_CLUSTER {
                vec![nearest_label(&review_vectors[i], label_vectors)]
            } else {
                cluster_labels[&cluster].clone()
            };
            picked.into_iter().map(|idx| labels[idx].clone()).collect()
        })
        .collect()
}

fn mean_vector(vectors: &[Vec<f64>], idxs: &[usize]) -> Vec<f64> {
    let dims = vectors[idxs[0]].len();
    let mut mean = vec![0.0; dims];
    for &i in idxs {
        for (m, v) in mean.iter_mut().zip(&vectors[i]) {
            *m += v;
        }
    }
    for m in mean.iter_mut() {
        *m /= idxs.len() as f64;
    }
    mean
}

/// Indices of every label above the threshold, falling back to the single
/// best match so the result is never empty. Ties resolve to the lowest
/// label index.
fn labels_over_threshold(vector: &[f64], label_vectors: &[Vec<f64>], threshold: f64) -> Vec<usize> {
    let over: Vec<usize> = label_vectors
        .iter()
        .enumerate()
        .filter(|(_, lv)| cosine_similarity(vector, lv) > threshold)
        .map(|(i, _)| i)
        .collect();
    if over.is_empty() {
        vec![argmax_similarity(vector, label_vectors)]
    } else {
        over
    }
}

fn nearest_label(vector: &[f64], label_vectors: &[Vec<f64>]) -> usize {
    argmax_similarity(vector, label_vectors)
}

fn argmax_similarity(vector: &[f64], label_vectors: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_sim = f64::NEG_INFINITY;
    for (i, lv) in label_vectors.iter().enumerate() {
        let sim = cosine_similarity(vector, lv);
        if sim > best_sim {
            best_sim = sim;
            best = i;
        }
    }
    best
}

/// Cosine similarity, defined as 0 when either vector is all-zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cluster_members_share_identical_label_sets() {
        let vectors = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.1, 0.9],
        ];
        let clusters = vec![0, 0, 1, 1];
        let labels = strings(&["staff", "equipment"]);
        let label_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let assigned = assign_labels(&vectors, &clusters, &labels, &label_vectors, 0.5);
        assert_eq!(assigned[0], assigned[1]);
        assert_eq!(assigned[2], assigned[3]);
        assert_eq!(assigned[0], vec!["staff"]);
        assert_eq!(assigned[2], vec!["equipment"]);
    }

    #[test]
    fn multiple_labels_attach_above_threshold() {
        let vectors = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let clusters = vec![0, 0];
        let labels = strings(&["staff", "equipment"]);
        let label_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let assigned = assign_labels(&vectors, &clusters, &labels, &label_vectors, 0.5);
        assert_eq!(assigned[0], vec!["staff", "equipment"]);
    }

    #[test]
    fn fallback_guarantees_at_least_one_label() {
        // Nothing clears a threshold of 0.99; the argmax label still lands.
        let vectors = vec![vec![1.0, 0.2], vec![1.0, 0.1]];
        let clusters = vec![0, 0];
        let labels = strings(&["staff", "equipment"]);
        let label_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let assigned = assign_labels(&vectors, &clusters, &labels, &label_vectors, 0.99);
        assert_eq!(assigned[0], vec!["staff"]);
        assert_eq!(assigned[1], vec!["staff"]);
    }

    #[test]
    fn noise_reviews_get_their_own_nearest_label() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let clusters = vec![-1, -1];
        let labels = strings(&["staff", "equipment"]);
        let label_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let assigned = assign_labels(&vectors, &clusters, &labels, &label_vectors, 0.5);
        assert_eq!(assigned[0], vec!["staff"]);
        assert_eq!(assigned[1], vec!["equipment"]);
    }

    #[test]
    fn zero_vector_noise_review_still_gets_a_label() {
        let vectors = vec![vec![0.0, 0.0]];
        let clusters = vec![-1];
        let labels = strings(&["staff", "equipment"]);
        let label_vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let assigned = assign_labels(&vectors, &clusters, &labels, &label_vectors, 0.5);
        assert_eq!(assigned[0], vec!["staff"]);
    }
}
