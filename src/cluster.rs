use rayon::prelude::*;
use tracing::{debug, info};

use crate::models::NOISE_CLUSTER;

#[derive(Debug, Clone, Copy)]
pub struct ClusterParams {
    /// Minimum members for a component to count as a cluster.
    pub min_cluster_size: usize,
    /// Neighborhood size for core distances.
    pub min_samples: usize,
}

/// Density-based clustering of review vectors, HDBSCAN-style with leaf
/// cluster selection: Euclidean distances are lifted to mutual reachability
/// via per-point core distances, a minimum spanning tree is condensed
/// bottom-up, and the deepest components that reach `min_cluster_size`
/// become the clusters. Points never absorbed into a leaf cluster get the
/// noise id -1. All-noise is a valid outcome, not an error.
///
/// Deterministic for identical input ordering: ties in the merge order are
/// broken by point index.
pub fn cluster_vectors(vectors: &[Vec<f64>], params: ClusterParams) -> Vec<i32> {
    let n = vectors.len();
    if n == 0 {
        return Vec::new();
    }
    debug!(
        "Clustering started - points={}, min_cluster_size={}, min_samples={}",
        n, params.min_cluster_size, params.min_samples
    );
    if params.min_cluster_size > n || n == 1 {
        return vec![NOISE_CLUSTER; n];
    }

    // Pairwise Euclidean distances; the quadratic scan is the bottleneck so
    // rows go through rayon.
    let dist: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| (0..n).map(|j| euclidean(&vectors[i], &vectors[j])).collect())
        .collect();

    // Core distance = distance to the min_samples-th nearest neighbor with
    // the point itself counted first, clamped to the neighborhood actually
    // available.
    let core: Vec<f64> = (0..n)
        .map(|i| {
            let mut row: Vec<f64> = (0..n).filter(|&j| j != i).map(|j| dist[i][j]).collect();
            row.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let k = params.min_samples.saturating_sub(1).min(row.len());
            if k == 0 {
                0.0
            } else {
                row[k - 1]
            }
        })
        .collect();

    let reach = |i: usize, j: usize| dist[i][j].max(core[i]).max(core[j]);

    // Prim's MST over the complete mutual-reachability graph.
    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    let mut parent = vec![0usize; n];
    let mut edges: Vec<(f64, usize, usize)> = Vec::with_capacity(n - 1);
    in_tree[0] = true;
    for j in 1..n {
        best[j] = reach(0, j);
    }
    for _ in 1..n {
        let mut next = usize::MAX;
        for j in 0..n {
            if !in_tree[j] && (next == usize::MAX || best[j] < best[next]) {
                next = j;
            }
        }
        edges.push((best[next], parent[next], next));
        in_tree[next] = true;
        for j in 0..n {
            if !in_tree[j] {
                let d = reach(next, j);
                if d < best[j] {
                    best[j] = d;
                    parent[j] = next;
                }
            }
        }
    }
    edges.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2))
    });

    // Replay merges bottom-up. When two components that each reached
    // min_cluster_size meet, any side not already carrying a selected
    // cluster is itself a leaf cluster and gets frozen.
    let mut forest = Forest::new(n);
    let mut labels = vec![NOISE_CLUSTER; n];
    let mut next_cluster: i32 = 0;
    for &(_, a, b) in &edges {
        let ra = forest.find(a);
        let rb = forest.find(b);
        if ra == rb {
            continue;
        }
        let true_merge =
            forest.size(ra) >= params.min_cluster_size && forest.size(rb) >= params.min_cluster_size;
        if true_merge {
            for side in [ra, rb] {
                if !forest.has_cluster(side) {
                    for &p in forest.members(side) {
                        labels[p] = next_cluster;
                    }
                    next_cluster += 1;
                }
            }
        }
        forest.union(ra, rb, true_merge);
    }

    let clustered = labels.iter().filter(|&&l| l != NOISE_CLUSTER).count();
    info!(
        "Clustering completed - points={}, clusters={}, noise={}",
        n,
        next_cluster,
        n - clustered
    );
    labels
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Union-find over point indices carrying component member lists and a
/// "already holds a selected cluster" flag.
struct Forest {
    parent: Vec<usize>,
    members: Vec<Vec<usize>>,
    has_cluster: Vec<bool>,
}

impl Forest {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            members: (0..n).map(|i| vec![i]).collect(),
            has_cluster: vec![false; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn size(&self, root: usize) -> usize {
        self.members[root].len()
    }

    fn members(&self, root: usize) -> &[usize] {
        &self.members[root]
    }

    fn has_cluster(&self, root: usize) -> bool {
        self.has_cluster[root]
    }

    fn union(&mut self, ra: usize, rb: usize, merged_has_cluster: bool) {
        let (big, small) = if self.members[ra].len() >= self.members[rb].len() {
            (ra, rb)
        } else {
            (rb, ra)
        };
        let moved = std::mem::take(&mut self.members[small]);
        self.members[big].extend(moved);
        self.parent[small] = big;
        self.has_cluster[big] =
            merged_has_cluster || self.has_cluster[big] || self.has_cluster[small];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: ClusterParams = ClusterParams {
        min_cluster_size: 2,
        min_samples: 2,
    };

    fn point(x: f64, y: f64) -> Vec<f64> {
        vec![x, y]
    }

    #[test]
    fn empty_input_yields_empty_labels() {
        assert!(cluster_vectors(&[], PARAMS).is_empty());
    }

    #[test]
    fn single_point_is_noise() {
        let labels = cluster_vectors(&[point(1.0, 1.0)], PARAMS);
        assert_eq!(labels, vec![-1]);
    }

    #[test]
    fn two_well_separated_pairs_form_two_clusters() {
        let vectors = vec![
            point(0.0, 0.0),
            point(0.1, 0.0),
            point(10.0, 10.0),
            point(10.1, 10.0),
        ];
        let labels = cluster_vectors(&vectors, PARAMS);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert!(labels.iter().all(|&l| l >= 0));
    }

    #[test]
    fn single_blob_degenerates_to_all_noise() {
        // One dense component never experiences a true split, so leaf
        // selection returns nothing.
        let vectors = vec![point(0.0, 0.0), point(0.1, 0.0), point(0.0, 0.1)];
        let labels = cluster_vectors(&vectors, PARAMS);
        assert!(labels.iter().all(|&l| l == -1));
    }

    #[test]
    fn outlier_joins_noise_not_a_cluster() {
        let vectors = vec![
            point(0.0, 0.0),
            point(0.1, 0.0),
            point(0.0, 0.1),
            point(5.0, 5.0),
            point(5.1, 5.0),
            point(5.0, 5.1),
            point(100.0, 100.0),
        ];
        let labels = cluster_vectors(&vectors, PARAMS);
        assert_eq!(labels[6], -1);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[3], labels[4]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn deterministic_across_runs() {
        let vectors = vec![
            point(0.0, 0.0),
            point(0.2, 0.1),
            point(4.0, 4.0),
            point(4.1, 4.2),
            point(8.0, 0.0),
            point(8.2, 0.1),
        ];
        let a = cluster_vectors(&vectors, PARAMS);
        let b = cluster_vectors(&vectors, PARAMS);
        assert_eq!(a, b);
    }

    #[test]
    fn min_cluster_size_above_input_means_all_noise() {
        let vectors = vec![point(0.0, 0.0), point(0.1, 0.0)];
        let labels = cluster_vectors(
            &vectors,
            ClusterParams {
                min_cluster_size: 3,
                min_samples: 2,
            },
        );
        assert_eq!(labels, vec![-1, -1]);
    }
}
