//! PageRank computation over call-graph edges.

use indexmap::IndexMap;

use crate::indexer::callgraph::CallGraphIndex;

/// Iteration cap in case `epsilon` is unreachably small.
const MAX_ITERATIONS: usize = 200;

/// Score every known method, keyed in first-seen order.
///
/// Parallel edges between the same pair of methods count once. Mass held by
/// methods without callees is spread evenly over all methods each round.
pub fn compute_pagerank(index: &CallGraphIndex, damping: f64, epsilon: f64) -> IndexMap<String, f64> {
    let node_count = index.method_count();
    if node_count == 0 {
        return IndexMap::new();
    }

    let adjacency: Vec<Vec<usize>> = (0..node_count)
        .map(|id| index.callee_ids(id).collect())
        .collect();

    let n = node_count as f64;
    let mut scores = vec![1.0 / n; node_count];

    for _ in 0..MAX_ITERATIONS {
        let dangling_mass: f64 = adjacency
            .iter()
            .enumerate()
            .filter(|(_, targets)| targets.is_empty())
            .map(|(id, _)| scores[id])
            .sum();
        let base = (1.0 - damping) / n + damping * dangling_mass / n;
        let mut next_scores = vec![base; node_count];

        for (source, targets) in adjacency.iter().enumerate() {
            if targets.is_empty() {
                continue;
            }
            let share = damping * scores[source] / targets.len() as f64;
            for &target in targets {
                next_scores[target] += share;
            }
        }

        let delta: f64 = next_scores
            .iter()
            .zip(&scores)
            .map(|(next, prev)| (next - prev).abs())
            .sum();
        scores = next_scores;
        if delta <= epsilon {
            break;
        }
    }

    scores
        .into_iter()
        .enumerate()
        .map(|(id, score)| (index.name_of(id).to_string(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CallEdge, CallSite};

    fn index(pairs: &[(&str, &str)]) -> CallGraphIndex {
        CallGraphIndex::build(pairs.iter().enumerate().map(|(i, (a, b))| {
            CallEdge::new(*a, *b, CallSite::new("x.cs", i as u32 + 1))
        }))
    }

    #[test]
    fn test_empty_index() {
        let scores = compute_pagerank(&CallGraphIndex::default(), 0.85, 1e-6);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_scores_sum_to_one() {
        let scores = compute_pagerank(&index(&[("A", "B"), ("B", "C"), ("A", "C")]), 0.85, 1e-9);
        let total: f64 = scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6, "total was {total}");
    }

    #[test]
    fn test_heavily_called_method_ranks_highest() {
        let scores = compute_pagerank(
            &index(&[("A", "Hub"), ("B", "Hub"), ("C", "Hub"), ("Hub", "Leaf")]),
            0.85,
            1e-9,
        );
        assert!(scores["Hub"] > scores["A"]);
        assert!(scores["Hub"] > scores["B"]);
        assert_eq!(scores.keys().next().map(String::as_str), Some("A"));
    }

    #[test]
    fn test_parallel_edges_count_once() {
        let single = compute_pagerank(&index(&[("A", "B"), ("A", "C")]), 0.85, 1e-9);
        let doubled = compute_pagerank(&index(&[("A", "B"), ("A", "B"), ("A", "C")]), 0.85, 1e-9);
        assert!((single["B"] - doubled["B"]).abs() < 1e-12);
    }
}
