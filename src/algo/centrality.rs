//! Betweenness centrality (Brandes' algorithm)
//!
//! Edges are treated as undirected and unweighted. The score of a node is
//! the number of all-pairs shortest paths passing through it (endpoints
//! excluded), normalized into [0, 1] with the standard undirected factor
//! 2/((n-1)(n-2)). Parallel edges count as distinct shortest paths;
//! self-loops never lie on a shortest path and are ignored.

use crate::graph::{Graph, NodeId};
use rustc_hash::FxHashMap;
use std::collections::{HashMap, VecDeque};
use tracing::info;

/// Compute normalized betweenness centrality for every node.
///
/// The result is written onto each node's `centrality` attribute (a
/// scalar, not a tag) and also returned. Isolated nodes and nodes in
/// singleton components score 0, as does everything when n < 3.
/// Deterministic for a fixed graph.
pub fn compute_centrality(graph: &mut Graph) -> HashMap<NodeId, f64> {
    let n = graph.node_count();

    // Dense integer indexing in first-seen node order.
    let index_to_node: Vec<NodeId> = graph.nodes().map(|node| node.id.clone()).collect();
    let mut node_to_index: FxHashMap<&NodeId, usize> = FxHashMap::default();
    for (idx, id) in index_to_node.iter().enumerate() {
        node_to_index.insert(id, idx);
    }

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (idx, id) in index_to_node.iter().enumerate() {
        for (neighbor, _) in graph.neighbors(id) {
            if neighbor != id {
                adjacency[idx].push(node_to_index[neighbor]);
            }
        }
    }

    let mut accumulated = vec![0.0_f64; n];

    if n >= 3 {
        for s in 0..n {
            // Forward phase: BFS counting shortest paths (sigma).
            let mut stack = Vec::with_capacity(n);
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut sigma = vec![0.0_f64; n];
            let mut dist = vec![-1_i64; n];
            let mut queue = VecDeque::new();

            sigma[s] = 1.0;
            dist[s] = 0;
            queue.push_back(s);

            while let Some(v) = queue.pop_front() {
                stack.push(v);
                for &w in &adjacency[v] {
                    if dist[w] < 0 {
                        dist[w] = dist[v] + 1;
                        queue.push_back(w);
                    }
                    if dist[w] == dist[v] + 1 {
                        sigma[w] += sigma[v];
                        predecessors[w].push(v);
                    }
                }
            }

            // Backward phase: accumulate dependencies.
            let mut delta = vec![0.0_f64; n];
            while let Some(w) = stack.pop() {
                for &v in &predecessors[w] {
                    delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
                }
                if w != s {
                    accumulated[w] += delta[w];
                }
            }
        }
    }

    // Each unordered pair was counted from both endpoints; halve, then
    // normalize by (n-1)(n-2)/2 pairs per node.
    let scale = if n >= 3 {
        1.0 / ((n - 1) as f64 * (n - 2) as f64)
    } else {
        0.0
    };

    let mut result = HashMap::with_capacity(n);
    for (idx, id) in index_to_node.iter().enumerate() {
        let score = accumulated[idx] * scale;
        if let Some(node) = graph.node_mut(id) {
            node.centrality = score;
        }
        result.insert(id.clone(), score);
    }

    info!(nodes = n, "betweenness centrality computed");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::tests::graph_from_pairs;

    fn score(result: &HashMap<NodeId, f64>, id: &str) -> f64 {
        *result.get(&NodeId::new(id)).unwrap()
    }

    #[test]
    fn test_path_graph_middle_node() {
        let mut graph = graph_from_pairs(&[("a", "b"), ("b", "c")]);
        let result = compute_centrality(&mut graph);

        assert_eq!(score(&result, "b"), 1.0);
        assert_eq!(score(&result, "a"), 0.0);
        assert_eq!(score(&result, "c"), 0.0);
        // Written onto the node attribute as well.
        assert_eq!(graph.node(&NodeId::new("b")).unwrap().centrality, 1.0);
    }

    #[test]
    fn test_star_center_is_one() {
        let mut graph = graph_from_pairs(&[("x", "l1"), ("x", "l2"), ("x", "l3"), ("x", "l4")]);
        let result = compute_centrality(&mut graph);

        assert_eq!(score(&result, "x"), 1.0);
        for leaf in ["l1", "l2", "l3", "l4"] {
            assert_eq!(score(&result, leaf), 0.0);
        }
    }

    #[test]
    fn test_chain_of_four() {
        let mut graph = graph_from_pairs(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let result = compute_centrality(&mut graph);

        // b carries pairs (a,c) and (a,d): 2 of the 3 pairs not ending
        // at b, normalized by (n-1)(n-2)/2 = 3.
        assert!((score(&result, "b") - 2.0 / 3.0).abs() < 1e-9);
        assert!((score(&result, "c") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(score(&result, "a"), 0.0);
    }

    #[test]
    fn test_small_graphs_are_zero() {
        let mut graph = graph_from_pairs(&[("a", "b")]);
        let result = compute_centrality(&mut graph);
        assert_eq!(score(&result, "a"), 0.0);
        assert_eq!(score(&result, "b"), 0.0);
    }

    #[test]
    fn test_singleton_component_scores_zero() {
        // z only has a self-loop: a singleton component.
        let mut graph = graph_from_pairs(&[("a", "b"), ("b", "c"), ("z", "z")]);
        let result = compute_centrality(&mut graph);
        assert_eq!(score(&result, "z"), 0.0);
        assert!(score(&result, "b") > 0.0);
    }

    #[test]
    fn test_deterministic() {
        let pairs = [("a", "b"), ("b", "c"), ("c", "d"), ("b", "d"), ("d", "e")];
        let mut g1 = graph_from_pairs(&pairs);
        let mut g2 = graph_from_pairs(&pairs);
        assert_eq!(compute_centrality(&mut g1), compute_centrality(&mut g2));
    }

    #[test]
    fn test_scores_in_unit_interval() {
        let mut graph = graph_from_pairs(&[
            ("a", "b"),
            ("b", "c"),
            ("c", "a"),
            ("c", "d"),
            ("d", "e"),
            ("e", "f"),
            ("f", "d"),
        ]);
        for (_, score) in compute_centrality(&mut graph) {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
