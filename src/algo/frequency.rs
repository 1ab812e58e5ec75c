//! Incidence-frequency clustering
//!
//! frequency(n) counts edge endpoints: the number of edges with n as
//! source plus the number with n as target, so a self-loop contributes 2.
//! The threshold is half the maximum frequency over all nodes, and a node
//! qualifies only by strictly exceeding it; ties at the threshold are
//! excluded.

use crate::graph::{Graph, NodeId};
use crate::highlight::{HighlightStore, Namespace};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::info;

/// Classify high-frequency nodes and retag the `high-frequency` namespace.
///
/// Fully recomputed on every call; clears and reapplies only its own
/// namespace. With no edges every frequency is 0 and nothing qualifies.
pub fn cluster_by_frequency(graph: &Graph, store: &mut HighlightStore) -> BTreeSet<NodeId> {
    let mut frequencies: FxHashMap<&NodeId, usize> = FxHashMap::default();
    for edge in graph.edges() {
        *frequencies.entry(&edge.source).or_insert(0) += 1;
        *frequencies.entry(&edge.target).or_insert(0) += 1;
    }

    let max = frequencies.values().copied().max().unwrap_or(0);
    let threshold = max as f64 / 2.0;

    let clustered: BTreeSet<NodeId> = graph
        .nodes()
        .filter(|node| {
            let freq = frequencies.get(&node.id).copied().unwrap_or(0);
            freq as f64 > threshold
        })
        .map(|node| node.id.clone())
        .collect();

    store.clear(Namespace::Frequency);
    for id in &clustered {
        store.tag_node(Namespace::Frequency, id.clone());
    }

    info!(
        threshold,
        clustered = clustered.len(),
        "frequency clustering complete"
    );
    clustered
}
