//! Hub ("TAP") detection
//!
//! A node is a hub iff its degree strictly exceeds a threshold. Degree
//! counts distinct incident edges once per edge regardless of direction;
//! a self-loop contributes exactly 1 because source and target coincide.

use crate::graph::{Graph, NodeId};
use crate::highlight::{HighlightStore, Namespace};
use std::collections::BTreeSet;
use tracing::info;

/// Degree threshold the original visualization uses for TAP nodes.
pub const DEFAULT_HUB_THRESHOLD: usize = 2;

/// Classify hub nodes and retag the `hub` namespace.
///
/// Clears previously-owned `hub` tags first, then applies the new set, so
/// repeated invocations on an unchanged graph are idempotent and carry no
/// dependence on prior calls. Only the `hub` namespace is touched.
pub fn detect_hubs(
    graph: &Graph,
    store: &mut HighlightStore,
    threshold: usize,
) -> BTreeSet<NodeId> {
    let hubs: BTreeSet<NodeId> = graph
        .nodes()
        .filter(|node| graph.degree(&node.id) > threshold)
        .map(|node| node.id.clone())
        .collect();

    store.clear(Namespace::Hub);
    for id in &hubs {
        store.tag_node(Namespace::Hub, id.clone());
    }

    info!(threshold, hubs = hubs.len(), "hub detection complete");
    hubs
}
