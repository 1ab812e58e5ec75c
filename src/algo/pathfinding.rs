//! Unweighted shortest path with highlight emission
//!
//! Every edge has uniform weight 1, so the search is a plain BFS over the
//! undirected adjacency index. When multiple shortest paths exist, the
//! result is whichever the search discovers first under its fixed
//! traversal order (adjacency order per node); that tie-break is not
//! user-selectable.

use crate::graph::{EdgeIdx, Graph, GraphError, GraphResult, NodeId};
use crate::highlight::{HighlightStore, Namespace};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::info;

/// One element of a reconstructed path.
///
/// The sequence always alternates Node, Edge, Node, ..., Node.
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    Node(NodeId),
    Edge(EdgeIdx),
}

/// A shortest path between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub elements: Vec<PathElement>,
}

impl Path {
    /// Number of edges in the path; 0 for the single-node path.
    pub fn distance(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PathElement::Edge(_)))
            .count()
    }

    /// The node ids along the path, in order.
    pub fn nodes(&self) -> Vec<&NodeId> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                PathElement::Node(id) => Some(id),
                PathElement::Edge(_) => None,
            })
            .collect()
    }
}

/// Find a shortest path from `from` to `to` and retag `path-highlighted`.
///
/// Atomic per invocation: either endpoint missing fails with
/// `NodeNotFound`, an unreachable target fails with `NoPath`, and both
/// leave the highlight store exactly as it was. On success the namespace
/// is cleared and every node and edge on the returned path is tagged.
/// `from == to` is a distance-0 single-node path, not an error.
pub fn shortest_path(
    graph: &Graph,
    store: &mut HighlightStore,
    from: &NodeId,
    to: &NodeId,
) -> GraphResult<Path> {
    if !graph.contains(from) {
        return Err(GraphError::NodeNotFound(from.clone()));
    }
    if !graph.contains(to) {
        return Err(GraphError::NodeNotFound(to.clone()));
    }

    let path = search(graph, from, to).ok_or_else(|| GraphError::NoPath {
        from: from.clone(),
        to: to.clone(),
    })?;

    store.clear(Namespace::Path);
    for element in &path.elements {
        match element {
            PathElement::Node(id) => store.tag_node(Namespace::Path, id.clone()),
            PathElement::Edge(idx) => store.tag_edge(Namespace::Path, *idx),
        }
    }

    info!(from = %from, to = %to, distance = path.distance(), "shortest path found");
    Ok(path)
}

/// BFS with parent links; `None` when `to` is unreachable.
fn search(graph: &Graph, from: &NodeId, to: &NodeId) -> Option<Path> {
    if from == to {
        return Some(Path {
            elements: vec![PathElement::Node(from.clone())],
        });
    }

    let mut parent: FxHashMap<NodeId, (NodeId, EdgeIdx)> = FxHashMap::default();
    let mut queue = VecDeque::new();
    queue.push_back(from.clone());

    'outer: while let Some(node) = queue.pop_front() {
        for (neighbor, edge) in graph.neighbors(&node) {
            if neighbor == from || parent.contains_key(neighbor) {
                continue;
            }
            parent.insert(neighbor.clone(), (node.clone(), *edge));
            if neighbor == to {
                break 'outer;
            }
            queue.push_back(neighbor.clone());
        }
    }

    parent.contains_key(to).then(|| {
        let mut elements = vec![PathElement::Node(to.clone())];
        let mut current = to;
        while let Some((prev, edge)) = parent.get(current) {
            elements.push(PathElement::Edge(*edge));
            elements.push(PathElement::Node(prev.clone()));
            current = prev;
        }
        elements.reverse();
        Path { elements }
    })
}
