//! Edge implementation

use super::types::{EdgeIdx, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the graph.
///
/// Self-loops and parallel edges between the same pair of nodes are
/// permitted and never deduplicated. Direction is preserved for export;
/// the traversal and analytics layers treat edges as undirected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Position of this edge in the construction-ordered edge list
    pub idx: EdgeIdx,

    /// Source node id
    pub source: NodeId,

    /// Target node id
    pub target: NodeId,
}

impl Edge {
    pub fn new(idx: EdgeIdx, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Edge {
            idx,
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether source and target coincide.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Eq for Edge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new(EdgeIdx::new(0), "a", "b");
        assert_eq!(edge.source, NodeId::new("a"));
        assert_eq!(edge.target, NodeId::new("b"));
        assert!(!edge.is_self_loop());
    }

    #[test]
    fn test_self_loop() {
        let edge = Edge::new(EdgeIdx::new(3), "x", "x");
        assert!(edge.is_self_loop());
    }
}
