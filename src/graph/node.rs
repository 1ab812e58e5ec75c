//! Node implementation

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// A node in the graph.
///
/// Nodes carry:
/// - A unique string id taken from the ingested records
/// - A display label (same as the id unless an importer supplies one)
/// - A betweenness centrality score, written by the centrality analyzer
///   and consumed by rendering to scale visual size/opacity
///
/// Degree is derived from the adjacency index, not stored here. Highlight
/// tags live in the `HighlightStore`, not on the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Display label
    pub label: String,

    /// Normalized betweenness centrality in [0, 1], 0.0 until computed
    pub centrality: f64,
}

impl Node {
    /// Create a new node whose label defaults to its id.
    pub fn new(id: impl Into<NodeId>) -> Self {
        let id = id.into();
        let label = id.as_str().to_string();
        Node {
            id,
            label,
            centrality: 0.0,
        }
    }

    /// Create a new node with an explicit label.
    pub fn with_label(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            centrality: 0.0,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
