//! Namespaced highlight/tag state shared between analyzers and rendering
//!
//! Each analyzer owns exactly one namespace and clears only that namespace
//! when re-invoked. Cross-namespace independence is an invariant: running
//! the frequency clusterer must never disturb `hub` tags, and so on. The
//! rendering collaborator reads tags per element; it never writes.

use crate::graph::{EdgeIdx, NodeId};
use rustc_hash::FxHashSet;

/// Tag namespaces, one per analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Owned by the traversal engine: `visited` nodes and
    /// `traversal-highlighted` discovery edges
    Traversal,
    /// Owned by the hub detector: `hub` nodes
    Hub,
    /// Owned by the frequency clusterer: `high-frequency` nodes
    Frequency,
    /// Owned by the path finder: `path-highlighted` nodes and edges
    Path,
}

impl Namespace {
    pub(crate) const ALL: [Namespace; 4] = [
        Namespace::Traversal,
        Namespace::Hub,
        Namespace::Frequency,
        Namespace::Path,
    ];

    fn index(self) -> usize {
        match self {
            Namespace::Traversal => 0,
            Namespace::Hub => 1,
            Namespace::Frequency => 2,
            Namespace::Path => 3,
        }
    }

    /// Tag name applied to nodes in this namespace.
    pub fn node_tag(self) -> &'static str {
        match self {
            Namespace::Traversal => "visited",
            Namespace::Hub => "hub",
            Namespace::Frequency => "high-frequency",
            Namespace::Path => "path-highlighted",
        }
    }

    /// Tag name applied to edges, for the namespaces that tag edges.
    pub fn edge_tag(self) -> Option<&'static str> {
        match self {
            Namespace::Traversal => Some("traversal-highlighted"),
            Namespace::Path => Some("path-highlighted"),
            Namespace::Hub | Namespace::Frequency => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct TagSet {
    nodes: FxHashSet<NodeId>,
    edges: FxHashSet<EdgeIdx>,
}

/// The shared tag store, keyed by node id / edge index per namespace.
#[derive(Debug, Default, Clone)]
pub struct HighlightStore {
    namespaces: [TagSet; 4],
}

impl HighlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear one namespace, leaving all others untouched.
    pub fn clear(&mut self, ns: Namespace) {
        let set = &mut self.namespaces[ns.index()];
        set.nodes.clear();
        set.edges.clear();
    }

    /// Clear every namespace. Only the graph rebuild path uses this.
    pub fn clear_all(&mut self) {
        for ns in Namespace::ALL {
            self.clear(ns);
        }
    }

    pub fn tag_node(&mut self, ns: Namespace, id: NodeId) {
        self.namespaces[ns.index()].nodes.insert(id);
    }

    pub fn tag_edge(&mut self, ns: Namespace, idx: EdgeIdx) {
        self.namespaces[ns.index()].edges.insert(idx);
    }

    pub fn node_has(&self, ns: Namespace, id: &NodeId) -> bool {
        self.namespaces[ns.index()].nodes.contains(id)
    }

    pub fn edge_has(&self, ns: Namespace, idx: EdgeIdx) -> bool {
        self.namespaces[ns.index()].edges.contains(&idx)
    }

    /// Number of nodes tagged in a namespace.
    pub fn node_tag_count(&self, ns: Namespace) -> usize {
        self.namespaces[ns.index()].nodes.len()
    }

    /// Number of edges tagged in a namespace.
    pub fn edge_tag_count(&self, ns: Namespace) -> usize {
        self.namespaces[ns.index()].edges.len()
    }

    /// Tag names currently applied to a node, for rendering.
    pub fn node_tags(&self, id: &NodeId) -> Vec<&'static str> {
        Namespace::ALL
            .into_iter()
            .filter(|ns| self.node_has(*ns, id))
            .map(Namespace::node_tag)
            .collect()
    }

    /// Tag names currently applied to an edge, for rendering.
    pub fn edge_tags(&self, idx: EdgeIdx) -> Vec<&'static str> {
        Namespace::ALL
            .into_iter()
            .filter(|ns| self.edge_has(*ns, idx))
            .filter_map(Namespace::edge_tag)
            .collect()
    }
}
