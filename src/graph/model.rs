//! In-memory graph construction and storage
//!
//! A `Graph` is built once per ingestion event from an ordered record
//! sequence and is immutable thereafter. A new ingestion discards the old
//! graph entirely; there is no diffing or merging.

use super::edge::Edge;
use super::node::Node;
use super::types::{EdgeIdx, NodeId, Record};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by graph queries and analyzers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A query referenced a node id absent from the graph
    #[error("node '{0}' not found in the graph")]
    NodeNotFound(NodeId),

    /// The target is unreachable from the source
    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: NodeId, to: NodeId },

    /// An analyzer was invoked before any graph was constructed
    #[error("no graph has been constructed yet")]
    GraphNotReady,

    /// A default traversal start was requested on a graph with no nodes
    #[error("graph has no nodes to traverse")]
    EmptyGraph,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// A skipped ingestion record: missing or empty value for a required field.
///
/// Never fatal; construction continues and the full list is reported.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("record {row}: missing value for field '{field}'")]
pub struct ValidationError {
    /// Zero-based position of the record in the ingested sequence
    pub row: usize,
    /// The field that was missing or empty
    pub field: String,
}

/// In-memory directed graph with an undirected adjacency index.
///
/// - `nodes` preserves first-seen order across both record fields; the
///   first entry is the default traversal start.
/// - `edges` is in construction order and is what `EdgeIdx` indexes into.
/// - `adjacency` lists each node's (neighbor, edge) pairs in edge-insertion
///   order. Every edge appears in both endpoints' lists; a self-loop
///   appears exactly once, so degree(n) counts it once.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    adjacency: FxHashMap<NodeId, Vec<(NodeId, EdgeIdx)>>,
}

impl Graph {
    /// Build a graph from tabular records.
    ///
    /// Each record must carry a non-empty value for both `source_field` and
    /// `target_field`; records that do not are skipped and reported as
    /// `ValidationError`s. Construction always succeeds, producing an empty
    /// graph when no record is valid.
    pub fn construct(
        records: &[Record],
        source_field: &str,
        target_field: &str,
    ) -> (Graph, Vec<ValidationError>) {
        Self::construct_with_nodes(records, source_field, target_field, &[])
    }

    /// Build a graph from tabular records plus explicit isolated nodes.
    ///
    /// `isolated` entries are (id, label) pairs appended after the
    /// record-derived nodes; an empty label falls back to the id, an empty
    /// id is ignored, and an id already interned from the records keeps its
    /// record-derived entry (and its position).
    pub fn construct_with_nodes(
        records: &[Record],
        source_field: &str,
        target_field: &str,
        isolated: &[(String, String)],
    ) -> (Graph, Vec<ValidationError>) {
        let mut graph = Graph::default();
        let mut skipped = Vec::new();

        for (row, record) in records.iter().enumerate() {
            let source = record.get(source_field).map(String::as_str).unwrap_or("");
            let target = record.get(target_field).map(String::as_str).unwrap_or("");

            if source.is_empty() {
                skipped.push(ValidationError {
                    row,
                    field: source_field.to_string(),
                });
                continue;
            }
            if target.is_empty() {
                skipped.push(ValidationError {
                    row,
                    field: target_field.to_string(),
                });
                continue;
            }

            let source = NodeId::new(source);
            let target = NodeId::new(target);
            graph.intern_node(&source);
            graph.intern_node(&target);
            graph.push_edge(source, target);
        }

        for (id, label) in isolated {
            if id.is_empty() {
                continue;
            }
            let label = if label.is_empty() { id } else { label };
            graph.intern_labeled(NodeId::new(id), label);
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            skipped = skipped.len(),
            "graph constructed"
        );
        if !skipped.is_empty() {
            debug!(?skipped, "records skipped during construction");
        }

        (graph, skipped)
    }

    /// Insert the node if unseen, preserving first-seen order.
    fn intern_node(&mut self, id: &NodeId) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(id.clone(), Node::new(id.clone()));
            self.adjacency.insert(id.clone(), Vec::new());
        }
    }

    /// Insert an explicitly labeled node if unseen.
    fn intern_labeled(&mut self, id: NodeId, label: &str) {
        if !self.nodes.contains_key(&id) {
            self.adjacency.insert(id.clone(), Vec::new());
            self.nodes.insert(id.clone(), Node::with_label(id, label));
        }
    }

    /// Append an edge and index it on both endpoints (once for a self-loop).
    fn push_edge(&mut self, source: NodeId, target: NodeId) {
        let idx = EdgeIdx::new(self.edges.len());
        let self_loop = source == target;

        self.adjacency
            .entry(source.clone())
            .or_default()
            .push((target.clone(), idx));
        if !self_loop {
            self.adjacency
                .entry(target.clone())
                .or_default()
                .push((source.clone(), idx));
        }

        self.edges.push(Edge::new(idx, source, target));
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in construction order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, idx: EdgeIdx) -> Option<&Edge> {
        self.edges.get(idx.as_usize())
    }

    /// The first-seen node, used as the default traversal start.
    pub fn first_node(&self) -> Option<&NodeId> {
        self.nodes.keys().next()
    }

    /// (neighbor, edge) pairs in edge-insertion order, both directions.
    /// Empty slice for an unknown id.
    pub fn neighbors(&self, id: &NodeId) -> &[(NodeId, EdgeIdx)] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct incident edges; a self-loop counts once.
    pub fn degree(&self, id: &NodeId) -> usize {
        self.neighbors(id).len()
    }
}
