//! Session facade: graph lifecycle, analyzer entry points, render snapshots
//!
//! A `GraphSession` owns at most one graph at a time. Ingestion replaces
//! the previous graph and its entire highlight state (no diffing, no
//! merging) and invalidates any in-flight traversal. Every analyzer entry
//! point fails fast with `GraphNotReady` before the first ingestion.

use crate::algo::{
    centrality, frequency, hubs, pathfinding, traversal::TraversalEngine, Path, TraversalMode,
    TraversalRun, TraversalStep, DEFAULT_HUB_THRESHOLD, DEFAULT_STEP_DELAY,
};
use crate::graph::{Graph, GraphError, GraphResult, NodeId, Record, ValidationError};
use crate::highlight::HighlightStore;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

/// Outcome of one ingestion event. Skipped records are reported, never
/// fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub skipped: Vec<ValidationError>,
}

/// Read-only view of one node for the rendering collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub label: String,
    pub degree: usize,
    pub centrality: f64,
    pub tags: Vec<&'static str>,
}

/// Read-only view of one edge for the rendering collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeView {
    pub source: NodeId,
    pub target: NodeId,
    pub tags: Vec<&'static str>,
}

/// Snapshot of graph and highlight state at a mutation boundary. The
/// renderer re-renders from one of these after each traversal step and
/// after each full analyzer call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

/// Owner of the graph, the shared highlight store, and the traversal
/// engine.
pub struct GraphSession {
    graph: Option<Graph>,
    store: Arc<Mutex<HighlightStore>>,
    engine: TraversalEngine,
}

impl GraphSession {
    pub fn new() -> Self {
        Self::with_step_delay(DEFAULT_STEP_DELAY)
    }

    /// Create a session with a custom traversal animation delay.
    pub fn with_step_delay(step_delay: Duration) -> Self {
        let store = Arc::new(Mutex::new(HighlightStore::new()));
        let engine = TraversalEngine::with_step_delay(Arc::clone(&store), step_delay);
        GraphSession {
            graph: None,
            store,
            engine,
        }
    }

    /// Build a new graph from records, discarding the previous graph, all
    /// highlight state, and any in-flight traversal.
    pub fn ingest(
        &mut self,
        records: &[Record],
        source_field: &str,
        target_field: &str,
    ) -> IngestReport {
        let (graph, skipped) = Graph::construct(records, source_field, target_field);
        self.install(graph, skipped)
    }

    /// Ingest an interchange document produced by [`crate::io::to_csv`]
    /// (or a legacy untagged two-column export). Tagged `node` rows become
    /// isolated nodes, which plain record ingestion cannot express.
    pub fn import_csv(&mut self, text: &str) -> IngestReport {
        let parsed = crate::io::parse_csv(text);
        let (graph, skipped) = Graph::construct_with_nodes(
            &parsed.records,
            crate::io::SOURCE_FIELD,
            crate::io::TARGET_FIELD,
            &parsed.isolated,
        );
        self.install(graph, skipped)
    }

    /// Swap in a freshly constructed graph. Invalidation must precede the
    /// highlight clear so a traversal step blocked on the store lock sees
    /// the bumped token and cannot tag the cleared store.
    fn install(&mut self, graph: Graph, skipped: Vec<ValidationError>) -> IngestReport {
        let report = IngestReport {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            skipped,
        };

        self.engine.invalidate();
        self.store.lock().unwrap().clear_all();
        self.graph = Some(graph);

        info!(
            nodes = report.node_count,
            edges = report.edge_count,
            skipped = report.skipped.len(),
            "session graph replaced"
        );
        report
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// Shared handle to the highlight store, for the rendering collaborator.
    pub fn highlight_store(&self) -> Arc<Mutex<HighlightStore>> {
        Arc::clone(&self.store)
    }

    fn require_graph(&self) -> GraphResult<&Graph> {
        self.graph.as_ref().ok_or(GraphError::GraphNotReady)
    }

    /// Start an animated traversal. With `start == None` the first-seen
    /// node of the ingested records is used. Must be called within a tokio
    /// runtime.
    pub fn traverse<F>(
        &self,
        mode: TraversalMode,
        start: Option<&NodeId>,
        on_step: F,
    ) -> GraphResult<TraversalRun>
    where
        F: Fn(&TraversalStep) + Send + 'static,
    {
        let graph = self.require_graph()?;
        let start = match start {
            Some(id) => id.clone(),
            None => graph.first_node().cloned().ok_or(GraphError::EmptyGraph)?,
        };
        self.engine.traverse(graph, &start, mode, on_step)
    }

    /// Detect hub nodes; `threshold == None` uses the default of 2.
    pub fn detect_hubs(&self, threshold: Option<usize>) -> GraphResult<BTreeSet<NodeId>> {
        let graph = self.require_graph()?;
        let mut store = self.store.lock().unwrap();
        Ok(hubs::detect_hubs(
            graph,
            &mut store,
            threshold.unwrap_or(DEFAULT_HUB_THRESHOLD),
        ))
    }

    /// Classify high-frequency nodes.
    pub fn cluster_by_frequency(&self) -> GraphResult<BTreeSet<NodeId>> {
        let graph = self.require_graph()?;
        let mut store = self.store.lock().unwrap();
        Ok(frequency::cluster_by_frequency(graph, &mut store))
    }

    /// Compute betweenness centrality onto the nodes.
    pub fn compute_centrality(&mut self) -> GraphResult<HashMap<NodeId, f64>> {
        let graph = self.graph.as_mut().ok_or(GraphError::GraphNotReady)?;
        Ok(centrality::compute_centrality(graph))
    }

    /// Shortest path between two nodes, retagging `path-highlighted` on
    /// success.
    pub fn shortest_path(&self, from: &NodeId, to: &NodeId) -> GraphResult<Path> {
        let graph = self.require_graph()?;
        let mut store = self.store.lock().unwrap();
        pathfinding::shortest_path(graph, &mut store, from, to)
    }

    /// Read-only snapshot of graph and tag state for rendering. Empty
    /// before the first ingestion.
    pub fn snapshot(&self) -> Snapshot {
        let Some(graph) = self.graph.as_ref() else {
            return Snapshot::default();
        };
        let store = self.store.lock().unwrap();

        let nodes = graph
            .nodes()
            .map(|node| NodeView {
                id: node.id.clone(),
                label: node.label.clone(),
                degree: graph.degree(&node.id),
                centrality: node.centrality,
                tags: store.node_tags(&node.id),
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|edge| EdgeView {
                source: edge.source.clone(),
                target: edge.target.clone(),
                tags: store.edge_tags(edge.idx),
            })
            .collect();

        Snapshot { nodes, edges }
    }
}

impl Default for GraphSession {
    fn default() -> Self {
        Self::new()
    }
}
