//! Callgraph Engine
//!
//! In-memory directed graph built from tabular source→target records,
//! with traversal and analytic queries over it: animated breadth/depth
//! first traversal, hub ("TAP") detection, incidence-frequency
//! clustering, normalized betweenness centrality, and unweighted shortest
//! paths.
//!
//! # Architecture
//!
//! - [`graph`] — the immutable graph model and its construction from
//!   ingested records
//! - [`highlight`] — namespaced highlight tags, written by analyzers and
//!   read by a rendering collaborator
//! - [`algo`] — the five analyzers; the traversal engine applies its
//!   steps over time under a generation-token cancellation guard
//! - [`session`] — facade owning the graph lifecycle and producing
//!   render snapshots
//! - [`io`] — two-column text interchange for export/import collaborators
//!
//! Rendering, file selection, routing, and styling are external
//! collaborators: they feed records in and consume snapshots out.
//!
//! # Example
//!
//! ```rust
//! use callgraph_engine::graph::{Graph, Record};
//! use callgraph_engine::highlight::HighlightStore;
//! use callgraph_engine::algo::detect_hubs;
//!
//! let records: Vec<Record> = [("main", "parse"), ("main", "run"), ("main", "log")]
//!     .iter()
//!     .map(|(s, t)| {
//!         let mut r = Record::new();
//!         r.insert("caller".into(), s.to_string());
//!         r.insert("callee".into(), t.to_string());
//!         r
//!     })
//!     .collect();
//!
//! let (graph, skipped) = Graph::construct(&records, "caller", "callee");
//! assert!(skipped.is_empty());
//! assert_eq!(graph.node_count(), 4);
//!
//! let mut store = HighlightStore::new();
//! let hubs = detect_hubs(&graph, &mut store, 2);
//! assert_eq!(hubs.len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod highlight;
pub mod io;
pub mod session;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeIdx, Graph, GraphError, GraphResult, Node, NodeId, Record, ValidationError,
};

pub use highlight::{HighlightStore, Namespace};

pub use algo::{
    cluster_by_frequency, compute_centrality, detect_hubs, shortest_path, Path, PathElement,
    TraversalEngine, TraversalMode, TraversalRun, TraversalStep, DEFAULT_HUB_THRESHOLD,
    DEFAULT_STEP_DELAY,
};

pub use session::{EdgeView, GraphSession, IngestReport, NodeView, Snapshot};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
