//! Traversal and analytics over a constructed graph
//!
//! All analyzers read the graph, never mutate its node/edge membership,
//! and write only to their own highlight namespace. The centrality
//! analyzer is the one exception to the tag rule: its output is a scalar
//! written onto each node.

pub mod centrality;
pub mod frequency;
pub mod hubs;
pub mod pathfinding;
pub mod traversal;

pub use centrality::compute_centrality;
pub use frequency::cluster_by_frequency;
pub use hubs::{detect_hubs, DEFAULT_HUB_THRESHOLD};
pub use pathfinding::{shortest_path, Path, PathElement};
pub use traversal::{
    TraversalEngine, TraversalMode, TraversalRun, TraversalStep, DEFAULT_STEP_DELAY,
};
