//! Graph data model: nodes, edges, and the construction-time container

pub mod edge;
pub mod model;
pub mod node;
pub mod types;

pub use edge::Edge;
pub use model::{Graph, GraphError, GraphResult, ValidationError};
pub use node::Node;
pub use types::{EdgeIdx, NodeId, Record};
