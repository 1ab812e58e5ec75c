//! Core type definitions for the graph engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a node.
///
/// Ids come straight from the ingested records (e.g. function names in a
/// call graph), so they are strings rather than numeric handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

/// Index of an edge in the graph's construction-ordered edge list.
///
/// Edges have no natural string identity; the index is stable because the
/// edge list never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

impl EdgeIdx {
    pub fn new(idx: usize) -> Self {
        EdgeIdx(idx)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeIdx({})", self.0)
    }
}

/// One ingested tabular record: field name -> raw string value.
pub type Record = HashMap<String, String>;
