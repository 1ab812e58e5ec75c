//! Two-column text interchange for the export/import collaborators
//!
//! The legacy format wrote either `source,target` (an edge) or `id,label`
//! (an isolated node) with nothing distinguishing the two row kinds;
//! structurally the format is ambiguous. Export therefore emits a schema
//! tag per row — `edge,<source>,<target>` and `node,<id>,<label>` — and
//! import accepts both tagged rows and legacy untagged rows, treating the
//! latter as edges exactly as the original importer did (which is lossy
//! for isolated nodes; that loss is inherent to the legacy format, not
//! recoverable here).

use crate::graph::{Graph, Record};
use rustc_hash::FxHashSet;
use tracing::{info, warn};

/// Field names used for records produced by `parse_csv`.
pub const SOURCE_FIELD: &str = "source";
pub const TARGET_FIELD: &str = "target";

/// Result of parsing an interchange document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    /// Edge rows as records, ready for `Graph::construct` with
    /// `SOURCE_FIELD`/`TARGET_FIELD`
    pub records: Vec<Record>,
    /// Isolated nodes from tagged `node` rows: (id, label) pairs for
    /// `Graph::construct_with_nodes`
    pub isolated: Vec<(String, String)>,
    /// Rows that had too few columns and were skipped
    pub skipped_rows: usize,
}

/// Serialize a graph: all edges in construction order, then isolated
/// nodes in first-seen order.
pub fn to_csv(graph: &Graph) -> String {
    let mut out = String::new();

    let mut connected = FxHashSet::default();
    for edge in graph.edges() {
        connected.insert(&edge.source);
        connected.insert(&edge.target);
        out.push_str("edge,");
        out.push_str(edge.source.as_str());
        out.push(',');
        out.push_str(edge.target.as_str());
        out.push('\n');
    }

    for node in graph.nodes() {
        if !connected.contains(&node.id) {
            out.push_str("node,");
            out.push_str(node.id.as_str());
            out.push(',');
            out.push_str(&node.label);
            out.push('\n');
        }
    }

    info!(
        edges = graph.edge_count(),
        "graph serialized to interchange format"
    );
    out
}

/// Parse an interchange document. Blank lines are skipped; rows with too
/// few columns are counted but otherwise ignored.
pub fn parse_csv(text: &str) -> ParsedCsv {
    let mut parsed = ParsedCsv::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        match fields.as_slice() {
            ["edge", source, target] if !source.is_empty() && !target.is_empty() => {
                parsed.records.push(edge_record(source, target));
            }
            ["node", id, label] if !id.is_empty() => {
                parsed.isolated.push((id.to_string(), label.to_string()));
            }
            // Reserved first column with wrong arity or empty values:
            // never reinterpreted as a legacy row.
            ["edge" | "node", ..] => {
                parsed.skipped_rows += 1;
            }
            // Legacy untagged row: two columns, treated as an edge.
            [source, target] if !source.is_empty() && !target.is_empty() => {
                parsed.records.push(edge_record(source, target));
            }
            _ => {
                parsed.skipped_rows += 1;
            }
        }
    }

    if parsed.skipped_rows > 0 {
        warn!(skipped = parsed.skipped_rows, "malformed interchange rows skipped");
    }
    parsed
}

fn edge_record(source: &str, target: &str) -> Record {
    let mut record = Record::new();
    record.insert(SOURCE_FIELD.to_string(), source.to_string());
    record.insert(TARGET_FIELD.to_string(), target.to_string());
    record
}
