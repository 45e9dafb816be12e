use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Graph has no nodes")]
    EmptyGraph,
    #[error("No path found from node {from} to node {to}")]
    NoPathFound { from: NodeId, to: NodeId },
    #[error("Invalid weight {weight} on edge {from} -> {to}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },
    #[error("Unknown node id {0}")]
    UnknownNode(NodeId),
    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),
    #[error("Edge {from} -> {to} references a missing node")]
    DanglingEdge { from: NodeId, to: NodeId },
    #[error("Invalid speed tag {raw:?} on edge {from} -> {to}")]
    InvalidSpeedTag { from: NodeId, to: NodeId, raw: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Computation cancelled")]
    Cancelled,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
