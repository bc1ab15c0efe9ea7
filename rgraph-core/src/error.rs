//! Error types for rgraph-core.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{GraphId, NodeId};

/// Result type alias for rgraph-core operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while talking to, or preparing data for, the graph service.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Requested graph size is above the service ceiling.
    #[error("Graph size {size} exceeds maximum allowed size of {max}")]
    GraphTooLarge {
        /// Requested number of nodes.
        size: usize,
        /// Largest size the service accepts.
        max: usize,
    },

    /// An edge in a batch for a weighted graph carries no weight.
    #[error("Weighted graph requires a weight for every edge (edge #{index} has none)")]
    MissingWeight {
        /// Position of the offending edge within the batch.
        index: usize,
    },

    /// An edge endpoint does not fit in the graph.
    #[error("Node {node} is out of range for a graph of size {size}")]
    NodeOutOfRange {
        /// Offending node id.
        node: NodeId,
        /// Size of the graph the edge was meant for.
        size: usize,
    },

    /// Network failure, timeout, or an undecodable response body.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Service returned {status} for {path}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
        /// Response body, usually `{"error": ...}`.
        body: String,
    },

    /// The handle's remote graph was already destroyed.
    #[error("Graph {id} has been disposed")]
    Disposed {
        /// Id of the destroyed graph.
        id: GraphId,
    },

    /// A node name has no registered id.
    #[error("Unknown node name: {0}")]
    UnknownName(String),

    /// A node id returned by the service has no registered name.
    #[error("Unknown node id: {0}")]
    UnknownId(NodeId),

    /// Bulk load found a node id above the configured ceiling.
    #[error("Graph size too large ({max_id} > {limit})")]
    NodeLimitExceeded {
        /// Largest node id seen across all files.
        max_id: NodeId,
        /// Configured ceiling.
        limit: NodeId,
    },

    /// Bulk load found no edge-list files to ingest.
    #[error("No .{extension} files found in {}", dir.display())]
    NoEdgeFiles {
        /// Directory that was searched.
        dir: PathBuf,
        /// Extension that qualifies a file.
        extension: String,
    },

    /// A weight token in an alias file is not a number.
    #[error("Invalid weight {value:?} on line {line}")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// The token as read.
        value: String,
    },

    /// IO error reading an input file.
    #[error("IO error on {}: {source}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised locally, before any request is sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GraphError::GraphTooLarge { .. }
                | GraphError::MissingWeight { .. }
                | GraphError::NodeOutOfRange { .. }
                | GraphError::NodeLimitExceeded { .. }
        )
    }
}
