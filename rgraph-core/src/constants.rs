//! Shared constants for the graph service client.
//!
//! Limits here mirror what the service enforces; keep them in sync with the
//! server build you talk to.

/// Largest graph, in nodes, the service will create.
pub const MAX_GRAPH_SIZE: usize = 4096;

/// Highest node id the bulk loader accepts before refusing to create a graph.
pub const MAX_NODE_ID: u32 = 4096;

/// Number of edges sent per batch upload.
///
/// Keeps request bodies small enough for the service's JSON parser.
pub const BATCH_SIZE: usize = 500;

/// Distance the service reports for nodes unreachable from the start node (2^31 - 1).
pub const UNREACHABLE: i64 = i32::MAX as i64;

/// Service endpoint used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Transport timeout applied to every request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// File extension that marks an edge-list file for bulk loading.
pub const EDGE_FILE_EXTENSION: &str = "edges";
