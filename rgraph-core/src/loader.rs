//! Two-phase bulk ingestion of numeric edge lists.
//!
//! Phase 1 scans every file once to find the largest node id, so the graph
//! can be created at its final size (and refused before anything is created
//! if it would be too large). Phase 2 re-reads the files and streams edges
//! to the service in fixed-size batches.
//!
//! Edge-list format, one edge per line:
//!
//! ```text
//! # comment
//! 0 1
//! 1 2
//! ```
//!
//! Lines starting with `#`, blank lines, and lines that are not exactly two
//! non-negative integers are skipped.
//!
//! Every run creates a new remote graph; nothing is merged with earlier runs.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::client::{GraphService, ServiceClient};
use crate::constants::{BATCH_SIZE, EDGE_FILE_EXTENSION, MAX_NODE_ID};
use crate::error::{GraphError, Result};
use crate::handle::GraphHandle;
use crate::types::{Edge, GraphConfig, NodeId};

/// Limits and file selection for a [`BulkLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Highest node id accepted across all files.
    pub max_node_id: NodeId,
    /// Edges per upload request.
    pub batch_size: usize,
    /// Extension (without the dot) that qualifies a file in a directory.
    pub extension: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_node_id: MAX_NODE_ID,
            batch_size: BATCH_SIZE,
            extension: EDGE_FILE_EXTENSION.to_string(),
        }
    }
}

/// Result of the sizing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub max_node_id: NodeId,
    /// Valid edge lines seen.
    pub edges: usize,
    pub files: usize,
}

/// Result of a completed load. Owns the new graph.
#[derive(Debug)]
pub struct LoadReport<S: GraphService = ServiceClient> {
    pub graph: GraphHandle<S>,
    pub node_count: usize,
    pub edge_count: usize,
    pub batches: usize,
}

/// Loads numeric edge-list files into a fresh directed, unweighted graph.
#[derive(Debug, Clone)]
pub struct BulkLoader<S: GraphService = ServiceClient> {
    service: S,
    config: LoaderConfig,
}

impl<S: GraphService + Clone> BulkLoader<S> {
    pub fn new(service: S, config: LoaderConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Qualifying files in `dir`, sorted by path.
    pub fn discover(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| GraphError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| GraphError::io(dir, e))?.path();
            let qualifies = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == self.config.extension.as_str());
            if qualifies {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(GraphError::NoEdgeFiles {
                dir: dir.to_path_buf(),
                extension: self.config.extension.clone(),
            });
        }
        debug!("Found {} edge files in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Phase 1: find the largest node id across `files`.
    ///
    /// Fails with [`GraphError::NodeLimitExceeded`] if it is above the
    /// configured ceiling.
    pub fn scan(&self, files: &[PathBuf]) -> Result<ScanSummary> {
        let mut summary = ScanSummary {
            max_node_id: 0,
            edges: 0,
            files: files.len(),
        };
        for path in files {
            for_each_edge(path, |u, v| {
                summary.max_node_id = summary.max_node_id.max(u).max(v);
                summary.edges += 1;
                Ok(())
            })?;
        }

        if summary.max_node_id > self.config.max_node_id {
            return Err(GraphError::NodeLimitExceeded {
                max_id: summary.max_node_id,
                limit: self.config.max_node_id,
            });
        }
        Ok(summary)
    }

    /// Scan `files`, create a graph of `max_node_id + 1` nodes, and upload
    /// every edge in batches.
    pub fn load(&self, files: &[PathBuf]) -> Result<LoadReport<S>> {
        if files.is_empty() {
            return Err(GraphError::NoEdgeFiles {
                dir: PathBuf::new(),
                extension: self.config.extension.clone(),
            });
        }
        let summary = self.scan(files)?;
        let node_count = summary.max_node_id as usize + 1;
        let config = GraphConfig::new(node_count).directed(true);
        let graph = GraphHandle::create(self.service.clone(), config)?;

        let batch_size = self.config.batch_size.max(1);
        let mut edge_count = 0;
        let mut batches = 0;
        for path in files {
            let mut buffer: Vec<Edge> = Vec::with_capacity(batch_size);
            for_each_edge(path, |u, v| {
                buffer.push(Edge::new(u, v));
                if buffer.len() >= batch_size {
                    graph.add_edges(&buffer)?;
                    edge_count += buffer.len();
                    batches += 1;
                    buffer.clear();
                }
                Ok(())
            })?;
            if !buffer.is_empty() {
                graph.add_edges(&buffer)?;
                edge_count += buffer.len();
                batches += 1;
            }
            debug!("Uploaded {}", path.display());
        }

        info!(
            graph = graph.id(),
            batches,
            "Created graph with {} nodes and {} edges",
            node_count,
            edge_count
        );
        Ok(LoadReport {
            graph,
            node_count,
            edge_count,
            batches,
        })
    }

    /// [`discover`](Self::discover) then [`load`](Self::load).
    pub fn load_dir(&self, dir: impl AsRef<Path>) -> Result<LoadReport<S>> {
        let files = self.discover(dir)?;
        self.load(&files)
    }
}

/// Parse one edge line, `None` for anything that is not `u v`.
fn parse_edge(line: &str) -> Option<(NodeId, NodeId)> {
    if line.starts_with('#') {
        return None;
    }
    let mut parts = line.split_whitespace();
    let u = parts.next()?.parse().ok()?;
    let v = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((u, v))
}

fn for_each_edge(path: &Path, mut f: impl FnMut(NodeId, NodeId) -> Result<()>) -> Result<()> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| GraphError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_edge(&line) {
            Some((u, v)) => f(u, v)?,
            None => debug!("Skipping {}:{}", path.display(), idx + 1),
        }
    }
    Ok(())
}
