//! Core data types shared by the client, handles, and loaders.

use serde::{Deserialize, Serialize};

/// Dense node identifier inside one remote graph (`0..size`).
pub type NodeId = u32;

/// Server-assigned identifier of a remote graph.
pub type GraphId = u64;

/// A single edge as sent to the service.
///
/// `weight` is optional on input; the owning graph decides whether a missing
/// weight defaults to 1 or is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
}

impl Edge {
    /// Edge without an explicit weight.
    pub fn new(u: NodeId, v: NodeId) -> Self {
        Self { u, v, weight: None }
    }

    /// Edge with an explicit weight.
    pub fn weighted(u: NodeId, v: NodeId, weight: i64) -> Self {
        Self {
            u,
            v,
            weight: Some(weight),
        }
    }
}

/// Fixed configuration of one remote graph.
///
/// Size, directedness and weightedness never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphConfig {
    pub size: usize,
    pub directed: bool,
    pub weighted: bool,
}

impl GraphConfig {
    /// Undirected, unweighted graph of `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            directed: false,
            weighted: false,
        }
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Wire `bi` flag: edges are mirrored when the graph is undirected.
    pub fn bidirectional(&self) -> bool {
        !self.directed
    }
}

/// In/out degree of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(rename = "in")]
    pub in_degree: u32,
    #[serde(rename = "out")]
    pub out_degree: u32,
}

/// Degree distribution summary for a whole graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeStats {
    pub min: u32,
    pub max: u32,
    pub density: f64,
    pub avg: f64,
}

/// Acknowledgement returned by edge mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: String,
}

impl Ack {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
