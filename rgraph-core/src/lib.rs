//! rgraph core - client library for a remote graph-processing service.
//!
//! The service stores graphs and runs the algorithms (degrees, shortest
//! paths, centrality, triangle counts). This crate is everything on the
//! caller's side of the wire:
//!
//! - **client**: [`GraphService`] trait and its blocking HTTP implementation, [`ServiceClient`]
//! - **handle**: [`GraphHandle`], owner of one remote graph and its fixed configuration
//! - **alias**: [`AliasGraph`], the same operations addressed by node names
//! - **loader**: [`BulkLoader`], sized, batched ingestion of edge-list files
//!
//! # Usage
//!
//! ```no_run
//! use rgraph_core::{BulkLoader, ClientConfig, LoaderConfig, ServiceClient};
//!
//! # fn main() -> rgraph_core::Result<()> {
//! let client = ServiceClient::new(ClientConfig::default().with_base_url("http://localhost:8080"))?;
//! let report = BulkLoader::new(client, LoaderConfig::default()).load_dir("dataset/facebook")?;
//! println!("{} nodes, {} edges", report.node_count, report.edge_count);
//! println!("{:?}", report.graph.stats()?);
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod client;
pub mod constants;
pub mod error;
pub mod handle;
pub mod loader;
pub mod types;

#[cfg(test)]
mod testing;

pub use alias::{AliasGraph, Aliases, IdList, NodeRef, PerNode, Translate};
pub use client::{ClientConfig, GraphService, ServiceClient};
pub use error::{GraphError, Result};
pub use handle::GraphHandle;
pub use loader::{BulkLoader, LoadReport, LoaderConfig, ScanSummary};
pub use types::{Ack, Degree, DegreeStats, Edge, GraphConfig, GraphId, NodeId};
