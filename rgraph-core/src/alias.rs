//! Name-addressed graphs.
//!
//! The service only understands dense integer node ids. [`Aliases`] keeps a
//! bijection between node names and those ids (assigned `0, 1, 2, ...` in
//! first-seen order), and [`AliasGraph`] exposes every [`GraphHandle`]
//! operation in terms of names.
//!
//! Each operation declares how its result is translated back:
//!
//! - [`IdList`]: a list of node ids, translated element-wise to names.
//! - [`PerNode`]: a dense array indexed by node id (distances, scores),
//!   translated to `(name, value)` pairs in id order.
//! - Anything else (degrees, counts, stats) is returned as is.
//!
//! # Example
//!
//! ```no_run
//! use rgraph_core::{AliasGraph, ClientConfig, ServiceClient};
//!
//! # fn main() -> rgraph_core::Result<()> {
//! let client = ServiceClient::new(ClientConfig::default())?;
//! let graph = AliasGraph::from_file(client, "dataset/graph.txt")?;
//! println!("{:?}", graph.shortest_path("A")?);
//! println!("{:?}", graph.neighbours("A")?);
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::client::{GraphService, ServiceClient};
use crate::error::{GraphError, Result};
use crate::handle::GraphHandle;
use crate::types::{Ack, Degree, DegreeStats, Edge, GraphConfig, NodeId};

/// A node argument: either a registered name or a raw id.
///
/// Raw ids are forwarded unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Id(NodeId),
    Name(&'a str),
}

impl From<NodeId> for NodeRef<'_> {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl<'a> From<&'a str> for NodeRef<'a> {
    fn from(name: &'a str) -> Self {
        NodeRef::Name(name)
    }
}

impl<'a> From<&'a String> for NodeRef<'a> {
    fn from(name: &'a String) -> Self {
        NodeRef::Name(name.as_str())
    }
}

/// Bijection between node names and dense node ids.
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    ids: HashMap<String, NodeId>,
    /// Indexed by id; ids are contiguous so a Vec is the reverse map.
    names: Vec<String>,
}

impl Aliases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `name`, assigning the next free id on first sight.
    pub fn resolve(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.names.len() as NodeId;
        self.ids.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// All names, in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Translate an argument to an id. Unknown names fail instead of
    /// being forwarded.
    pub fn lookup(&self, node: NodeRef<'_>) -> Result<NodeId> {
        match node {
            NodeRef::Id(id) => Ok(id),
            NodeRef::Name(name) => self
                .id(name)
                .ok_or_else(|| GraphError::UnknownName(name.to_string())),
        }
    }

    /// Translate a result back into names.
    pub fn translate<T: Translate>(&self, value: T) -> Result<T::Output> {
        value.translate(self)
    }
}

/// A result shape that knows how to turn ids into names.
pub trait Translate {
    type Output;

    fn translate(self, aliases: &Aliases) -> Result<Self::Output>;
}

/// Result is a list of node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList(pub Vec<NodeId>);

impl Translate for IdList {
    type Output = Vec<String>;

    fn translate(self, aliases: &Aliases) -> Result<Vec<String>> {
        self.0
            .into_iter()
            .map(|id| {
                aliases
                    .name(id)
                    .map(str::to_string)
                    .ok_or(GraphError::UnknownId(id))
            })
            .collect()
    }
}

/// Result is a dense per-node array; index `i` belongs to node `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerNode<T>(pub Vec<T>);

impl<T> Translate for PerNode<T> {
    type Output = Vec<(String, T)>;

    /// Indices without a registered name are dropped.
    fn translate(self, aliases: &Aliases) -> Result<Vec<(String, T)>> {
        Ok(self
            .0
            .into_iter()
            .enumerate()
            .filter_map(|(idx, value)| {
                let id = NodeId::try_from(idx).ok()?;
                aliases.name(id).map(|name| (name.to_string(), value))
            })
            .collect())
    }
}

/// A bidirectional, weighted graph addressed by node names.
#[derive(Debug)]
pub struct AliasGraph<S: GraphService = ServiceClient> {
    aliases: Aliases,
    graph: GraphHandle<S>,
    edge_count: usize,
}

impl<S: GraphService> AliasGraph<S> {
    /// Build from a file of `name name weight` lines.
    pub fn from_file(service: S, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
        Self::build(service, BufReader::new(file), path)
    }

    /// Build from any reader of `name name weight` lines.
    pub fn from_reader(service: S, reader: impl BufRead) -> Result<Self> {
        Self::build(service, reader, Path::new("<reader>"))
    }

    fn build(service: S, reader: impl BufRead, origin: &Path) -> Result<Self> {
        let mut aliases = Aliases::new();
        let mut edges = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| GraphError::io(origin, e))?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            let [u, v, w] = parts.as_slice() else {
                debug!("Skipping {}:{}: expected 3 fields", origin.display(), idx + 1);
                continue;
            };
            let u = aliases.resolve(u);
            let v = aliases.resolve(v);
            edges.push(Edge::weighted(u, v, parse_weight(w, idx + 1)?));
        }

        let config = GraphConfig::new(aliases.len()).weighted(true);
        let graph = GraphHandle::create(service, config)?;
        graph.add_edges(&edges)?;
        info!(
            graph = graph.id(),
            nodes = aliases.len(),
            edges = edges.len(),
            "Built alias graph from {}",
            origin.display()
        );

        Ok(Self {
            aliases,
            graph,
            edge_count: edges.len(),
        })
    }

    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.aliases.id(name)
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.aliases.name(id)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Edges uploaded at construction.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The underlying id-addressed graph.
    pub fn graph(&self) -> &GraphHandle<S> {
        &self.graph
    }

    pub fn close(&mut self) -> bool {
        self.graph.close()
    }

    pub fn exists(&self) -> Result<bool> {
        self.graph.exists()
    }

    pub fn add_edge<'a>(
        &self,
        u: impl Into<NodeRef<'a>>,
        v: impl Into<NodeRef<'a>>,
        weight: i64,
    ) -> Result<Ack> {
        let u = self.aliases.lookup(u.into())?;
        let v = self.aliases.lookup(v.into())?;
        self.graph.add_edge(u, v, weight)
    }

    /// Upload `(u, v, weight)` edges. Every name must already be registered;
    /// nothing is sent if any lookup fails.
    pub fn add_edges<'a, I>(&self, edges: I) -> Result<Ack>
    where
        I: IntoIterator<Item = (NodeRef<'a>, NodeRef<'a>, Option<i64>)>,
    {
        let batch = edges
            .into_iter()
            .map(|(u, v, weight)| {
                Ok(Edge {
                    u: self.aliases.lookup(u)?,
                    v: self.aliases.lookup(v)?,
                    weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.graph.add_edges(&batch)
    }

    pub fn degree<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Degree> {
        self.graph.degree(self.aliases.lookup(node.into())?)
    }

    pub fn stats(&self) -> Result<DegreeStats> {
        self.graph.stats()
    }

    pub fn isolated(&self) -> Result<Vec<String>> {
        self.aliases.translate(IdList(self.graph.isolated()?))
    }

    pub fn triangle_count(&self) -> Result<u64> {
        self.graph.triangle_count()
    }

    /// Distance from `start` to every named node; `None` where unreachable.
    pub fn shortest_path<'a>(
        &self,
        start: impl Into<NodeRef<'a>>,
    ) -> Result<Vec<(String, Option<i64>)>> {
        let start = self.aliases.lookup(start.into())?;
        self.aliases
            .translate(PerNode(self.graph.shortest_path(start)?))
    }

    pub fn centrality(&self) -> Result<Vec<(String, f64)>> {
        self.aliases.translate(PerNode(self.graph.centrality()?))
    }

    pub fn out_nodes<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<String>> {
        let node = self.aliases.lookup(node.into())?;
        self.aliases.translate(IdList(self.graph.out_nodes(node)?))
    }

    pub fn in_nodes<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<String>> {
        let node = self.aliases.lookup(node.into())?;
        self.aliases.translate(IdList(self.graph.in_nodes(node)?))
    }

    pub fn neighbours<'a>(&self, node: impl Into<NodeRef<'a>>) -> Result<Vec<String>> {
        let node = self.aliases.lookup(node.into())?;
        self.aliases.translate(IdList(self.graph.neighbours(node)?))
    }
}

/// Weights are read as real numbers and truncated toward zero.
fn parse_weight(token: &str, line: usize) -> Result<i64> {
    match token.parse::<f64>() {
        Ok(w) if w.is_finite() => Ok(w.trunc() as i64),
        _ => Err(GraphError::InvalidWeight {
            line,
            value: token.to_string(),
        }),
    }
}
