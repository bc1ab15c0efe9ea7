//! In-memory stand-in for the graph service used by unit tests.
//!
//! Records every call so tests can assert on what would have gone over the
//! wire. Cloned handles share state.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;

use crate::client::GraphService;
use crate::constants::UNREACHABLE;
use crate::error::{GraphError, Result};
use crate::types::{Ack, Degree, DegreeStats, Edge, GraphId, NodeId};

#[derive(Debug, Clone, Default)]
pub struct StoredGraph {
    pub size: usize,
    /// (u, v, weight) as stored, mirrored edges included.
    pub edges: Vec<(NodeId, NodeId, i64)>,
}

impl StoredGraph {
    fn targets(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.edges
            .iter()
            .filter(|(u, _, _)| *u == node)
            .map(|(_, v, _)| *v)
            .collect()
    }

    fn sources(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.edges
            .iter()
            .filter(|(_, v, _)| *v == node)
            .map(|(u, _, _)| *u)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct State {
    next_id: GraphId,
    pub graphs: BTreeMap<GraphId, StoredGraph>,
    /// Every batch as received, keyed by graph id.
    pub batches: Vec<(GraphId, Vec<Edge>, bool)>,
    pub calls: Vec<&'static str>,
    pub destroyed: Vec<GraphId>,
    pub fail_destroy: bool,
    pub centrality: Option<Vec<f64>>,
    pub path: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    state: Rc<RefCell<State>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> std::cell::Ref<'_, State> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> std::cell::RefMut<'_, State> {
        self.state.borrow_mut()
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state().calls.iter().filter(|c| **c == name).count()
    }

    fn record(&self, name: &'static str) {
        self.state.borrow_mut().calls.push(name);
    }

    fn graph(&self, id: GraphId) -> Result<StoredGraph> {
        self.state()
            .graphs
            .get(&id)
            .cloned()
            .ok_or_else(|| GraphError::Status {
                status: 400,
                path: "/graph".to_string(),
                body: r#"{"error":"Graph not found"}"#.to_string(),
            })
    }

    fn insert(&self, id: GraphId, u: NodeId, v: NodeId, weight: i64, bi: bool) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let graph = state.graphs.get_mut(&id).ok_or_else(|| GraphError::Status {
            status: 400,
            path: "/graph".to_string(),
            body: r#"{"error":"Invalid graph ID"}"#.to_string(),
        })?;
        graph.edges.push((u, v, weight));
        if bi {
            graph.edges.push((v, u, weight));
        }
        Ok(())
    }
}

fn ok() -> Ack {
    Ack {
        status: "ok".to_string(),
    }
}

impl GraphService for MemoryService {
    fn create(&self, size: usize) -> Result<GraphId> {
        self.record("create");
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.graphs.insert(
            id,
            StoredGraph {
                size,
                edges: Vec::new(),
            },
        );
        Ok(id)
    }

    fn exists(&self, id: GraphId) -> Result<bool> {
        self.record("exists");
        Ok(self.state().graphs.contains_key(&id))
    }

    fn destroy(&self, id: GraphId) -> Result<bool> {
        self.record("destroy");
        let mut state = self.state.borrow_mut();
        if state.fail_destroy {
            return Err(GraphError::Status {
                status: 500,
                path: "/graph/destroy".to_string(),
                body: "boom".to_string(),
            });
        }
        state.destroyed.push(id);
        Ok(state.graphs.remove(&id).is_some())
    }

    fn list_ids(&self) -> Result<Vec<GraphId>> {
        self.record("list_ids");
        Ok(self.state().graphs.keys().copied().collect())
    }

    fn add_edge(&self, id: GraphId, u: NodeId, v: NodeId, weight: i64, bi: bool) -> Result<Ack> {
        self.record("add_edge");
        self.insert(id, u, v, weight, bi)?;
        Ok(ok())
    }

    fn batch_edges(&self, id: GraphId, lines: &[Edge], bi: bool) -> Result<Ack> {
        self.record("batch_edges");
        self.state_mut().batches.push((id, lines.to_vec(), bi));
        for edge in lines {
            // The service drops lines without a weight.
            if let Some(weight) = edge.weight {
                self.insert(id, edge.u, edge.v, weight, bi)?;
            }
        }
        Ok(ok())
    }

    fn degree(&self, id: GraphId, node: NodeId, _directed: bool) -> Result<Degree> {
        self.record("degree");
        let graph = self.graph(id)?;
        Ok(Degree {
            in_degree: graph.sources(node).len() as u32,
            out_degree: graph.targets(node).len() as u32,
        })
    }

    fn degree_stats(&self, id: GraphId, _directed: bool) -> Result<DegreeStats> {
        self.record("degree_stats");
        let graph = self.graph(id)?;
        let degrees: Vec<u32> = (0..graph.size as NodeId)
            .map(|n| graph.targets(n).len() as u32)
            .collect();
        let total: u32 = degrees.iter().sum();
        let n = graph.size.max(1) as f64;
        Ok(DegreeStats {
            min: degrees.iter().copied().min().unwrap_or(0),
            max: degrees.iter().copied().max().unwrap_or(0),
            density: f64::from(total) / (n * (n - 1.0)).max(1.0),
            avg: f64::from(total) / n,
        })
    }

    fn isolated_nodes(&self, id: GraphId, _directed: bool) -> Result<Vec<NodeId>> {
        self.record("isolated_nodes");
        let graph = self.graph(id)?;
        Ok((0..graph.size as NodeId)
            .filter(|n| graph.targets(*n).is_empty() && graph.sources(*n).is_empty())
            .collect())
    }

    fn count_triangles(&self, id: GraphId, _directed: bool) -> Result<u64> {
        self.record("count_triangles");
        self.graph(id)?;
        Ok(0)
    }

    fn shortest_path(&self, id: GraphId, start: NodeId, _weighed: bool) -> Result<Vec<i64>> {
        self.record("shortest_path");
        let graph = self.graph(id)?;
        if let Some(path) = self.state().path.clone() {
            return Ok(path);
        }
        let mut dist = vec![UNREACHABLE; graph.size];
        let mut queue = VecDeque::from([start]);
        dist[start as usize] = 0;
        while let Some(node) = queue.pop_front() {
            for next in graph.targets(node) {
                if dist[next as usize] == UNREACHABLE {
                    dist[next as usize] = dist[node as usize] + 1;
                    queue.push_back(next);
                }
            }
        }
        Ok(dist)
    }

    fn betweenness_centrality(&self, id: GraphId, _weighed: bool) -> Result<Vec<f64>> {
        self.record("betweenness_centrality");
        let graph = self.graph(id)?;
        Ok(self
            .state()
            .centrality
            .clone()
            .unwrap_or_else(|| vec![0.0; graph.size]))
    }

    fn get_from(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>> {
        self.record("get_from");
        Ok(self.graph(id)?.targets(node).into_iter().collect())
    }

    fn get_to(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>> {
        self.record("get_to");
        Ok(self.graph(id)?.sources(node).into_iter().collect())
    }

    fn get_neighbours(&self, id: GraphId, node: NodeId, _directed: bool) -> Result<Vec<NodeId>> {
        self.record("get_neighbours");
        let graph = self.graph(id)?;
        let mut nodes = graph.targets(node);
        nodes.extend(graph.sources(node));
        Ok(nodes.into_iter().collect())
    }
}
