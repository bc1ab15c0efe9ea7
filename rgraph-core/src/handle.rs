//! Ownership of one remote graph.
//!
//! A [`GraphHandle`] creates its graph on construction and destroys it
//! exactly once: on [`GraphHandle::close`] or when the handle is dropped,
//! whichever comes first. Queries carry the graph's fixed directedness and
//! weightedness so callers never pass those flags themselves.

use tracing::{debug, error, info};

use crate::client::{GraphService, ServiceClient};
use crate::constants::{MAX_GRAPH_SIZE, UNREACHABLE};
use crate::error::{GraphError, Result};
use crate::types::{Ack, Degree, DegreeStats, Edge, GraphConfig, GraphId, NodeId};

/// Live remote graph bound to its configuration.
#[derive(Debug)]
pub struct GraphHandle<S: GraphService = ServiceClient> {
    service: S,
    id: GraphId,
    config: GraphConfig,
    closed: bool,
}

impl<S: GraphService> GraphHandle<S> {
    /// Create a remote graph described by `config`.
    ///
    /// Fails with [`GraphError::GraphTooLarge`] before contacting the service
    /// if `config.size` is above [`MAX_GRAPH_SIZE`].
    pub fn create(service: S, config: GraphConfig) -> Result<Self> {
        if config.size > MAX_GRAPH_SIZE {
            return Err(GraphError::GraphTooLarge {
                size: config.size,
                max: MAX_GRAPH_SIZE,
            });
        }
        let id = service.create(config.size)?;
        info!(
            graph = id,
            size = config.size,
            directed = config.directed,
            weighted = config.weighted,
            "Created remote graph"
        );
        Ok(Self {
            service,
            id,
            config,
            closed: false,
        })
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn live_id(&self) -> Result<GraphId> {
        if self.closed {
            Err(GraphError::Disposed { id: self.id })
        } else {
            Ok(self.id)
        }
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node as usize >= self.config.size {
            return Err(GraphError::NodeOutOfRange {
                node,
                size: self.config.size,
            });
        }
        Ok(())
    }

    /// Add a single edge. Unweighted graphs always store weight 1.
    pub fn add_edge(&self, u: NodeId, v: NodeId, weight: i64) -> Result<Ack> {
        let id = self.live_id()?;
        self.check_node(u)?;
        self.check_node(v)?;
        let weight = if self.config.weighted { weight } else { 1 };
        self.service
            .add_edge(id, u, v, weight, self.config.bidirectional())
    }

    /// Upload a batch of edges in one request.
    ///
    /// The whole batch is validated first: on a weighted graph every edge must
    /// carry a weight, and every endpoint must be below the graph size. Any
    /// failure rejects the batch with nothing sent.
    pub fn add_edges(&self, batch: &[Edge]) -> Result<Ack> {
        let id = self.live_id()?;
        let lines = self.normalize(batch)?;
        debug!(graph = id, edges = lines.len(), "Uploading edge batch");
        self.service
            .batch_edges(id, &lines, self.config.bidirectional())
    }

    fn normalize(&self, batch: &[Edge]) -> Result<Vec<Edge>> {
        batch
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                self.check_node(edge.u)?;
                self.check_node(edge.v)?;
                let weight = if self.config.weighted {
                    edge.weight.ok_or(GraphError::MissingWeight { index })?
                } else {
                    1
                };
                Ok(Edge::weighted(edge.u, edge.v, weight))
            })
            .collect()
    }

    /// Whether the service still knows this graph.
    pub fn exists(&self) -> Result<bool> {
        self.service.exists(self.live_id()?)
    }

    pub fn degree(&self, node: NodeId) -> Result<Degree> {
        self.service
            .degree(self.live_id()?, node, self.config.directed)
    }

    pub fn stats(&self) -> Result<DegreeStats> {
        self.service
            .degree_stats(self.live_id()?, self.config.directed)
    }

    pub fn isolated(&self) -> Result<Vec<NodeId>> {
        self.service
            .isolated_nodes(self.live_id()?, self.config.directed)
    }

    pub fn triangle_count(&self) -> Result<u64> {
        self.service
            .count_triangles(self.live_id()?, self.config.directed)
    }

    /// Distance from `start` to every node, `None` where unreachable.
    pub fn shortest_path(&self, start: NodeId) -> Result<Vec<Option<i64>>> {
        let raw = self
            .service
            .shortest_path(self.live_id()?, start, self.config.weighted)?;
        Ok(raw
            .into_iter()
            .map(|d| if d == UNREACHABLE { None } else { Some(d) })
            .collect())
    }

    /// Betweenness centrality per node, indexed by node id.
    pub fn centrality(&self) -> Result<Vec<f64>> {
        self.service
            .betweenness_centrality(self.live_id()?, self.config.weighted)
    }

    pub fn out_nodes(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.service.get_from(self.live_id()?, node)
    }

    pub fn in_nodes(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.service.get_to(self.live_id()?, node)
    }

    pub fn neighbours(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.service
            .get_neighbours(self.live_id()?, node, self.config.directed)
    }

    /// Destroy the remote graph.
    ///
    /// Only the first call reaches the service; later calls (including the
    /// one from `Drop`) are no-ops. Failures are logged, not returned.
    /// Returns `true` if this call destroyed the graph.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        match self.service.destroy(self.id) {
            Ok(deleted) => {
                info!(graph = self.id, deleted, "Destroyed remote graph");
                deleted
            }
            Err(e) => {
                error!(graph = self.id, "Failed to destroy remote graph: {}", e);
                false
            }
        }
    }

    /// Give up ownership: the remote graph outlives this handle.
    pub fn detach(mut self) -> GraphId {
        self.closed = true;
        info!(graph = self.id, "Detached remote graph");
        self.id
    }
}

impl<S: GraphService> Drop for GraphHandle<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryService;

    fn undirected(size: usize) -> (MemoryService, GraphHandle<MemoryService>) {
        let service = MemoryService::new();
        let graph = GraphHandle::create(service.clone(), GraphConfig::new(size)).unwrap();
        (service, graph)
    }

    #[test]
    fn test_size_ceiling() {
        let service = MemoryService::new();
        let err = GraphHandle::create(service.clone(), GraphConfig::new(4097)).unwrap_err();
        assert!(matches!(err, GraphError::GraphTooLarge { size: 4097, max: 4096 }));
        assert_eq!(service.calls("create"), 0);

        let graph = GraphHandle::create(service.clone(), GraphConfig::new(4096)).unwrap();
        assert_eq!(service.state().graphs[&graph.id()].size, 4096);
    }

    #[test]
    fn test_unweighted_forces_weight_one() {
        let (service, graph) = undirected(3);
        graph
            .add_edges(&[Edge::weighted(0, 1, 9), Edge::new(1, 2)])
            .unwrap();
        graph.add_edge(2, 0, 5).unwrap();

        let state = service.state();
        let (_, lines, bi) = &state.batches[0];
        assert!(*bi);
        assert!(lines.iter().all(|e| e.weight == Some(1)));
        assert!(state.graphs[&graph.id()]
            .edges
            .iter()
            .all(|(_, _, w)| *w == 1));
    }

    #[test]
    fn test_weighted_batch_rejected_in_full() {
        let service = MemoryService::new();
        let config = GraphConfig::new(3).weighted(true);
        let graph = GraphHandle::create(service.clone(), config).unwrap();

        let err = graph
            .add_edges(&[Edge::weighted(0, 1, 4), Edge::new(1, 2)])
            .unwrap_err();
        assert!(matches!(err, GraphError::MissingWeight { index: 1 }));
        assert_eq!(service.calls("batch_edges"), 0);
        assert!(service.state().graphs[&graph.id()].edges.is_empty());
    }

    #[test]
    fn test_out_of_range_endpoint_rejected() {
        let (service, graph) = undirected(2);
        let err = graph.add_edges(&[Edge::new(0, 1), Edge::new(1, 2)]).unwrap_err();
        assert!(matches!(err, GraphError::NodeOutOfRange { node: 2, size: 2 }));
        assert_eq!(service.calls("batch_edges"), 0);
    }

    #[test]
    fn test_directed_graph_sends_bi_false() {
        let service = MemoryService::new();
        let graph =
            GraphHandle::create(service.clone(), GraphConfig::new(2).directed(true)).unwrap();
        graph.add_edges(&[Edge::new(0, 1)]).unwrap();
        assert!(!service.state().batches[0].2);
        assert_eq!(graph.out_nodes(0).unwrap(), vec![1]);
        assert!(graph.out_nodes(1).unwrap().is_empty());
        assert_eq!(graph.in_nodes(1).unwrap(), vec![0]);
    }

    #[test]
    fn test_shortest_path_sentinel_becomes_none() {
        let (service, graph) = undirected(5);
        service.state_mut().path = Some(vec![0, 1, 2, 2147483647, 3]);
        let path = graph.shortest_path(0).unwrap();
        assert_eq!(path, vec![Some(0), Some(1), Some(2), None, Some(3)]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let (service, mut graph) = undirected(2);
        let id = graph.id();
        assert!(graph.close());
        assert!(!graph.close());
        drop(graph);
        assert_eq!(service.calls("destroy"), 1);
        assert_eq!(service.state().destroyed, vec![id]);
    }

    #[test]
    fn test_drop_destroys_remote_graph() {
        let (service, graph) = undirected(2);
        let id = graph.id();
        drop(graph);
        assert!(!service.state().graphs.contains_key(&id));
    }

    #[test]
    fn test_operations_after_close_fail() {
        let (_service, mut graph) = undirected(2);
        graph.close();
        assert!(matches!(graph.stats(), Err(GraphError::Disposed { .. })));
        assert!(matches!(
            graph.add_edges(&[Edge::new(0, 1)]),
            Err(GraphError::Disposed { .. })
        ));
        assert!(matches!(graph.neighbours(0), Err(GraphError::Disposed { .. })));
    }

    #[test]
    fn test_destroy_failure_is_swallowed() {
        let (service, mut graph) = undirected(2);
        service.state_mut().fail_destroy = true;
        assert!(!graph.close());
        assert!(graph.is_closed());
        drop(graph);
        assert_eq!(service.calls("destroy"), 1);
    }

    #[test]
    fn test_detach_keeps_remote_graph() {
        let (service, graph) = undirected(2);
        let id = graph.detach();
        assert_eq!(service.calls("destroy"), 0);
        assert!(service.state().graphs.contains_key(&id));
    }
}
