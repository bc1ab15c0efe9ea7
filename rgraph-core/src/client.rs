//! Typed binding to the remote graph service.
//!
//! [`GraphService`] lists every operation the service exposes. [`ServiceClient`]
//! implements it over blocking HTTP/JSON; everything above this layer
//! ([`GraphHandle`](crate::GraphHandle), [`AliasGraph`](crate::AliasGraph),
//! [`BulkLoader`](crate::BulkLoader)) is generic over the trait.
//!
//! No retries happen here. A failed request surfaces immediately as
//! [`GraphError::Transport`] or [`GraphError::Status`].

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{GraphError, Result};
use crate::types::{Ack, Degree, DegreeStats, Edge, GraphId, NodeId};

/// Operations exposed by the graph service, one method per endpoint.
///
/// Node and graph ids are raw numbers here; name translation and
/// configuration defaults live in the layers above.
pub trait GraphService {
    /// Create a graph with `size` nodes and return its id.
    fn create(&self, size: usize) -> Result<GraphId>;

    /// Whether a graph with this id is live on the server.
    fn exists(&self, id: GraphId) -> Result<bool>;

    /// Destroy a graph. Returns `false` if the server had no such graph.
    fn destroy(&self, id: GraphId) -> Result<bool>;

    /// Ids of every live graph.
    fn list_ids(&self) -> Result<Vec<GraphId>>;

    /// Add one edge; `bi` mirrors it as `v -> u` too.
    fn add_edge(&self, id: GraphId, u: NodeId, v: NodeId, weight: i64, bi: bool) -> Result<Ack>;

    /// Add a batch of edges in one request.
    fn batch_edges(&self, id: GraphId, lines: &[Edge], bi: bool) -> Result<Ack>;

    fn degree(&self, id: GraphId, node: NodeId, directed: bool) -> Result<Degree>;

    fn degree_stats(&self, id: GraphId, directed: bool) -> Result<DegreeStats>;

    fn isolated_nodes(&self, id: GraphId, directed: bool) -> Result<Vec<NodeId>>;

    fn count_triangles(&self, id: GraphId, directed: bool) -> Result<u64>;

    /// Per-node distances from `start`, with [`UNREACHABLE`](crate::constants::UNREACHABLE)
    /// for nodes that cannot be reached.
    fn shortest_path(&self, id: GraphId, start: NodeId, weighed: bool) -> Result<Vec<i64>>;

    /// Per-node betweenness centrality, indexed by node id.
    fn betweenness_centrality(&self, id: GraphId, weighed: bool) -> Result<Vec<f64>>;

    /// Targets of edges leaving `node`.
    fn get_from(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>>;

    /// Sources of edges entering `node`.
    fn get_to(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>>;

    fn get_neighbours(&self, id: GraphId, node: NodeId, directed: bool) -> Result<Vec<NodeId>>;
}

/// Connection settings for a [`ServiceClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Timeout applied to each request (connect + response).
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// =============================================================================
// Wire envelopes
// =============================================================================

#[derive(Serialize)]
struct CreateRequest {
    size: usize,
}

#[derive(Serialize)]
struct AddEdgeRequest {
    id: GraphId,
    u: NodeId,
    v: NodeId,
    weight: i64,
    bi: bool,
}

#[derive(Serialize)]
struct BatchEdgesRequest<'a> {
    id: GraphId,
    bi: bool,
    lines: &'a [Edge],
}

#[derive(Deserialize)]
struct CreateResponse {
    id: GraphId,
}

#[derive(Deserialize)]
struct ExistsResponse {
    exists: bool,
}

#[derive(Deserialize)]
struct DestroyResponse {
    deleted: bool,
}

#[derive(Deserialize)]
struct IdsResponse {
    ids: Vec<GraphId>,
}

#[derive(Deserialize)]
struct NodesResponse {
    nodes: Vec<NodeId>,
}

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Deserialize)]
struct PathResponse {
    path: Vec<i64>,
}

#[derive(Deserialize)]
struct CentralityResponse {
    centrality: Vec<f64>,
}

#[derive(Deserialize)]
struct PingResponse {
    status: String,
}

/// Blocking HTTP client for the graph service.
///
/// Stateless between calls; cloning is cheap and clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: Client,
    base_url: String,
}

impl ServiceClient {
    /// Build a client for the given endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        debug!("Graph service client for {}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point this client at another endpoint. Affects only later calls.
    pub fn set_base_url(&mut self, base_url: impl AsRef<str>) {
        self.base_url = base_url.as_ref().trim_end_matches('/').to_string();
        debug!("Host URL set to: {}", self.base_url);
    }

    /// Liveness probe. Returns the status string reported by the server.
    pub fn ping(&self) -> Result<String> {
        let resp: PingResponse = self.get("/ping", &[])?;
        Ok(resp.status)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, u64)]) -> Result<T> {
        debug!(method = "GET", path, ?query, "graph service request");
        self.send(path, self.http.get(self.url(path)).query(query))
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!(method = "POST", path, "graph service request");
        self.send(path, self.http.post(self.url(path)).json(body))
    }

    fn delete<T: DeserializeOwned>(&self, path: &str, query: &[(&str, u64)]) -> Result<T> {
        debug!(method = "DELETE", path, ?query, "graph service request");
        self.send(path, self.http.delete(self.url(path)).query(query))
    }

    fn send<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GraphError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body,
            });
        }
        Ok(response.json()?)
    }
}

fn flag(value: bool) -> u64 {
    u64::from(value)
}

impl GraphService for ServiceClient {
    fn create(&self, size: usize) -> Result<GraphId> {
        let resp: CreateResponse = self.post("/graph/create", &CreateRequest { size })?;
        Ok(resp.id)
    }

    fn exists(&self, id: GraphId) -> Result<bool> {
        let resp: ExistsResponse = self.get("/graph/exists", &[("id", id)])?;
        Ok(resp.exists)
    }

    fn destroy(&self, id: GraphId) -> Result<bool> {
        let resp: DestroyResponse = self.delete("/graph/destroy", &[("id", id)])?;
        Ok(resp.deleted)
    }

    fn list_ids(&self) -> Result<Vec<GraphId>> {
        let resp: IdsResponse = self.get("/graph/list_ids", &[])?;
        Ok(resp.ids)
    }

    fn add_edge(&self, id: GraphId, u: NodeId, v: NodeId, weight: i64, bi: bool) -> Result<Ack> {
        let body = AddEdgeRequest {
            id,
            u,
            v,
            weight,
            bi,
        };
        self.post("/graph/add-edge", &body)
    }

    fn batch_edges(&self, id: GraphId, lines: &[Edge], bi: bool) -> Result<Ack> {
        self.post("/graph/batch-edges", &BatchEdgesRequest { id, bi, lines })
    }

    fn degree(&self, id: GraphId, node: NodeId, directed: bool) -> Result<Degree> {
        let query = [("id", id), ("node", u64::from(node)), ("directed", flag(directed))];
        self.get("/graph/degree", &query)
    }

    fn degree_stats(&self, id: GraphId, directed: bool) -> Result<DegreeStats> {
        self.get("/graph/degree_stats", &[("id", id), ("directed", flag(directed))])
    }

    fn isolated_nodes(&self, id: GraphId, directed: bool) -> Result<Vec<NodeId>> {
        let query = [("id", id), ("directed", flag(directed))];
        let resp: NodesResponse = self.get("/graph/isolated_nodes", &query)?;
        Ok(resp.nodes)
    }

    fn count_triangles(&self, id: GraphId, directed: bool) -> Result<u64> {
        let query = [("id", id), ("directed", flag(directed))];
        let resp: CountResponse = self.get("/graph/count_triangles", &query)?;
        Ok(resp.count)
    }

    fn shortest_path(&self, id: GraphId, start: NodeId, weighed: bool) -> Result<Vec<i64>> {
        let query = [("id", id), ("start", u64::from(start)), ("weighed", flag(weighed))];
        let resp: PathResponse = self.get("/graph/shortest_path", &query)?;
        Ok(resp.path)
    }

    fn betweenness_centrality(&self, id: GraphId, weighed: bool) -> Result<Vec<f64>> {
        let query = [("id", id), ("weighed", flag(weighed))];
        let resp: CentralityResponse = self.get("/graph/betweenness_centrality", &query)?;
        Ok(resp.centrality)
    }

    fn get_from(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>> {
        let query = [("id", id), ("node", u64::from(node))];
        let resp: NodesResponse = self.get("/graph/get_from", &query)?;
        Ok(resp.nodes)
    }

    fn get_to(&self, id: GraphId, node: NodeId) -> Result<Vec<NodeId>> {
        let query = [("id", id), ("node", u64::from(node))];
        let resp: NodesResponse = self.get("/graph/get_to", &query)?;
        Ok(resp.nodes)
    }

    fn get_neighbours(&self, id: GraphId, node: NodeId, directed: bool) -> Result<Vec<NodeId>> {
        let query = [("id", id), ("node", u64::from(node)), ("directed", flag(directed))];
        let resp: NodesResponse = self.get("/graph/get_neighbours", &query)?;
        Ok(resp.nodes)
    }
}
