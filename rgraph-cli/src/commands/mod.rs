//! Command implementations for the rgraph CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod alias;
pub mod graphs;
pub mod load;

use anyhow::{Context as _, Result};
use rgraph_core::{ClientConfig, LoaderConfig, ServiceClient};
use std::time::Instant;

use crate::output::OutputFormat;

/// Settings shared by every command, resolved from flags and `.rgraph.toml`.
#[derive(Debug, Clone)]
pub struct Context {
    pub client: ClientConfig,
    pub loader: LoaderConfig,
    pub format: OutputFormat,
}

impl Context {
    pub fn client(&self) -> Result<ServiceClient> {
        ServiceClient::new(self.client.clone()).context("Failed to build HTTP client")
    }
}

/// Run `f`, logging how long it took. Returns the value and elapsed milliseconds.
pub fn timed<T>(label: &str, f: impl FnOnce() -> T) -> (T, u64) {
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    tracing::info!("{} ({:.4}s)", label, elapsed.as_secs_f64());
    (value, elapsed.as_millis() as u64)
}

/// Highest-scoring `top` entries, best first.
pub fn top_scores<K: Clone>(scores: &[(K, f64)], top: usize) -> Vec<(K, f64)> {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
    sorted.truncate(top);
    sorted
}
