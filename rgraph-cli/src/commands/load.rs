//! Load command - bulk-ingest a directory of edge-list files
//!
//! Creates one directed graph sized to the largest node id, uploads every
//! edge in batches, then reports degree statistics, triangle count and the
//! most central nodes.

use anyhow::{Context as _, Result};
use colored::Colorize;
use rgraph_core::{BulkLoader, DegreeStats, LoadReport};
use serde::Serialize;
use std::path::Path;

use super::{timed, top_scores, Context};
use crate::output::{self, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct Score {
    pub node: u32,
    pub score: f64,
}

#[derive(Debug, Default, Serialize)]
pub struct Timings {
    pub load_ms: u64,
    pub stats_ms: u64,
    pub triangles_ms: u64,
    pub centrality_ms: u64,
}

/// Everything reported after a load.
#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub graph_id: u64,
    pub nodes: usize,
    pub edges: usize,
    pub batches: usize,
    /// Whether the remote graph was left on the server.
    pub kept: bool,
    pub stats: DegreeStats,
    pub triangles: u64,
    pub top_centrality: Vec<Score>,
    pub timings: Timings,
}

impl Outputter for LoadSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut lines = vec![format!(
            "{} graph {} with {} nodes and {} edges",
            "Created".green().bold(),
            self.graph_id,
            self.nodes,
            self.edges
        )];

        let pairs = [
            ("Batches", self.batches.to_string()),
            ("Degree min/max", format!("{}/{}", self.stats.min, self.stats.max)),
            ("Degree avg", format!("{:.4}", self.stats.avg)),
            ("Density", format!("{:.6}", self.stats.density)),
            ("Triangles", self.triangles.to_string()),
            ("Load time", format!("{} ms", self.timings.load_ms)),
            ("Stats time", format!("{} ms", self.timings.stats_ms)),
            ("Triangles time", format!("{} ms", self.timings.triangles_ms)),
            ("Centrality time", format!("{} ms", self.timings.centrality_ms)),
        ];
        lines.push(TableOutput::format_key_value(&pairs, config));

        let rows = self
            .top_centrality
            .iter()
            .map(|s| vec![s.node.to_string(), format!("{:.4}", s.score)])
            .collect();
        lines.push(format!("{}", "Most central nodes".cyan()));
        lines.push(TableOutput::format_rows(&["node", "centrality"], rows, config));

        if self.kept {
            lines.push(format!("Graph {} kept on the server", self.graph_id));
        }
        lines.join("\n")
    }
}

pub fn run(ctx: &Context, dir: &str, keep: bool, top: usize) -> Result<()> {
    let loader = BulkLoader::new(ctx.client()?, ctx.loader.clone());

    let (report, load_ms) = timed("Load", || loader.load_dir(Path::new(dir)));
    let LoadReport {
        graph,
        node_count,
        edge_count,
        batches,
    } = report.with_context(|| format!("Failed to load edge files from {}", dir))?;

    let (stats, stats_ms) = timed("Stats", || graph.stats());
    let (triangles, triangles_ms) = timed("Triangle Count", || graph.triangle_count());
    let (centrality, centrality_ms) = timed("Centrality", || graph.centrality());

    let scores: Vec<(u32, f64)> = centrality
        .context("Centrality query failed")?
        .into_iter()
        .enumerate()
        .map(|(node, score)| (node as u32, score))
        .collect();

    let summary = LoadSummary {
        graph_id: graph.id(),
        nodes: node_count,
        edges: edge_count,
        batches,
        kept: keep,
        stats: stats.context("Degree stats query failed")?,
        triangles: triangles.context("Triangle count query failed")?,
        top_centrality: top_scores(&scores, top)
            .into_iter()
            .map(|(node, score)| Score { node, score })
            .collect(),
        timings: Timings {
            load_ms,
            stats_ms,
            triangles_ms,
            centrality_ms,
        },
    };

    if keep {
        graph.detach();
    }
    output::print(&summary, ctx.format);
    Ok(())
}
