//! Alias command - build a name-addressed graph from a `name name weight` file
//!
//! Reports statistics plus shortest paths, neighbours, centrality and
//! isolated nodes, all in terms of node names.

use anyhow::{anyhow, Context as _, Result};
use colored::Colorize;
use rgraph_core::{AliasGraph, DegreeStats};
use serde::Serialize;

use super::{top_scores, Context};
use crate::output::{self, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct Distance {
    pub node: String,
    /// `None` when the node is unreachable.
    pub distance: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Score {
    pub node: String,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct AliasSummary {
    pub graph_id: u64,
    pub nodes: usize,
    pub edges: usize,
    pub from: String,
    pub stats: DegreeStats,
    pub shortest_paths: Vec<Distance>,
    pub neighbours: Vec<String>,
    pub top_centrality: Vec<Score>,
    pub isolated: Vec<String>,
}

impl Outputter for AliasSummary {
    fn to_table(&self, config: &OutputConfig) -> String {
        let none = || "-".dimmed().to_string();
        let mut lines = vec![format!(
            "{} graph {} with {} named nodes and {} edges",
            "Built".green().bold(),
            self.graph_id,
            self.nodes,
            self.edges
        )];

        let pairs = [
            ("Degree min/max", format!("{}/{}", self.stats.min, self.stats.max)),
            ("Degree avg", format!("{:.4}", self.stats.avg)),
            ("Density", format!("{:.6}", self.stats.density)),
            (
                "Neighbours",
                if self.neighbours.is_empty() {
                    none()
                } else {
                    self.neighbours.join(", ")
                },
            ),
            (
                "Isolated",
                if self.isolated.is_empty() {
                    none()
                } else {
                    self.isolated.join(", ")
                },
            ),
        ];
        lines.push(TableOutput::format_key_value(&pairs, config));

        lines.push(format!("{} {}", "Shortest paths from".cyan(), self.from));
        let rows = self
            .shortest_paths
            .iter()
            .map(|d| {
                let distance = d.distance.map_or_else(|| "unreachable".to_string(), |v| v.to_string());
                vec![d.node.clone(), distance]
            })
            .collect();
        lines.push(TableOutput::format_rows(&["node", "distance"], rows, config));

        lines.push(format!("{}", "Most central nodes".cyan()));
        let rows = self
            .top_centrality
            .iter()
            .map(|s| vec![s.node.clone(), format!("{:.4}", s.score)])
            .collect();
        lines.push(TableOutput::format_rows(&["node", "centrality"], rows, config));

        lines.join("\n")
    }
}

pub fn run(ctx: &Context, file: &str, from: Option<&str>, top: usize) -> Result<()> {
    let graph = AliasGraph::from_file(ctx.client()?, file)
        .with_context(|| format!("Failed to build alias graph from {}", file))?;

    let from = match from {
        Some(name) => name.to_string(),
        None => graph
            .name(0)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("{} contains no edges", file))?,
    };

    let shortest_paths = graph
        .shortest_path(from.as_str())
        .with_context(|| format!("Shortest path from {} failed", from))?
        .into_iter()
        .map(|(node, distance)| Distance { node, distance })
        .collect();
    let neighbours = graph.neighbours(from.as_str())?;
    let centrality = graph.centrality()?;

    let summary = AliasSummary {
        graph_id: graph.graph().id(),
        nodes: graph.len(),
        edges: graph.edge_count(),
        stats: graph.stats()?,
        shortest_paths,
        neighbours,
        top_centrality: top_scores(&centrality, top)
            .into_iter()
            .map(|(node, score)| Score { node, score })
            .collect(),
        isolated: graph.isolated()?,
        from,
    };

    output::print(&summary, ctx.format);
    Ok(())
}
