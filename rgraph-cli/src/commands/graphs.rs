//! Graph housekeeping commands: ping, ls, exists, destroy

use anyhow::{Context as _, Result};
use colored::Colorize;
use rgraph_core::GraphService;
use serde::Serialize;

use super::Context;
use crate::output::{self, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
pub struct PingResult {
    pub url: String,
    pub status: String,
}

impl Outputter for PingResult {
    fn to_table(&self, _config: &OutputConfig) -> String {
        format!("{} {} ({})", "✓".green(), self.url, self.status)
    }
}

#[derive(Debug, Serialize)]
pub struct GraphList {
    pub ids: Vec<u64>,
}

impl Outputter for GraphList {
    fn to_table(&self, config: &OutputConfig) -> String {
        let rows = self.ids.iter().map(|id| vec![id.to_string()]).collect();
        TableOutput::format_rows(&["graph id"], rows, config)
    }
}

/// Outcome of `exists` / `destroy` for one graph.
#[derive(Debug, Serialize)]
pub struct GraphFlag {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Outputter for GraphFlag {
    fn to_table(&self, _config: &OutputConfig) -> String {
        match (self.exists, self.deleted) {
            (Some(true), _) => format!("Graph {} exists", self.id),
            (Some(false), _) => format!("Graph {} {}", self.id, "does not exist".yellow()),
            (_, Some(true)) => format!("Graph {} {}", self.id, "destroyed".green()),
            _ => format!("Graph {} {}", self.id, "not found".yellow()),
        }
    }
}

pub fn run_ping(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client
        .ping()
        .with_context(|| format!("Graph service at {} is unreachable", client.base_url()))?;
    let result = PingResult {
        url: client.base_url().to_string(),
        status,
    };
    output::print(&result, ctx.format);
    Ok(())
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let ids = ctx.client()?.list_ids().context("Failed to list graphs")?;
    output::print(&GraphList { ids }, ctx.format);
    Ok(())
}

pub fn run_exists(ctx: &Context, id: u64) -> Result<()> {
    let exists = ctx.client()?.exists(id).context("Existence check failed")?;
    let result = GraphFlag {
        id,
        exists: Some(exists),
        deleted: None,
    };
    output::print(&result, ctx.format);
    Ok(())
}

pub fn run_destroy(ctx: &Context, id: u64) -> Result<()> {
    let deleted = ctx
        .client()?
        .destroy(id)
        .with_context(|| format!("Failed to destroy graph {}", id))?;
    let result = GraphFlag {
        id,
        exists: None,
        deleted: Some(deleted),
    };
    output::print(&result, ctx.format);
    Ok(())
}
