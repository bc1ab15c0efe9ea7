//! rgraph CLI - drive a remote graph-processing service from the shell.
//!
//! Loads edge lists into the service, builds name-addressed graphs, and runs
//! the service's graph queries against them.

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{alias, graphs, load, Context};
use config::RgraphConfig;
use output::OutputFormat;

/// Client for a remote graph-processing service.
#[derive(Parser)]
#[command(name = "rgraph")]
#[command(author, version)]
#[command(about = "Client for a remote graph-processing service")]
#[command(propagate_version = true)]
#[command(after_help = "Examples:
  rgraph ping                       Check the service is up
  rgraph load dataset/facebook      Bulk-load every .edges file in a directory
  rgraph alias dataset/graph.txt    Build a graph addressed by node names
  rgraph ls                         List graphs on the server")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Graph service base URL (overrides .rgraph.toml)
    #[arg(long, global = true, env = "RGRAPH_HOST")]
    host: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-load a directory of numeric edge-list files into a new directed graph
    Load {
        /// Directory containing edge-list files
        dir: String,

        /// Leave the graph on the server instead of destroying it on exit
        #[arg(short, long)]
        keep: bool,

        /// Number of most central nodes to show
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
    },

    /// Build a weighted, undirected graph from a `name name weight` file
    Alias {
        /// File of whitespace-separated `name name weight` lines
        file: String,

        /// Start node for shortest paths and neighbours (defaults to the first name)
        #[arg(short, long)]
        from: Option<String>,

        /// Number of most central nodes to show
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
    },

    /// List graph ids live on the server
    Ls,

    /// Check whether a graph exists
    Exists {
        /// Graph id
        id: u64,
    },

    /// Destroy a graph
    Destroy {
        /// Graph id
        id: u64,
    },

    /// Check that the graph service is reachable
    Ping,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .rgraph.toml
    let config = RgraphConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let ctx = Context {
        client: config.client_config(cli.host.as_deref()),
        loader: config.loader_config(),
        format,
    };

    match command {
        Commands::Load { dir, keep, top } => load::run(&ctx, &dir, keep, top),
        Commands::Alias { file, from, top } => alias::run(&ctx, &file, from.as_deref(), top),
        Commands::Ls => graphs::run_list(&ctx),
        Commands::Exists { id } => graphs::run_exists(&ctx, id),
        Commands::Destroy { id } => graphs::run_destroy(&ctx, id),
        Commands::Ping => graphs::run_ping(&ctx),
    }
}
