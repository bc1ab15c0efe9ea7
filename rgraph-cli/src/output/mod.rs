//! Output formatting for the rgraph CLI.
//!
//! Every command result implements [`Outputter`] and is rendered as a
//! human-readable table (default) or JSON.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Minified JSON / borderless tables
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            compact: false,
        }
    }

    /// Compact rendering when stdout is not a terminal.
    pub fn auto_detect(format: OutputFormat) -> Self {
        Self {
            compact: !std::io::stdout().is_terminal(),
            ..Self::new(format)
        }
    }
}

/// Types that can be rendered in any supported format.
pub trait Outputter: Serialize {
    fn to_table(&self, config: &OutputConfig) -> String;

    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
        }
    }
}

/// Render `data` to stdout in `format`.
pub fn print<T: Outputter>(data: &T, format: OutputFormat) {
    println!("{}", data.render(&OutputConfig::auto_detect(format)));
}
