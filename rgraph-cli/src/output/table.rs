//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{builder::Builder, settings::Style};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Two-column key/value table.
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (key, value) in pairs {
            builder.push_record([key.to_string(), value.clone()]);
        }
        Self::finish(builder, config)
    }

    /// Table with a header row.
    pub fn format_rows(headers: &[&str], rows: Vec<Vec<String>>, config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }
        let mut builder = Builder::default();
        builder.push_record(headers.iter().map(|h| h.to_string()));
        for row in rows {
            builder.push_record(row);
        }
        Self::finish(builder, config)
    }

    fn finish(builder: Builder, config: &OutputConfig) -> String {
        let mut table = builder.build();
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
        table.to_string()
    }
}
