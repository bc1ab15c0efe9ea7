//! rgraph configuration loading from `.rgraph.toml`.
//!
//! Configuration is optional - every setting has a default, and command-line
//! flags override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! url = "http://graph-host:8080"
//! timeout_secs = 60
//!
//! [loader]
//! max_node_id = 4096
//! batch_size = 500
//! extension = "edges"
//!
//! [output]
//! format = "json"
//! color = false
//! ```

use rgraph_core::{ClientConfig, LoaderConfig, NodeId};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".rgraph.toml";

/// Root configuration structure loaded from `.rgraph.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct RgraphConfig {
    /// Graph service endpoint.
    #[serde(default)]
    pub server: ServerSection,

    /// Bulk loader limits.
    #[serde(default)]
    pub loader: LoaderSection,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Where the graph service lives.
#[derive(Debug, Deserialize, Default)]
pub struct ServerSection {
    /// Base URL, e.g. `http://localhost:8080`.
    #[serde(default)]
    pub url: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Overrides for the bulk loader. Unset fields keep library defaults.
#[derive(Debug, Deserialize, Default)]
pub struct LoaderSection {
    #[serde(default)]
    pub max_node_id: Option<NodeId>,

    #[serde(default)]
    pub batch_size: Option<usize>,

    /// File extension (without the dot) picked up from a directory.
    #[serde(default)]
    pub extension: Option<String>,
}

/// Output formatting preferences.
///
/// Valid formats: `table`, `json`. `--format` overrides this.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub color: Option<bool>,
}

impl RgraphConfig {
    /// Load configuration from `.rgraph.toml` in the given directory.
    ///
    /// Missing or unparsable files fall back to defaults; problems are
    /// logged as warnings.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Client settings, with `host` (flag or env) taking precedence over the file.
    pub fn client_config(&self, host: Option<&str>) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(url) = host.or(self.server.url.as_deref()) {
            config = config.with_base_url(url);
        }
        if let Some(secs) = self.server.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn loader_config(&self) -> LoaderConfig {
        let defaults = LoaderConfig::default();
        LoaderConfig {
            max_node_id: self.loader.max_node_id.unwrap_or(defaults.max_node_id),
            batch_size: self.loader.batch_size.unwrap_or(defaults.batch_size),
            extension: self
                .loader
                .extension
                .clone()
                .unwrap_or(defaults.extension),
        }
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RgraphConfig::default();
        let client = config.client_config(None);
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(config.loader_config(), LoaderConfig::default());
        assert!(config.default_format().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
url = "http://graph:9000/"
timeout_secs = 5

[loader]
max_node_id = 100
batch_size = 50
extension = "txt"

[output]
format = "json"
color = false
"#;
        let config: RgraphConfig = toml::from_str(toml_content).unwrap();

        let client = config.client_config(None);
        assert_eq!(client.base_url, "http://graph:9000");
        assert_eq!(client.timeout, Duration::from_secs(5));

        let loader = config.loader_config();
        assert_eq!(loader.max_node_id, 100);
        assert_eq!(loader.batch_size, 50);
        assert_eq!(loader.extension, "txt");

        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
    }

    #[test]
    fn test_host_flag_wins() {
        let config: RgraphConfig = toml::from_str("[server]\nurl = \"http://file:1\"\n").unwrap();
        let client = config.client_config(Some("http://flag:2"));
        assert_eq!(client.base_url, "http://flag:2");
    }

    #[test]
    fn test_partial_loader_section() {
        let config: RgraphConfig = toml::from_str("[loader]\nbatch_size = 10\n").unwrap();
        let loader = config.loader_config();
        assert_eq!(loader.batch_size, 10);
        assert_eq!(loader.max_node_id, 4096);
        assert_eq!(loader.extension, "edges");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[server\nurl = ").unwrap();
        let config = RgraphConfig::load(dir.path());
        assert!(config.server.url.is_none());
    }
}
