//! Configuration loaded from `goerd.toml`.
//!
//! Every key is optional. A missing file yields the defaults; an unreadable
//! or malformed one is reported and ignored.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{GoerdError, Result};
use crate::graph::DEFAULT_GRAPH_NAME;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "goerd.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoerdConfig {
    pub graph: GraphConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Name of the emitted digraph.
    pub name: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Directory served at `/`.
    pub static_dir: PathBuf,
    /// Route answering with a fresh DOT graph.
    pub graph_route: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("web"),
            graph_route: "/graph".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl GoerdConfig {
    /// Load from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        Self::read(path).unwrap_or_else(|e| {
            warn!(error = %e, "using default config");
            Self::default()
        })
    }

    /// Like [`GoerdConfig::load`], but returns the error instead of
    /// logging it. Only a missing file yields the defaults.
    pub fn read(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(GoerdError::io(path, e)),
        };
        Self::parse(&content).map_err(|source| GoerdError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GoerdConfig::default();
        assert_eq!(config.graph.name, "GoERD");
        assert_eq!(config.server.graph_route, "/graph");
        assert_eq!(config.server.static_dir, PathBuf::from("web"));
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_partial_config() {
        let config = GoerdConfig::parse(
            r#"
[graph]
name = "Types"

[server]
static_dir = "assets/d3"
"#,
        )
        .unwrap();
        assert_eq!(config.graph.name, "Types");
        assert_eq!(config.server.static_dir, PathBuf::from("assets/d3"));
        assert_eq!(config.server.graph_route, "/graph");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoerdConfig::load(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, GoerdConfig::default());
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[graph\nname = ").unwrap();
        assert!(matches!(GoerdConfig::read(&path), Err(GoerdError::Config { .. })));
        assert_eq!(GoerdConfig::load(&path), GoerdConfig::default());
    }

    #[test]
    fn test_unreadable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be read as a file.
        assert!(matches!(GoerdConfig::read(dir.path()), Err(GoerdError::Io { .. })));
        assert_eq!(GoerdConfig::load(dir.path()), GoerdConfig::default());
    }

    #[test]
    fn test_missing_file_reads_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GoerdConfig::read(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, GoerdConfig::default());
    }
}
