//! Error types for goerd.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort an analysis run.
///
/// Shapes the model cannot express are not errors: they are lowered to
/// [`crate::TypeExpr::Unrepresented`] and reported as warnings.
#[derive(Debug, Error)]
pub enum GoerdError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid graph route {route:?}: routes must start with '/'")]
    Route { route: String },

    #[error("failed to list source files: {0}")]
    Walk(#[from] ignore::Error),

    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree for {}", path.display())]
    Parse { path: PathBuf },

    #[error("{}:{line}:{column}: syntax error", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("{}: missing package clause", path.display())]
    MissingPackage { path: PathBuf },

    #[error("failed to write graph: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode graph as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

impl GoerdError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GoerdError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error comes from the Go sources being unparsable.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            GoerdError::Parse { .. } | GoerdError::Syntax { .. } | GoerdError::MissingPackage { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GoerdError>;
