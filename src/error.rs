use crate::oracle::OracleError;
use std::path::PathBuf;
use thiserror::Error;

/// Docgraph error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Invalid program snapshot: {0}")]
    Snapshot(String),

    #[error("Unknown entry unit: {0}")]
    UnknownEntry(String),

    #[error("Registry invariant violated: {0}")]
    Registry(String),

    #[error("Failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: Box<Error>,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for Docgraph operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a snapshot validation error
    pub fn snapshot(msg: impl Into<String>) -> Self {
        Error::Snapshot(msg.into())
    }

    /// Create a registry invariant error
    pub fn registry(msg: impl Into<String>) -> Self {
        Error::Registry(msg.into())
    }

    /// Wrap an error with the debug path of the node that failed.
    ///
    /// Nested wrapping keeps the innermost path, which is the most precise.
    pub fn at(self, path: impl Into<String>) -> Self {
        match self {
            located @ Error::Serialize { .. } => located,
            other => Error::Serialize {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
