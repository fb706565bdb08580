//! CLI error types.

use std::path::PathBuf;

use mantle_docs_config::ConfigError;
use mantle_docs_nav::NavError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Nav(#[from] NavError),

    #[error("{}: {source}", path.display())]
    Sidebar { path: PathBuf, source: NavError },

    #[error("Version {label}: {source}")]
    Version { label: String, source: NavError },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
