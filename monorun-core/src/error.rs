//! Error types for monorun-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::UnitKind;

/// All errors that can arise while reading the workspace layout or config.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// I/O failure with the path that was being read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An applications or libraries root is missing.
    #[error("{kind} root not found at {path}")]
    RootNotFound { kind: UnitKind, path: PathBuf },

    /// `monorun.yaml` exists but is malformed.
    #[error("failed to parse workspace config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config parsed but describes something unusable.
    #[error("invalid workspace config: {0}")]
    InvalidConfig(String),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WorkspaceError {
    WorkspaceError::Io {
        path: path.into(),
        source,
    }
}
