//! Error types for monorun-runner.

use std::path::PathBuf;

use thiserror::Error;

use monorun_core::{Operation, WorkspaceError};

/// Fatal errors. A sub-build that merely fails is a
/// [`RunOutcome`](crate::RunOutcome), not an error.
#[derive(Debug, Error)]
pub enum RunError {
    /// Discovery or config failure.
    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    /// Output directory could not be provisioned or cleared.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build tool or library command could not be started at all.
    #[error("failed to start '{program}' in {dir}: {source}")]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configured command has no program (e.g. `build_tool: []`).
    #[error("{0} is empty")]
    EmptyCommand(&'static str),

    #[error("shared libraries have no '{0}' command")]
    NoLibraryCommand(Operation),

    #[error("'{0}' cannot run across the whole workspace")]
    NotAggregate(Operation),

    #[error("unknown target '{0}'; expected a configured alias or run-<name>")]
    UnknownTarget(String),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RunError {
    RunError::Io {
        path: path.into(),
        source,
    }
}
