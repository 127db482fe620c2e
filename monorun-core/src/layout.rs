//! Workspace layout: unit discovery by directory listing.
//!
//! # Layout
//!
//! ```text
//! <root>/
//!   monorun.yaml      (optional)
//!   apps/<name>/      one directory per application
//!   pkg/<name>/       one directory per shared library
//!   bin/              build output
//! ```
//!
//! Discovery is never cached: every `list_*` call re-reads the filesystem, so
//! applications can come and go between runs without registration.

use std::path::{Path, PathBuf};

use crate::config::{self, WorkspaceConfig};
use crate::error::{io_err, WorkspaceError};
use crate::types::{Unit, UnitKind, UnitName};

/// A workspace root together with its resolved config.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
}

impl Workspace {
    /// Open the workspace at `root`, loading `monorun.yaml` if present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        let config = config::load_at(&root)?;
        Ok(Self { root, config })
    }

    /// Build a workspace from an explicit config (no file is read).
    pub fn with_config(root: impl Into<PathBuf>, config: WorkspaceConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn apps_root(&self) -> PathBuf {
        self.root.join(&self.config.apps_dir)
    }

    pub fn libs_root(&self) -> PathBuf {
        self.root.join(&self.config.libs_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    /// The application called `name`, whether or not its directory exists.
    pub fn application(&self, name: impl Into<UnitName>) -> Unit {
        let name = name.into();
        Unit {
            dir: self.apps_root().join(&name.0),
            name,
            kind: UnitKind::Application,
        }
    }

    /// Snapshot of the applications root.
    pub fn list_applications(&self) -> Result<Vec<Unit>, WorkspaceError> {
        list_units_at(&self.apps_root(), UnitKind::Application)
    }

    /// Snapshot of the shared-libraries root.
    pub fn list_libraries(&self) -> Result<Vec<Unit>, WorkspaceError> {
        list_units_at(&self.libs_root(), UnitKind::Library)
    }
}

/// List the subdirectories of `root` as units of `kind`, sorted by name.
///
/// Plain files are skipped. A missing root is `WorkspaceError::RootNotFound`.
pub fn list_units_at(root: &Path, kind: UnitKind) -> Result<Vec<Unit>, WorkspaceError> {
    if !root.is_dir() {
        return Err(WorkspaceError::RootNotFound {
            kind,
            path: root.to_path_buf(),
        });
    }

    let mut units = Vec::new();
    for entry in std::fs::read_dir(root).map_err(|e| io_err(root, e))? {
        let entry = entry.map_err(|e| io_err(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        units.push(Unit {
            name: UnitName::from(entry.file_name().to_string_lossy().into_owned()),
            kind,
            dir: path,
        });
    }
    units.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(root = %root.display(), %kind, count = units.len(), "discovered units");
    Ok(units)
}
