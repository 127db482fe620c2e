//! Optional per-workspace configuration (`<root>/monorun.yaml`).
//!
//! Every field has a default, so a workspace without the file behaves like
//! the conventional `apps/` + `pkg/` + `bin/` layout driven by `make`.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, WorkspaceError};
use crate::types::Operation;

/// File name looked up at the workspace root.
pub const CONFIG_FILE: &str = "monorun.yaml";

/// Top-level commands that always win over an alias of the same name.
pub const RESERVED_TARGETS: [&str; 7] =
    ["build", "test", "lint", "docker", "clean", "list", "help"];

/// Layout and tooling for one workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// Applications root, relative to the workspace root.
    pub apps_dir: PathBuf,
    /// Shared-libraries root, relative to the workspace root.
    pub libs_dir: PathBuf,
    /// Top-level artifact directory provisioned by `build`, emptied by `clean`.
    pub output_dir: PathBuf,
    /// Program plus leading arguments; goals are appended.
    pub build_tool: Vec<String>,
    /// Application names reachable directly as top-level targets.
    pub aliases: Vec<String>,
    pub library_commands: LibraryCommands,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            apps_dir: PathBuf::from("apps"),
            libs_dir: PathBuf::from("pkg"),
            output_dir: PathBuf::from("bin"),
            build_tool: vec!["make".to_string()],
            aliases: Vec::new(),
            library_commands: LibraryCommands::default(),
        }
    }
}

/// Native commands run inside each shared-library directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryCommands {
    pub test: Vec<String>,
    pub lint: Vec<String>,
}

impl Default for LibraryCommands {
    fn default() -> Self {
        Self {
            test: words(&["go", "test", "./..."]),
            lint: words(&["go", "vet", "./..."]),
        }
    }
}

impl LibraryCommands {
    /// The command for `op`, or `None` when libraries do not take part in it.
    pub fn for_operation(&self, op: Operation) -> Option<&[String]> {
        match op {
            Operation::Test => Some(&self.test),
            Operation::Lint => Some(&self.lint),
            _ => None,
        }
    }
}

impl WorkspaceConfig {
    /// Reject configs that would make every dispatch fail to spawn, shadow an
    /// alias, or point `clean` at anything but a dedicated directory.
    pub fn validate(&self) -> Result<(), WorkspaceError> {
        if self.build_tool.is_empty() {
            return Err(WorkspaceError::InvalidConfig(
                "build_tool must name a program".to_string(),
            ));
        }
        for (goal, cmd) in [
            ("test", &self.library_commands.test),
            ("lint", &self.library_commands.lint),
        ] {
            if cmd.is_empty() {
                return Err(WorkspaceError::InvalidConfig(format!(
                    "library_commands.{goal} must name a program"
                )));
            }
        }
        if let Some(alias) = self.aliases.iter().find(|a| a.is_empty()) {
            return Err(WorkspaceError::InvalidConfig(format!(
                "alias '{alias}' must not be empty"
            )));
        }
        if let Some(alias) = self
            .aliases
            .iter()
            .find(|a| RESERVED_TARGETS.contains(&a.as_str()))
        {
            return Err(WorkspaceError::InvalidConfig(format!(
                "alias '{alias}' is shadowed by the built-in command of the same name"
            )));
        }
        self.validate_output_dir()
    }

    /// `output_dir` must be a relative path strictly below the workspace root
    /// that neither holds nor sits inside a units root.
    fn validate_output_dir(&self) -> Result<(), WorkspaceError> {
        let invalid = |reason: &str| {
            WorkspaceError::InvalidConfig(format!(
                "output_dir '{}' {reason}",
                self.output_dir.display()
            ))
        };

        let mut output = PathBuf::new();
        for component in self.output_dir.components() {
            match component {
                Component::Normal(part) => output.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must stay inside the workspace"));
                }
            }
        }
        if output.as_os_str().is_empty() {
            return Err(invalid("must name a directory below the workspace root"));
        }

        for (field, root) in [("apps_dir", &self.apps_dir), ("libs_dir", &self.libs_dir)] {
            let root = without_cur_dir(root);
            if output.starts_with(&root) || root.starts_with(&output) {
                return Err(invalid(&format!("overlaps {field} '{}'", root.display())));
            }
        }
        Ok(())
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Path of `<root>/monorun.yaml`. No I/O.
pub fn config_path_at(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Load the workspace config, falling back to defaults when the file is absent.
///
/// Returns `WorkspaceError::Parse` (with path) for malformed YAML and
/// `WorkspaceError::InvalidConfig` for empty commands.
pub fn load_at(root: &Path) -> Result<WorkspaceConfig, WorkspaceError> {
    let path = config_path_at(root);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no workspace config, using defaults");
        return Ok(WorkspaceConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let config: WorkspaceConfig =
        serde_yaml::from_str(&contents).map_err(|source| WorkspaceError::Parse {
            path: path.clone(),
            source,
        })?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "loaded workspace config");
    Ok(config)
}

fn words(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}
