//! Subcommand implementations.

pub mod aggregate;
pub mod list;
pub mod target;

use std::path::Path;

use anyhow::{Context as _, Result};
use monorun_core::Workspace;
use monorun_runner::{
    CommandDispatcher, Dispatch, DryRunDispatcher, Orchestrator, RunError, RunOutcome,
};

use crate::output::ConsoleReporter;

/// Per-invocation state shared by every subcommand.
pub struct Context {
    pub workspace: Workspace,
    pub dry_run: bool,
}

impl Context {
    pub fn open(root: &Path, dry_run: bool) -> Result<Self> {
        let root = root
            .canonicalize()
            .with_context(|| format!("cannot resolve workspace '{}'", root.display()))?;
        let workspace = Workspace::open(&root)
            .with_context(|| format!("failed to open workspace at '{}'", root.display()))?;
        Ok(Self { workspace, dry_run })
    }

    /// Run `f` against an orchestrator wired to the console and to either
    /// real sub-builds or the dry-run printer.
    pub fn orchestrate(
        &self,
        f: impl FnOnce(&mut Orchestrator<'_>) -> Result<RunOutcome, RunError>,
    ) -> Result<RunOutcome, RunError> {
        let config = self.workspace.config();
        let mut dispatcher: Box<dyn Dispatch> = if self.dry_run {
            Box::new(DryRunDispatcher::new(config, std::io::stdout()))
        } else {
            Box::new(CommandDispatcher::new(config))
        };
        let mut reporter = ConsoleReporter;
        let mut orchestrator =
            Orchestrator::new(&self.workspace, dispatcher.as_mut(), &mut reporter)
                .dry_run(self.dry_run);
        f(&mut orchestrator)
    }
}
