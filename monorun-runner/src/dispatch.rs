//! Sub-build dispatch: run one unit's own build definition and report how it
//! exited.
//!
//! The dispatcher knows nothing about what a goal means for an application.
//! It changes into the unit directory, runs the configured program with the
//! goals appended and hands back the exit status.

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus};
use std::time::Instant;

use monorun_core::{LibraryCommands, Operation, Unit, WorkspaceConfig};

use crate::error::RunError;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Pass/fail result of one dispatch or of a whole aggregate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Success,
    /// `code` is `None` when the process was killed by a signal or never
    /// started because the unit directory is missing.
    Failed { code: Option<i32> },
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, RunOutcome::Success)
    }

    /// Process exit code to propagate; failures never map to 0.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failed { code } => code.filter(|c| *c != 0).unwrap_or(1),
        }
    }
}

impl From<ExitStatus> for RunOutcome {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            RunOutcome::Success
        } else {
            RunOutcome::Failed {
                code: status.code(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch seam
// ---------------------------------------------------------------------------

/// Delegation boundary between the orchestrator and the external builds.
pub trait Dispatch {
    /// Invoke `app`'s build definition with `goals` (possibly empty).
    fn dispatch(&mut self, app: &Unit, goals: &[String]) -> Result<RunOutcome, RunError>;

    /// Run the native `op` command inside a shared library.
    fn dispatch_library(&mut self, library: &Unit, op: Operation)
        -> Result<RunOutcome, RunError>;
}

/// Spawns real processes, one at a time, blocking until each exits.
#[derive(Debug, Clone)]
pub struct CommandDispatcher {
    build_tool: Vec<String>,
    library_commands: LibraryCommands,
}

impl CommandDispatcher {
    pub fn new(config: &WorkspaceConfig) -> Self {
        Self {
            build_tool: config.build_tool.clone(),
            library_commands: config.library_commands.clone(),
        }
    }
}

impl Dispatch for CommandDispatcher {
    fn dispatch(&mut self, app: &Unit, goals: &[String]) -> Result<RunOutcome, RunError> {
        run_in(&app.dir, &self.build_tool, goals, "build_tool")
    }

    fn dispatch_library(
        &mut self,
        library: &Unit,
        op: Operation,
    ) -> Result<RunOutcome, RunError> {
        let command = self
            .library_commands
            .for_operation(op)
            .ok_or(RunError::NoLibraryCommand(op))?;
        run_in(&library.dir, command, &[], "library command")
    }
}

fn run_in(
    dir: &Path,
    command: &[String],
    goals: &[String],
    what: &'static str,
) -> Result<RunOutcome, RunError> {
    let Some((program, args)) = command.split_first() else {
        return Err(RunError::EmptyCommand(what));
    };

    // A missing unit directory fails like any other sub-build.
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "unit directory does not exist");
        return Ok(RunOutcome::Failed { code: None });
    }

    tracing::debug!(
        dir = %dir.display(),
        command = %render(command, goals),
        "spawning sub-build"
    );
    let started = Instant::now();
    let status = Command::new(program)
        .args(args)
        .args(goals)
        .current_dir(dir)
        .status()
        .map_err(|source| RunError::Spawn {
            program: program.clone(),
            dir: dir.to_path_buf(),
            source,
        })?;

    let outcome = RunOutcome::from(status);
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    if outcome.is_success() {
        tracing::info!(dir = %dir.display(), duration_ms, "sub-build succeeded");
    } else {
        tracing::error!(dir = %dir.display(), %status, duration_ms, "sub-build failed");
    }
    Ok(outcome)
}

fn render(command: &[String], goals: &[String]) -> String {
    command
        .iter()
        .chain(goals)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Dry run
// ---------------------------------------------------------------------------

/// Writes the command each dispatch would run and reports success.
pub struct DryRunDispatcher<W: Write> {
    out: W,
    build_tool: Vec<String>,
    library_commands: LibraryCommands,
}

impl<W: Write> DryRunDispatcher<W> {
    pub fn new(config: &WorkspaceConfig, out: W) -> Self {
        Self {
            out,
            build_tool: config.build_tool.clone(),
            library_commands: config.library_commands.clone(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn plan(
        out: &mut W,
        dir: &Path,
        command: &[String],
        goals: &[String],
    ) -> Result<(), RunError> {
        writeln!(
            out,
            "[dry-run] (cd {} && {})",
            dir.display(),
            render(command, goals)
        )
        .map_err(|e| crate::error::io_err("<dry-run output>", e))
    }
}

impl<W: Write> Dispatch for DryRunDispatcher<W> {
    fn dispatch(&mut self, app: &Unit, goals: &[String]) -> Result<RunOutcome, RunError> {
        Self::plan(&mut self.out, &app.dir, &self.build_tool, goals)?;
        Ok(RunOutcome::Success)
    }

    fn dispatch_library(
        &mut self,
        library: &Unit,
        op: Operation,
    ) -> Result<RunOutcome, RunError> {
        let command = self
            .library_commands
            .for_operation(op)
            .ok_or(RunError::NoLibraryCommand(op))?;
        Self::plan(&mut self.out, &library.dir, command, &[])?;
        Ok(RunOutcome::Success)
    }
}
