//! Aggregate runs and single-target runs over a workspace.
//!
//! Everything is sequential. The first failing dispatch ends the run and its
//! outcome becomes the run's outcome; later units are never attempted.

use monorun_core::{Operation, Unit, Workspace};

use crate::dispatch::{Dispatch, RunOutcome};
use crate::error::RunError;
use crate::progress::{ProgressEvent, Reporter};
use crate::provision;
use crate::resolver;

/// Drives dispatches for one top-level invocation.
pub struct Orchestrator<'a> {
    workspace: &'a Workspace,
    dispatcher: &'a mut dyn Dispatch,
    reporter: &'a mut dyn Reporter,
    dry_run: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        workspace: &'a Workspace,
        dispatcher: &'a mut dyn Dispatch,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            workspace,
            dispatcher,
            reporter,
            dry_run: false,
        }
    }

    /// Leave the output directory untouched (no provisioning, no clearing).
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run `operation` across every application, then every library for
    /// test/lint.
    ///
    /// Discovery happens once, before any dispatch. `build` provisions the
    /// output directory first; `clean` empties it last.
    pub fn run_all(&mut self, operation: Operation) -> Result<RunOutcome, RunError> {
        if !operation.is_aggregate() {
            return Err(RunError::NotAggregate(operation));
        }
        // Configs built in code skip `load_at`; provisioning and clearing
        // must never see an output_dir that escapes or swallows a units root.
        self.workspace.config().validate()?;

        if operation == Operation::Build && !self.dry_run {
            let dir = self.workspace.output_dir();
            provision::ensure_output_dir(&dir)?;
            self.reporter.report(ProgressEvent::Provisioned { dir });
        }

        let apps = self.workspace.list_applications()?;
        let libraries = if operation.covers_libraries() {
            self.workspace.list_libraries()?
        } else {
            Vec::new()
        };
        tracing::info!(
            %operation,
            applications = apps.len(),
            libraries = libraries.len(),
            "starting aggregate run"
        );

        let goals = vec![operation.to_string()];
        for app in &apps {
            let outcome = self.step(app, &goals, |d| d.dispatch(app, &goals))?;
            if !outcome.is_success() {
                return Ok(outcome);
            }
        }
        for library in &libraries {
            let outcome =
                self.step(library, &goals, |d| d.dispatch_library(library, operation))?;
            if !outcome.is_success() {
                return Ok(outcome);
            }
        }

        if operation == Operation::Clean && !self.dry_run {
            let dir = self.workspace.output_dir();
            let removed = provision::clear_output_dir(&dir)?;
            self.reporter.report(ProgressEvent::Cleared { dir, removed });
        }

        self.reporter.report(ProgressEvent::Finished {
            operation,
            units: apps.len() + libraries.len(),
        });
        Ok(RunOutcome::Success)
    }

    /// Resolve `target` to one application and dispatch to it alone.
    ///
    /// The application is not checked against discovery; a missing directory
    /// surfaces as an ordinary failed outcome.
    pub fn resolve_and_run(
        &mut self,
        target: &str,
        extra_goals: &[String],
    ) -> Result<RunOutcome, RunError> {
        let resolution = resolver::resolve(target, &self.workspace.config().aliases, extra_goals)
            .ok_or_else(|| RunError::UnknownTarget(target.to_string()))?;
        tracing::debug!(?resolution, "resolved target");

        let app = self.workspace.application(resolution.app().clone());
        let goals = resolution.goals();
        self.step(&app, &goals, |d| d.dispatch(&app, &goals))
    }

    fn step(
        &mut self,
        unit: &Unit,
        goals: &[String],
        run: impl FnOnce(&mut dyn Dispatch) -> Result<RunOutcome, RunError>,
    ) -> Result<RunOutcome, RunError> {
        self.reporter.report(ProgressEvent::Started {
            unit: unit.clone(),
            goals: goals.to_vec(),
        });
        let outcome = run(&mut *self.dispatcher)?;
        if !outcome.is_success() {
            self.reporter.report(ProgressEvent::Failed {
                unit: unit.clone(),
                goals: goals.to_vec(),
                outcome,
            });
        }
        Ok(outcome)
    }
}
