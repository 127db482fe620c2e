//! # monorun-runner
//!
//! Fan-out of lifecycle operations across a monorun workspace.
//!
//! Build an [`Orchestrator`] over a [`Workspace`](monorun_core::Workspace)
//! with a [`Dispatch`] implementation, then call
//! [`Orchestrator::run_all`] for workspace-wide operations or
//! [`Orchestrator::resolve_and_run`] for alias and `run-<name>` targets.

pub mod dispatch;
pub mod error;
pub mod progress;
pub mod provision;
pub mod resolver;
pub mod runner;

pub use dispatch::{CommandDispatcher, Dispatch, DryRunDispatcher, RunOutcome};
pub use error::RunError;
pub use progress::{ProgressEvent, Reporter};
pub use resolver::{resolve, Resolution};
pub use runner::Orchestrator;
