//! Human-facing progress events emitted while a run is in flight.

use std::path::PathBuf;

use monorun_core::{Operation, Unit};

use crate::RunOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Output directory provisioned ahead of `build`.
    Provisioned { dir: PathBuf },
    /// A dispatch is about to start. `goals` is empty when an alias is
    /// invoked without residual goals.
    Started { unit: Unit, goals: Vec<String> },
    /// The dispatch in flight failed; nothing further will run.
    Failed {
        unit: Unit,
        goals: Vec<String>,
        outcome: RunOutcome,
    },
    /// Output directory emptied after every application cleaned.
    Cleared { dir: PathBuf, removed: usize },
    /// Every unit of an aggregate operation succeeded.
    Finished { operation: Operation, units: usize },
}

/// Receives progress events in the order they happen.
pub trait Reporter {
    fn report(&mut self, event: ProgressEvent);
}

impl<F: FnMut(ProgressEvent)> Reporter for F {
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}
