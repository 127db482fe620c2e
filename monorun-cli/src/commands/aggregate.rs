//! `monorun build|test|lint|docker|clean`: one operation across the workspace.

use anyhow::{Context as _, Result};
use monorun_core::Operation;
use monorun_runner::RunOutcome;

use super::Context;

pub fn run(ctx: &Context, operation: Operation) -> Result<RunOutcome> {
    ctx.orchestrate(|o| o.run_all(operation))
        .with_context(|| format!("{operation} aborted"))
}
