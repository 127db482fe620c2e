//! `monorun <alias> [goals...]` and `monorun run-<name>`.

use anyhow::{Context as _, Result};
use monorun_runner::RunOutcome;

use super::Context;

/// `argv[0]` is the target name, the rest are residual goals.
pub fn run(ctx: &Context, argv: &[String]) -> Result<RunOutcome> {
    let (target, extra_goals) = argv.split_first().context("missing target name")?;
    ctx.orchestrate(|o| o.resolve_and_run(target, extra_goals))
        .with_context(|| format!("target '{target}' aborted"))
}
