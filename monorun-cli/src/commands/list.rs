//! `monorun list`: show what the workspace would fan out to.

use anyhow::{Context as _, Result};
use clap::Args;
use monorun_core::Unit;
use monorun_runner::RunOutcome;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use super::Context;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ListJson<'a> {
    applications: &'a [Unit],
    libraries: &'a [Unit],
}

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "path")]
    path: String,
}

impl ListArgs {
    pub fn run(self, ctx: &Context) -> Result<RunOutcome> {
        let apps = ctx
            .workspace
            .list_applications()
            .context("failed to list applications")?;
        let libraries = ctx
            .workspace
            .list_libraries()
            .context("failed to list shared libraries")?;

        if self.json {
            let payload = ListJson {
                applications: &apps,
                libraries: &libraries,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize list JSON")?
            );
            return Ok(RunOutcome::Success);
        }

        if apps.is_empty() && libraries.is_empty() {
            println!("No applications or libraries found.");
            return Ok(RunOutcome::Success);
        }

        let rows: Vec<UnitRow> = apps
            .iter()
            .chain(&libraries)
            .map(|unit| UnitRow {
                kind: unit.kind.to_string(),
                name: unit.name.to_string(),
                path: relative(ctx, unit),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(RunOutcome::Success)
    }
}

fn relative(ctx: &Context, unit: &Unit) -> String {
    unit.dir
        .strip_prefix(ctx.workspace.root())
        .unwrap_or(&unit.dir)
        .display()
        .to_string()
}
