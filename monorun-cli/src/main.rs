//! monorun: one entry point for every application in a monorepo.
//!
//! # Usage
//!
//! ```text
//! monorun [build]                    provision bin/, build every app
//! monorun test | lint                every app, then every shared library
//! monorun docker | clean             every app (clean also empties bin/)
//! monorun <alias> [goals...]         forward goals to one aliased app
//! monorun run-<name>                 run one app
//! monorun list [--json]              show discovered apps and libraries
//! ```
//!
//! Global flags: `-C <dir>` workspace root, `--dry-run`, `-v`/`-vv`.

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use commands::{list::ListArgs, Context};
use monorun_core::Operation;
use monorun_runner::RunOutcome;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "monorun",
    version,
    about = "Fan lifecycle operations out to every application in a monorepo",
    long_about = None,
    allow_external_subcommands = true,
)]
struct Cli {
    /// Workspace root containing the applications and libraries roots.
    #[arg(
        short = 'C',
        long = "workspace",
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    workspace: PathBuf,

    /// Print each sub-build command instead of running it.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Provision the output directory, then build every application (default).
    Build,

    /// Test every application, then every shared library.
    Test,

    /// Lint every application, then every shared library.
    Lint,

    /// Produce a deployable image for every application.
    Docker,

    /// Clean every application, then empty the output directory.
    Clean,

    /// List discovered applications and shared libraries.
    List(ListArgs),

    /// `<alias> [goals...]` or `run-<name>`.
    #[command(external_subcommand)]
    Target(Vec<String>),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(outcome) => exit_code(outcome),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<RunOutcome> {
    let ctx = Context::open(&cli.workspace, cli.dry_run)?;
    tracing::debug!(
        root = %ctx.workspace.root().display(),
        dry_run = ctx.dry_run,
        "workspace opened"
    );
    let outcome = match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => commands::aggregate::run(&ctx, Operation::Build)?,
        Commands::Test => commands::aggregate::run(&ctx, Operation::Test)?,
        Commands::Lint => commands::aggregate::run(&ctx, Operation::Lint)?,
        Commands::Docker => commands::aggregate::run(&ctx, Operation::Docker)?,
        Commands::Clean => commands::aggregate::run(&ctx, Operation::Clean)?,
        Commands::List(args) => args.run(&ctx)?,
        Commands::Target(argv) => commands::target::run(&ctx, &argv)?,
    };
    Ok(outcome)
}

fn exit_code(outcome: RunOutcome) -> ExitCode {
    ExitCode::from(u8::try_from(outcome.exit_code()).unwrap_or(1))
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
