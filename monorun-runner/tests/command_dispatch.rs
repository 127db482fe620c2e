//! End-to-end aggregate runs with real `sh` sub-builds.
//!
//! Each application's build definition is a `build.sh` that appends
//! `<app> <goals>` to `<root>/dispatch.log` and exits 4 when its `fail_goal`
//! file names the first goal.
#![cfg(unix)]

use std::fs;
use std::path::Path;

use assert_fs::prelude::*;
use monorun_core::{LibraryCommands, Operation, Workspace, WorkspaceConfig};
use monorun_runner::{CommandDispatcher, Orchestrator, ProgressEvent, RunOutcome};
use predicates::prelude::predicate;

const BUILD_SH: &str = r#"app="${PWD##*/}"
printf '%s %s\n' "$app" "$*" >> ../../dispatch.log
if [ -f fail_goal ] && [ "$(cat fail_goal)" = "$1" ]; then
  exit 4
fi
"#;

fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}

fn workspace(root: &assert_fs::TempDir, apps: &[&str], libs: &[&str]) -> Workspace {
    root.child("apps").create_dir_all().expect("apps");
    root.child("pkg").create_dir_all().expect("pkg");
    for app in apps {
        let dir = root.child("apps").child(app);
        dir.create_dir_all().expect("app dir");
        dir.child("build.sh").write_str(BUILD_SH).expect("build.sh");
    }
    for lib in libs {
        root.child("pkg").child(lib).create_dir_all().expect("lib");
    }
    let config = WorkspaceConfig {
        build_tool: vec!["sh".to_string(), "build.sh".to_string()],
        aliases: vec!["api".to_string()],
        library_commands: LibraryCommands {
            test: sh(r#"printf 'lib %s test\n' "${PWD##*/}" >> ../../dispatch.log"#),
            lint: sh(r#"printf 'lib %s lint\n' "${PWD##*/}" >> ../../dispatch.log"#),
        },
        ..WorkspaceConfig::default()
    };
    Workspace::with_config(root.path(), config)
}

fn dispatch_log(root: &Path) -> Vec<String> {
    fs::read_to_string(root.join("dispatch.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn run_all(ws: &Workspace, op: Operation) -> (RunOutcome, Vec<ProgressEvent>) {
    let mut dispatcher = CommandDispatcher::new(ws.config());
    let mut events = Vec::new();
    let mut reporter = |event: ProgressEvent| events.push(event);
    let outcome = Orchestrator::new(ws, &mut dispatcher, &mut reporter)
        .run_all(op)
        .expect("run_all");
    (outcome, events)
}

#[test]
fn build_scenario_alpha_then_failing_beta() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = workspace(&root, &["alpha", "beta", "gamma"], &[]);
    root.child("apps/beta/fail_goal").write_str("build").expect("fail marker");

    let (outcome, events) = run_all(&ws, Operation::Build);

    assert_eq!(outcome, RunOutcome::Failed { code: Some(4) });
    assert_eq!(dispatch_log(root.path()), vec!["alpha build", "beta build"]);
    root.child("bin").assert(predicate::path::is_dir());
    match events.last() {
        Some(ProgressEvent::Failed { unit, goals, .. }) => {
            assert_eq!(unit.name.to_string(), "beta");
            assert_eq!(goals, &vec!["build".to_string()]);
        }
        other => panic!("last event should name the failure, got {other:?}"),
    }
}

#[test]
fn lint_runs_native_library_command_after_apps() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = workspace(&root, &["api", "web"], &["auth"]);

    let (outcome, _) = run_all(&ws, Operation::Lint);

    assert!(outcome.is_success());
    assert_eq!(
        dispatch_log(root.path()),
        vec!["api lint", "web lint", "lib auth lint"]
    );
}

#[test]
fn clean_empties_bin_after_every_app() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = workspace(&root, &["api"], &[]);
    root.child("bin").create_dir_all().expect("bin");
    root.child("bin/api").write_str("artifact").expect("artifact");

    let (outcome, _) = run_all(&ws, Operation::Clean);

    assert!(outcome.is_success());
    root.child("bin").assert(predicate::path::is_dir());
    root.child("bin/api").assert(predicate::path::missing());
    assert_eq!(dispatch_log(root.path()), vec!["api clean"]);
}

#[test]
fn wildcard_into_missing_directory_fails_like_a_sub_build() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = workspace(&root, &["api"], &[]);
    let mut dispatcher = CommandDispatcher::new(ws.config());
    let mut reporter = |_event: ProgressEvent| {};

    let outcome = Orchestrator::new(&ws, &mut dispatcher, &mut reporter)
        .resolve_and_run("run-worker", &[])
        .expect("resolve_and_run");

    assert!(!outcome.is_success());
    assert_ne!(outcome.exit_code(), 0);
    assert!(dispatch_log(root.path()).is_empty());
}

#[test]
fn alias_forwards_goals_and_exit_code() {
    let root = assert_fs::TempDir::new().expect("tempdir");
    let ws = workspace(&root, &["api"], &[]);
    root.child("apps/api/fail_goal").write_str("docker").expect("fail marker");
    let mut dispatcher = CommandDispatcher::new(ws.config());
    let mut reporter = |_event: ProgressEvent| {};

    let goals = vec!["docker".to_string(), "build".to_string()];
    let outcome = Orchestrator::new(&ws, &mut dispatcher, &mut reporter)
        .resolve_and_run("api", &goals)
        .expect("resolve_and_run");

    assert_eq!(outcome.exit_code(), 4);
    assert_eq!(dispatch_log(root.path()), vec!["api docker build"]);
}
