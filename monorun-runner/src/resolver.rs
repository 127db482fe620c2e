//! Single-application targets: static aliases and the `run-<name>` pattern.
//!
//! Rules are tried in order and the first match wins, so a configured alias
//! always shadows the wildcard even when it reads like `run-<something>`.

use monorun_core::{Operation, UnitName};

/// Prefix of the wildcard target.
pub const RUN_PREFIX: &str = "run-";

/// How a top-level target name maps onto one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Static alias: every residual goal is forwarded untouched.
    Alias { app: UnitName, goals: Vec<String> },
    /// `run-<name>`: always the single goal `run`.
    Wildcard { app: UnitName },
}

impl Resolution {
    pub fn app(&self) -> &UnitName {
        match self {
            Resolution::Alias { app, .. } | Resolution::Wildcard { app } => app,
        }
    }

    /// Goals handed to the application's build definition.
    pub fn goals(&self) -> Vec<String> {
        match self {
            Resolution::Alias { goals, .. } => goals.clone(),
            Resolution::Wildcard { .. } => vec![Operation::Run.to_string()],
        }
    }
}

type Rule = fn(&str, &[String], &[String]) -> Option<Resolution>;

const RULES: [Rule; 2] = [match_alias, match_wildcard];

/// Resolve `target` against `aliases`, then the wildcard pattern.
pub fn resolve(target: &str, aliases: &[String], extra_goals: &[String]) -> Option<Resolution> {
    RULES
        .iter()
        .find_map(|rule| rule(target, aliases, extra_goals))
}

fn match_alias(target: &str, aliases: &[String], extra_goals: &[String]) -> Option<Resolution> {
    aliases
        .iter()
        .any(|alias| alias == target)
        .then(|| Resolution::Alias {
            app: UnitName::from(target),
            goals: extra_goals.to_vec(),
        })
}

fn match_wildcard(target: &str, _aliases: &[String], extra_goals: &[String]) -> Option<Resolution> {
    let name = target.strip_prefix(RUN_PREFIX).filter(|n| !n.is_empty())?;
    if !extra_goals.is_empty() {
        tracing::debug!(
            target_name = target,
            ignored = ?extra_goals,
            "wildcard target ignores extra goals"
        );
    }
    Some(Resolution::Wildcard {
        app: UnitName::from(name),
    })
}
