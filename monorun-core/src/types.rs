//! Domain types for a monorun workspace.
//!
//! Units are transient: they are materialised from a directory listing on
//! every invocation and never persisted.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// The directory name of an application or shared library.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitName(pub String);

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for UnitName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UnitName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which workspace root a unit was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Lives under the applications root and owns a build definition.
    Application,
    /// Lives under the shared-libraries root; tested and linted natively.
    Library,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Application => write!(f, "application"),
            UnitKind::Library => write!(f, "library"),
        }
    }
}

/// A lifecycle goal understood by every application's build definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Build,
    Test,
    Lint,
    Docker,
    Clean,
    Run,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Build,
        Operation::Test,
        Operation::Lint,
        Operation::Docker,
        Operation::Clean,
        Operation::Run,
    ];

    /// The goal name passed to a build definition.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Test => "test",
            Operation::Lint => "lint",
            Operation::Docker => "docker",
            Operation::Clean => "clean",
            Operation::Run => "run",
        }
    }

    /// `run` only ever targets a single application.
    pub fn is_aggregate(self) -> bool {
        !matches!(self, Operation::Run)
    }

    /// Whether the workspace-wide form also visits shared libraries.
    pub fn covers_libraries(self) -> bool {
        matches!(self, Operation::Test | Operation::Lint)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                format!("unknown operation '{s}'; expected: build, test, lint, docker, clean, run")
            })
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// An application or shared library found in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub name: UnitName,
    pub kind: UnitKind,
    /// Root-joined directory; not guaranteed to exist for resolved targets.
    pub dir: PathBuf,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
