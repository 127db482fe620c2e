//! monorun core library: domain types and workspace discovery.
//!
//! - [`types`]: unit names, kinds and lifecycle operations
//! - [`config`]: optional `monorun.yaml`
//! - [`layout`]: [`Workspace`] and directory-listing discovery
//! - [`error`]: [`WorkspaceError`]

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

pub use config::{LibraryCommands, WorkspaceConfig};
pub use error::WorkspaceError;
pub use layout::Workspace;
pub use types::{Operation, Unit, UnitKind, UnitName};
