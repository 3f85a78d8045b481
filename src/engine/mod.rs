//! engine
//!
//! Persistence commands and the executors that run them.
//!
//! # Architecture
//!
//! All durable changes flow through a [`CommandExecutor`]:
//!
//! ```text
//! controller -> Command -> CommandExecutor::submit -> ContainerSet::apply
//! ```
//!
//! Two executors exist: the in-memory [`mock::MockExecutor`] for tests and
//! the file-backed [`JsonStore`](crate::core::store::JsonStore). Both apply
//! commands through [`exec::ContainerSet`], so they enforce identical rules.
//!
//! # Invariants
//!
//! - A command is applied completely or not at all
//! - Controllers never change persisted state directly

pub mod command;
pub mod exec;
pub mod mock;

pub use command::{
    load_lineage, Actor, Command, CommandError, CommandExecutor, CommandKind, CommandOutcome,
    ContainerLookup,
};
pub use exec::ContainerSet;

use std::path::PathBuf;

/// Actor used when no user name is configured anywhere.
pub const ANONYMOUS_ACTOR: &str = "anonymous";

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Workspace root override.
    pub root: Option<PathBuf>,
    /// Actor override.
    pub actor: Option<String>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Resolve the workspace root: the override, or the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn root(&self) -> std::io::Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Resolve the actor.
    ///
    /// Precedence: `--actor`, then `configured`, then `$USER`, then
    /// [`ANONYMOUS_ACTOR`].
    pub fn resolve_actor(&self, configured: Option<&str>) -> Actor {
        let name = self
            .actor
            .clone()
            .or_else(|| configured.map(str::to_string))
            .or_else(|| std::env::var("USER").ok())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_ACTOR.to_string());
        Actor::new(name)
    }
}
