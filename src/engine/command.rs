//! engine::command
//!
//! Persistence commands and the executor that runs them.
//!
//! # Architecture
//!
//! Every durable change to a container or template is expressed as a
//! [`Command`] and submitted to a [`CommandExecutor`]. The executor either
//! applies the whole command or fails with a [`CommandError`]; callers never
//! observe a half-applied command.
//!
//! Validation failures, permission denials and constraint violations are all
//! collapsed into the single [`CommandError`] kind at this boundary.
//!
//! # Example
//!
//! ```
//! use templatework::engine::command::{Actor, Command, CommandExecutor};
//! use templatework::engine::mock::MockExecutor;
//! use templatework::core::model::Container;
//! use templatework::core::types::ContainerId;
//!
//! let executor = MockExecutor::with_containers(vec![Container::new(ContainerId::new(1), "root")]);
//! let actor = Actor::new("admin");
//!
//! let mut root = Container::new(ContainerId::new(1), "root");
//! root.alias = "renamed".to_string();
//! let outcome = executor.submit(&actor, Command::UpdateContainer { container: root }).unwrap();
//! assert_eq!(outcome.into_container().unwrap().alias, "renamed");
//! ```

use std::fmt;

use thiserror::Error;

use crate::core::model::{Container, Lineage, Template};
use crate::core::types::{ContainerId, TemplateId};

/// The user on whose behalf a command is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor(String);

impl Actor {
    /// Create an actor from a user name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The user name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persistence mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Persist a new template under a container.
    CreateTemplate {
        container: ContainerId,
        template: Template,
    },
    /// Persist the given container state (default template, template list).
    UpdateContainer { container: Container },
    /// Persist the inheritance flag (and the default it implied).
    UpdateInheritanceRoot { container: Container, inherit: bool },
    /// Remove a template from its owning container.
    DeleteTemplate {
        container: ContainerId,
        template: TemplateId,
    },
}

/// Discriminant of a [`Command`], used for logging and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    CreateTemplate,
    UpdateContainer,
    UpdateInheritanceRoot,
    DeleteTemplate,
}

impl CommandKind {
    /// Stable name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::CreateTemplate => "create-template",
            CommandKind::UpdateContainer => "update-container",
            CommandKind::UpdateInheritanceRoot => "update-inheritance-root",
            CommandKind::DeleteTemplate => "delete-template",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Command {
    /// The kind of this command.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::CreateTemplate { .. } => CommandKind::CreateTemplate,
            Command::UpdateContainer { .. } => CommandKind::UpdateContainer,
            Command::UpdateInheritanceRoot { .. } => CommandKind::UpdateInheritanceRoot,
            Command::DeleteTemplate { .. } => CommandKind::DeleteTemplate,
        }
    }

    /// The container this command targets.
    pub fn target(&self) -> ContainerId {
        match self {
            Command::CreateTemplate { container, .. }
            | Command::DeleteTemplate { container, .. } => *container,
            Command::UpdateContainer { container }
            | Command::UpdateInheritanceRoot { container, .. } => container.id,
        }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The template as persisted.
    Template(Template),
    /// The container as persisted.
    Container(Container),
}

impl CommandOutcome {
    /// The persisted template, if this outcome carries one.
    pub fn into_template(self) -> Option<Template> {
        match self {
            CommandOutcome::Template(t) => Some(t),
            CommandOutcome::Container(_) => None,
        }
    }

    /// The persisted container, if this outcome carries one.
    pub fn into_container(self) -> Option<Container> {
        match self {
            CommandOutcome::Container(c) => Some(c),
            CommandOutcome::Template(_) => None,
        }
    }
}

/// Failure of a persistence command.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} failed: {reason}")]
pub struct CommandError {
    /// Which command failed.
    pub kind: CommandKind,
    /// Human-readable cause.
    pub reason: String,
}

impl CommandError {
    /// Create a new command error.
    pub fn new(kind: CommandKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Executes persistence commands.
///
/// Implementations must apply a command completely or not at all.
pub trait CommandExecutor {
    /// Execute `command` on behalf of `actor`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the command was rejected or could not be
    /// persisted. Nothing is persisted in that case.
    fn submit(&self, actor: &Actor, command: Command) -> Result<CommandOutcome, CommandError>;
}

/// Resolves containers by id.
pub trait ContainerLookup {
    /// Return the container, or `None` if it does not exist.
    fn find(&self, id: ContainerId) -> Option<Container>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn submit(&self, actor: &Actor, command: Command) -> Result<CommandOutcome, CommandError> {
        (**self).submit(actor, command)
    }
}

impl<T: ContainerLookup + ?Sized> ContainerLookup for &T {
    fn find(&self, id: ContainerId) -> Option<Container> {
        (**self).find(id)
    }
}

/// Resolve a container and its immediate parent into a lineage.
///
/// Returns `None` if the container does not exist. A parent that cannot be
/// resolved is treated as absent.
pub fn load_lineage<L: ContainerLookup + ?Sized>(
    lookup: &L,
    id: ContainerId,
) -> Option<Lineage> {
    let container = lookup.find(id)?;
    let parent = container.owner.and_then(|owner| {
        let parent = lookup.find(owner);
        if parent.is_none() {
            log::warn!("parent {} of container {} not found", owner, id);
        }
        parent
    });
    Some(Lineage { container, parent })
}
