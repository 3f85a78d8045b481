//! engine::mock
//!
//! Mock command executor for deterministic testing.
//!
//! # Design
//!
//! The mock stores containers in memory, applies commands through the same
//! [`ContainerSet`] rules as the file-backed store, records every submitted
//! command and can be configured to fail a specific command kind.
//!
//! # Example
//!
//! ```
//! use templatework::core::model::Container;
//! use templatework::core::types::{ContainerId, TemplateId};
//! use templatework::engine::command::{Actor, Command, CommandExecutor, CommandKind};
//! use templatework::engine::mock::{FailOn, MockExecutor};
//!
//! let executor = MockExecutor::with_containers(vec![Container::new(ContainerId::new(1), "root")])
//!     .fail_on(FailOn::new(CommandKind::DeleteTemplate, "permission denied"));
//!
//! let result = executor.submit(
//!     &Actor::new("admin"),
//!     Command::DeleteTemplate { container: ContainerId::new(1), template: TemplateId::generate() },
//! );
//! assert!(result.is_err());
//! assert_eq!(executor.operations().len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use super::command::{
    Actor, Command, CommandError, CommandExecutor, CommandKind, CommandOutcome, ContainerLookup,
};
use super::exec::ContainerSet;
use crate::core::model::Container;
use crate::core::types::ContainerId;

/// Mock executor for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockExecutor {
    inner: Arc<Mutex<MockExecutorInner>>,
}

#[derive(Debug, Default)]
struct MockExecutorInner {
    containers: ContainerSet,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Configuration for which command kind should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailOn {
    /// The command kind to reject.
    pub kind: CommandKind,
    /// Reason reported in the error.
    pub reason: String,
}

impl FailOn {
    /// Fail every command of `kind` with `reason`.
    pub fn new(kind: CommandKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// Recorded submission for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOperation {
    /// Who submitted the command.
    pub actor: Actor,
    /// The command as submitted.
    pub command: Command,
    /// Whether the command succeeded.
    pub succeeded: bool,
}

impl MockExecutor {
    /// Create an empty mock executor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock executor with pre-existing containers.
    ///
    /// Parents must precede their children.
    ///
    /// # Panics
    ///
    /// Panics if the containers do not form a valid set (test fixture error).
    pub fn with_containers(containers: Vec<Container>) -> Self {
        let mut set = ContainerSet::new();
        for container in containers {
            if let Err(e) = set.insert(container) {
                panic!("invalid mock fixture: {}", e);
            }
        }
        Self {
            inner: Arc::new(Mutex::new(MockExecutorInner {
                containers: set,
                ..Default::default()
            })),
        }
    }

    /// Configure the mock to fail a specific command kind.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.set_fail_on(fail_on);
        self
    }

    /// Configure failure on an existing (possibly shared) mock.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Kinds of all recorded operations, in submission order.
    pub fn operation_kinds(&self) -> Vec<CommandKind> {
        let inner = self.inner.lock().unwrap();
        inner.operations.iter().map(|op| op.command.kind()).collect()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }

    /// Get a container (for test verification).
    pub fn container(&self, id: ContainerId) -> Option<Container> {
        let inner = self.inner.lock().unwrap();
        inner.containers.get(id).cloned()
    }
}

impl CommandExecutor for MockExecutor {
    fn submit(&self, actor: &Actor, command: Command) -> Result<CommandOutcome, CommandError> {
        let mut inner = self.inner.lock().unwrap();

        let injected = inner
            .fail_on
            .as_ref()
            .filter(|fail| fail.kind == command.kind())
            .map(|fail| CommandError::new(fail.kind, fail.reason.clone()));
        let result = match injected {
            Some(err) => Err(err),
            None => inner.containers.apply(command.clone()),
        };

        inner.operations.push(MockOperation {
            actor: actor.clone(),
            command,
            succeeded: result.is_ok(),
        });
        result
    }
}

impl ContainerLookup for MockExecutor {
    fn find(&self, id: ContainerId) -> Option<Container> {
        self.container(id)
    }
}
