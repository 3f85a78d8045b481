//! engine::exec
//!
//! Command application over an in-memory container set.
//!
//! # Executor Contract
//!
//! [`ContainerSet::apply`] is the single place where commands change
//! container state. Both the in-memory [`MockExecutor`](super::mock::MockExecutor)
//! and the file-backed [`JsonStore`](crate::core::store::JsonStore) route
//! through it, so they enforce the same rules:
//!
//! 1. The target container must exist
//! 2. Template identities are unique across the whole set
//! 3. A default template is one of the container's own templates or, when the
//!    container inherits, one of its parent's own templates
//! 4. Deleting a template clears every default that points at it
//! 5. A rejected command leaves the set untouched
//!
//! Rule 5 holds because every command validates before it writes.

use std::collections::BTreeMap;

use super::command::{Command, CommandError, CommandOutcome};
use crate::core::model::{Container, Template};
use crate::core::types::{ContainerId, TemplateId};

/// All containers known to a store, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerSet {
    containers: BTreeMap<ContainerId, Container>,
}

impl ContainerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a container by id.
    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    /// Iterate containers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// Number of containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Add a new container.
    ///
    /// # Errors
    ///
    /// Fails if the id is taken, the parent does not exist, or any of its
    /// templates collides with an existing template identity.
    pub fn insert(&mut self, mut container: Container) -> Result<(), String> {
        if self.containers.contains_key(&container.id) {
            return Err(format!("container {} already exists", container.id));
        }
        if let Some(owner) = container.owner {
            if !self.containers.contains_key(&owner) {
                return Err(format!("parent container {} does not exist", owner));
            }
        }
        for template in &mut container.templates {
            if self.template_owner(template.id).is_some() {
                return Err(format!("template {} already exists", template.id));
            }
            template.owner = container.id;
        }
        self.containers.insert(container.id, container);
        Ok(())
    }

    /// Find which container owns a template.
    pub fn template_owner(&self, id: TemplateId) -> Option<ContainerId> {
        self.containers
            .values()
            .find(|c| c.owns_template(id))
            .map(|c| c.id)
    }

    /// Apply a command.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the command violates a store rule. The set
    /// is unchanged in that case.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome, CommandError> {
        let kind = command.kind();
        match command {
            Command::CreateTemplate {
                container,
                template,
            } => self.create_template(container, template),
            Command::UpdateContainer { container } => self.update_container(container),
            Command::UpdateInheritanceRoot { container, inherit } => {
                self.update_inheritance_root(container, inherit)
            }
            Command::DeleteTemplate {
                container,
                template,
            } => self.delete_template(container, template),
        }
        .map_err(|reason| CommandError::new(kind, reason))
    }

    fn create_template(
        &mut self,
        container: ContainerId,
        mut template: Template,
    ) -> Result<CommandOutcome, String> {
        if self.template_owner(template.id).is_some() {
            return Err(format!("template {} already exists", template.id));
        }
        let target = self
            .containers
            .get_mut(&container)
            .ok_or_else(|| format!("container {} not found", container))?;

        template.owner = container;
        target.templates.push(template.clone());
        Ok(CommandOutcome::Template(template))
    }

    fn update_container(&mut self, mut container: Container) -> Result<CommandOutcome, String> {
        let current = self
            .containers
            .get(&container.id)
            .ok_or_else(|| format!("container {} not found", container.id))?;

        if current.owner != container.owner {
            return Err(format!(
                "the parent of container {} cannot be changed",
                container.id
            ));
        }
        for template in &mut container.templates {
            match self.template_owner(template.id) {
                Some(owner) if owner != container.id => {
                    return Err(format!(
                        "template {} belongs to container {}",
                        template.id, owner
                    ));
                }
                _ => template.owner = container.id,
            }
        }
        self.check_default(&container)?;

        self.containers.insert(container.id, container.clone());
        Ok(CommandOutcome::Container(container))
    }

    fn update_inheritance_root(
        &mut self,
        container: Container,
        inherit: bool,
    ) -> Result<CommandOutcome, String> {
        let mut updated = self
            .containers
            .get(&container.id)
            .cloned()
            .ok_or_else(|| format!("container {} not found", container.id))?;

        updated.inherit_templates = inherit;
        updated.default_template = container.default_template;
        self.check_default(&updated)?;

        self.containers.insert(updated.id, updated.clone());
        Ok(CommandOutcome::Container(updated))
    }

    fn delete_template(
        &mut self,
        container: ContainerId,
        template: TemplateId,
    ) -> Result<CommandOutcome, String> {
        let target = self
            .containers
            .get_mut(&container)
            .ok_or_else(|| format!("container {} not found", container))?;
        if target.remove_template(template).is_none() {
            return Err(format!(
                "template {} is not owned by container {}",
                template, container
            ));
        }

        for c in self.containers.values_mut() {
            if c.default_template == Some(template) {
                log::debug!("clearing default template of container {}", c.id);
                c.default_template = None;
            }
        }

        let updated = self
            .containers
            .get(&container)
            .cloned()
            .ok_or_else(|| format!("container {} not found", container))?;
        Ok(CommandOutcome::Container(updated))
    }

    /// Whether `template` is available to `container` through inheritance.
    ///
    /// Inheritance reaches one level: only the parent's own templates count.
    pub fn inherits_template(&self, container: &Container, template: TemplateId) -> bool {
        container.inherit_templates
            && container
                .owner
                .and_then(|owner| self.containers.get(&owner))
                .is_some_and(|parent| parent.owns_template(template))
    }

    /// Check that a container's default template is reachable from it.
    fn check_default(&self, container: &Container) -> Result<(), String> {
        let Some(default) = container.default_template else {
            return Ok(());
        };
        if container.owns_template(default) || self.inherits_template(container, default) {
            Ok(())
        } else {
            Err(format!(
                "default template {} is not available to container {}",
                default, container.id
            ))
        }
    }
}

impl FromIterator<Container> for ContainerSet {
    fn from_iter<I: IntoIterator<Item = Container>>(iter: I) -> Self {
        Self {
            containers: iter.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}
