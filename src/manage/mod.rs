//! manage
//!
//! The template management view of one container.
//!
//! # Staged Mutation
//!
//! Every action follows the same shape:
//!
//! ```text
//! clone view state -> mutate the draft -> submit command -> commit on success
//! ```
//!
//! The view's [`Lineage`] is only replaced once the executor has accepted
//! the command. A rejected command produces a fatal notice and leaves the
//! view exactly as it was, so it never drifts from what is persisted.
//!
//! [`CommandError`](crate::engine::command::CommandError) never escapes an
//! action. It is logged and turned into the action's failure notice (see
//! [`SaveAction`]).
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use templatework::core::model::{Container, Template};
//! use templatework::core::types::{ContainerId, TemplateName};
//! use templatework::engine::command::Actor;
//! use templatework::engine::mock::MockExecutor;
//! use templatework::manage::ManageTemplates;
//! use templatework::ui::notify::RecordingSink;
//!
//! let t1 = Template::new(TemplateName::new("T1").unwrap(), ContainerId::new(1), Utc::now());
//! let id = t1.id;
//! let executor = MockExecutor::with_containers(vec![
//!     Container::new(ContainerId::new(1), "root").with_template(t1),
//! ]);
//! let sink = RecordingSink::new();
//!
//! let mut page = ManageTemplates::open(
//!     executor.clone(),
//!     executor.clone(),
//!     sink.clone(),
//!     Actor::new("admin"),
//!     ContainerId::new(1),
//! )
//! .unwrap();
//!
//! assert!(page.make_default(id));
//! assert_eq!(page.default_template().map(|t| t.id), Some(id));
//! assert_eq!(
//!     sink.last().unwrap().text,
//!     "The template has been selected as the default template for this container"
//! );
//! ```

pub mod action;

pub use action::SaveAction;

use chrono::Utc;
use thiserror::Error;

use crate::core::model::{Container, Lineage, Template};
use crate::core::types::{ContainerId, TemplateId};
use crate::engine::command::{
    load_lineage, Actor, Command, CommandExecutor, CommandOutcome, ContainerLookup,
};
use crate::resolver::{InheritanceChange, TemplateInheritanceResolver, TemplateView};
use crate::ui::notify::{NotificationSink, Severity};

/// Notice shown when a container has no visible templates.
pub const NO_TEMPLATES_NOTICE: &str = "No templates have been configured for this container.";

/// Notice shown when inheritance is requested for an ineligible container.
pub const INHERITANCE_NOT_ALLOWED_NOTICE: &str =
    "Template inheritance requires a parent with the same metadata blocks.";

/// Errors from opening the management view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManageError {
    /// The container does not exist.
    #[error("container {0} not found")]
    ContainerNotFound(ContainerId),
}

/// Template management for one container.
pub struct ManageTemplates<L, E, N> {
    lookup: L,
    executor: E,
    sink: N,
    actor: Actor,
    lineage: Lineage,
    inherit_allowed: bool,
    selected: Option<TemplateId>,
}

impl<L, E, N> ManageTemplates<L, E, N>
where
    L: ContainerLookup,
    E: CommandExecutor,
    N: NotificationSink,
{
    /// Load the container and its parent and prepare the view.
    ///
    /// # Errors
    ///
    /// Returns `ManageError::ContainerNotFound` if the container does not
    /// exist.
    pub fn open(
        lookup: L,
        executor: E,
        sink: N,
        actor: Actor,
        id: ContainerId,
    ) -> Result<Self, ManageError> {
        let lineage = load_lineage(&lookup, id).ok_or(ManageError::ContainerNotFound(id))?;
        let inherit_allowed = TemplateInheritanceResolver::is_inheritance_eligible(&lineage);

        let page = Self {
            lookup,
            executor,
            sink,
            actor,
            lineage,
            inherit_allowed,
            selected: None,
        };
        page.announce_if_empty();
        Ok(page)
    }

    /// The effective template list.
    pub fn templates(&self) -> Vec<TemplateView<'_>> {
        TemplateInheritanceResolver::effective_list(&self.lineage)
    }

    /// The managed container and its parent.
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// The managed container.
    pub fn container(&self) -> &Container {
        &self.lineage.container
    }

    /// The current default template, if it is visible from here.
    pub fn default_template(&self) -> Option<&Template> {
        self.lineage
            .container
            .default_template
            .and_then(|id| self.lineage.find_template(id))
    }

    /// Whether the container currently inherits templates.
    pub fn inherit_value(&self) -> bool {
        self.lineage.container.inherit_templates
    }

    /// Whether the inheritance toggle may be switched on.
    pub fn inherit_allowed(&self) -> bool {
        self.inherit_allowed
    }

    /// The template selected for deletion.
    pub fn selected(&self) -> Option<TemplateId> {
        self.selected
    }

    /// Make `id` the container's default template.
    pub fn make_default(&mut self, id: TemplateId) -> bool {
        self.update_default(SaveAction::MakeDefault, Some(id))
    }

    /// Clear the container's default template.
    pub fn unselect_default(&mut self) -> bool {
        self.update_default(SaveAction::UnselectDefault, None)
    }

    /// Copy a visible template into the container.
    ///
    /// Returns the persisted copy, or `None` if the copy failed.
    pub fn clone_template(&mut self, id: TemplateId) -> Option<Template> {
        let Some(source) = self.lineage.find_template(id).cloned() else {
            log::warn!(
                "template {} is not visible from container {}",
                id,
                self.lineage.container.id
            );
            self.notify_failure(SaveAction::Copy);
            return None;
        };

        let mut draft = self.lineage.container.clone();
        let copy = TemplateInheritanceResolver::clone_template(&mut draft, &source, Utc::now());
        let command = Command::CreateTemplate {
            container: draft.id,
            template: copy,
        };

        let created = self.submit_with(SaveAction::Copy, command, CommandOutcome::into_template)?;
        if let Some(slot) = draft.templates.iter_mut().find(|t| t.id == created.id) {
            *slot = created.clone();
        }
        self.lineage.container = draft;
        Some(created)
    }

    /// Select a template for a later [`delete_selected`](Self::delete_selected).
    ///
    /// Returns `false` if the template is not in the effective list.
    pub fn select_template(&mut self, id: TemplateId) -> bool {
        if self.lineage.find_template(id).is_none() {
            log::warn!("cannot select unknown template {}", id);
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Delete the selected template.
    ///
    /// Without a selection nothing is submitted and `false` is returned.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected else {
            log::warn!("no template selected for deletion");
            return false;
        };

        let mut draft = self.lineage.container.clone();
        draft.remove_template(id);
        if draft.default_template == Some(id) {
            TemplateInheritanceResolver::set_default_template(&mut draft, None);
        }
        let command = Command::DeleteTemplate {
            container: draft.id,
            template: id,
        };

        match self.submit(SaveAction::Delete, command) {
            Some(outcome) => {
                self.lineage.container = outcome.into_container().unwrap_or(draft);
                self.selected = None;
                true
            }
            None => false,
        }
    }

    /// Persist the container's current template data.
    pub fn save(&mut self) -> bool {
        let command = Command::UpdateContainer {
            container: self.lineage.container.clone(),
        };
        match self.submit(SaveAction::Update, command) {
            Some(outcome) => {
                if let Some(container) = outcome.into_container() {
                    self.lineage.container = container;
                }
                true
            }
            None => false,
        }
    }

    /// Switch template inheritance on or off.
    ///
    /// On success the view is reloaded, so [`templates`](Self::templates)
    /// reflects the new flag.
    pub fn update_templates_root(&mut self, inherit: bool) -> bool {
        if inherit && !self.inherit_allowed {
            log::warn!(
                "container {} is not eligible for template inheritance",
                self.lineage.container.id
            );
            self.sink
                .add_message(Severity::Warn, INHERITANCE_NOT_ALLOWED_NOTICE);
            return false;
        }

        let mut draft = self.lineage.clone();
        match TemplateInheritanceResolver::update_inheritance_flag(&mut draft, inherit) {
            InheritanceChange::AdoptedParentDefault(id) => {
                log::debug!("adopting parent default template {}", id)
            }
            InheritanceChange::ClearedInheritedDefault(id) => {
                log::debug!("clearing inherited default template {}", id)
            }
            InheritanceChange::Unchanged => {}
        }
        let command = Command::UpdateInheritanceRoot {
            container: draft.container.clone(),
            inherit,
        };

        let Some(outcome) = self.submit(SaveAction::InheritanceRoot, command) else {
            return false;
        };
        if let Some(container) = outcome.into_container() {
            draft.container = container;
        }
        self.lineage = self.reload(draft);
        self.inherit_allowed = TemplateInheritanceResolver::is_inheritance_eligible(&self.lineage);
        self.announce_if_empty();
        true
    }

    /// Re-read the lineage after a change; falls back to `committed` if the
    /// container cannot be found again.
    fn reload(&self, committed: Lineage) -> Lineage {
        let id = committed.container.id;
        match load_lineage(&self.lookup, id) {
            Some(lineage) => lineage,
            None => {
                log::warn!("container {} vanished during reload", id);
                committed
            }
        }
    }

    fn update_default(&mut self, action: SaveAction, id: Option<TemplateId>) -> bool {
        let mut draft = self.lineage.container.clone();
        TemplateInheritanceResolver::set_default_template(&mut draft, id);
        let command = Command::UpdateContainer {
            container: draft.clone(),
        };

        match self.submit(action, command) {
            Some(outcome) => {
                self.lineage.container = outcome.into_container().unwrap_or(draft);
                true
            }
            None => false,
        }
    }

    fn submit(&self, action: SaveAction, command: Command) -> Option<CommandOutcome> {
        self.submit_with(action, command, Some)
    }

    /// Submit `command` and confirm it only once `extract` accepts the outcome.
    fn submit_with<T>(
        &self,
        action: SaveAction,
        command: Command,
        extract: impl FnOnce(CommandOutcome) -> Option<T>,
    ) -> Option<T> {
        let id = self.lineage.container.id;
        match self.executor.submit(&self.actor, command).map(extract) {
            Ok(Some(value)) => {
                log::info!("{} on container {} succeeded", action, id);
                self.sink.add_message(Severity::Info, action.success_message());
                Some(value)
            }
            Ok(None) => {
                log::error!("{} on container {}: unexpected outcome", action, id);
                self.notify_failure(action);
                None
            }
            Err(e) => {
                log::error!("{} on container {}: {}", action, id, e);
                self.notify_failure(action);
                None
            }
        }
    }

    fn notify_failure(&self, action: SaveAction) {
        self.sink
            .add_message(Severity::Fatal, action.failure_message());
    }

    fn announce_if_empty(&self) {
        if self.templates().is_empty() {
            self.sink.add_message(Severity::Info, NO_TEMPLATES_NOTICE);
        }
    }
}
