//! resolver
//!
//! Template inheritance resolution and the default-template consistency rule.
//!
//! # Effective template set
//!
//! The templates a user sees for a container are its own templates plus,
//! when the container inherits, the templates of its immediate parent:
//!
//! ```text
//! inherit = false:  [own...]
//! inherit = true:   [parent..., own...]
//! ```
//!
//! Entries are returned as [`TemplateView`] projections. A view pairs a
//! borrowed template with the container it is displayed under; the template's
//! persisted `owner` is never rewritten.
//!
//! # Inheritance transitions
//!
//! | Transition | Rule |
//! |---|---|
//! | off -> on | no local default and the parent's default is one of its own: adopt it |
//! | on -> off | default is not one of the container's own templates: clear it |
//!
//! Callers must recompute [`TemplateInheritanceResolver::effective_list`]
//! after a transition.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use templatework::core::model::{Container, Lineage, Template};
//! use templatework::core::types::{ContainerId, TemplateName};
//! use templatework::resolver::TemplateInheritanceResolver;
//!
//! let t1 = Template::new(TemplateName::new("T1").unwrap(), ContainerId::new(1), Utc::now());
//! let root = Container::new(ContainerId::new(1), "root").with_template(t1);
//! let lineage = Lineage::root(root);
//!
//! let views = TemplateInheritanceResolver::effective_list(&lineage);
//! assert_eq!(views.len(), 1);
//! assert!(!TemplateInheritanceResolver::is_inheritance_eligible(&lineage));
//! ```

use chrono::{DateTime, Utc};

use crate::core::model::{Container, Lineage, Template};
use crate::core::types::{ContainerId, TemplateId};

/// A template as displayed under a particular container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateView<'a> {
    /// The underlying template.
    pub template: &'a Template,
    /// Container the template is being displayed under.
    pub display_owner: ContainerId,
    /// Whether the template comes from the parent.
    pub inherited: bool,
}

impl<'a> TemplateView<'a> {
    /// Identity of the underlying template.
    pub fn id(&self) -> TemplateId {
        self.template.id
    }

    /// Whether this entry is the container's default template.
    pub fn is_default_of(&self, container: &Container) -> bool {
        container.default_template == Some(self.template.id)
    }
}

/// What an inheritance-flag update did to the default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceChange {
    /// The parent's default was adopted.
    AdoptedParentDefault(TemplateId),
    /// A default inherited from the parent was cleared.
    ClearedInheritedDefault(TemplateId),
    /// The default was left as it was.
    Unchanged,
}

/// Stateless resolver over [`Lineage`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInheritanceResolver;

impl TemplateInheritanceResolver {
    /// Compute the templates visible for the lineage's container.
    ///
    /// Parent templates come first when the container inherits and has a
    /// resolved parent; own templates follow in stored order. Every view is
    /// displayed under the container itself. An empty result means no
    /// templates are configured.
    pub fn effective_list(lineage: &Lineage) -> Vec<TemplateView<'_>> {
        let container = &lineage.container;
        let mut views = Vec::new();

        if container.inherit_templates {
            if let Some(parent) = &lineage.parent {
                views.extend(parent.templates.iter().map(|template| TemplateView {
                    template,
                    display_owner: container.id,
                    inherited: true,
                }));
            }
        }

        views.extend(container.templates.iter().map(|template| TemplateView {
            template,
            display_owner: container.id,
            inherited: false,
        }));

        views
    }

    /// Whether the container may inherit templates from its parent.
    ///
    /// True iff a parent exists and both metadata-block sets are identical.
    pub fn is_inheritance_eligible(lineage: &Lineage) -> bool {
        lineage
            .parent
            .as_ref()
            .is_some_and(|parent| parent.metadata_blocks == lineage.container.metadata_blocks)
    }

    /// Set or clear (with `None`) the container's default template.
    pub fn set_default_template(container: &mut Container, template: Option<TemplateId>) {
        container.default_template = template;
    }

    /// Apply a new inheritance flag and restore default-template consistency.
    ///
    /// Without a parent only the flag changes.
    pub fn update_inheritance_flag(lineage: &mut Lineage, inherit: bool) -> InheritanceChange {
        lineage.container.inherit_templates = inherit;

        let Some(parent) = &lineage.parent else {
            return InheritanceChange::Unchanged;
        };
        let container = &mut lineage.container;

        if inherit {
            // Only the parent's own templates are offered here.
            match (container.default_template, parent.default_template) {
                (None, Some(parent_default)) if parent.owns_template(parent_default) => {
                    container.default_template = Some(parent_default);
                    InheritanceChange::AdoptedParentDefault(parent_default)
                }
                _ => InheritanceChange::Unchanged,
            }
        } else {
            // Anything not owned here came from the parent.
            match container.default_template {
                Some(current) if !container.owns_template(current) => {
                    container.default_template = None;
                    InheritanceChange::ClearedInheritedDefault(current)
                }
                _ => InheritanceChange::Unchanged,
            }
        }
    }

    /// Clone `source` into `container`'s owned templates.
    ///
    /// The clone gets a fresh identity, the name `"Copy of <name>"`, a zero
    /// usage counter and `now` as its creation time. `source` is not touched.
    pub fn clone_template(
        container: &mut Container,
        source: &Template,
        now: DateTime<Utc>,
    ) -> Template {
        let copy = source.clone_as_new(container.id, now);
        container.templates.push(copy.clone());
        copy
    }
}
