//! core::model
//!
//! Containers, templates and the lineage the resolver works on.
//!
//! # Ownership
//!
//! A [`Container`] owns its [`Template`]s. The link to the parent container
//! is a plain [`ContainerId`], never an owning reference; a resolved parent
//! travels alongside the container in a [`Lineage`].
//!
//! A template's `owner` is the container that persists it. Displaying a
//! template under another container never rewrites this field (see
//! [`crate::resolver::TemplateView`]).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{BlockName, ContainerId, TemplateId, TemplateName};

/// A named, reusable metadata pre-fill definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    /// Identity of this template.
    pub id: TemplateId,
    /// Display name.
    pub name: TemplateName,
    /// When the template was created.
    pub create_time: DateTime<Utc>,
    /// How many datasets were created from this template.
    pub usage_count: u64,
    /// Container that owns and persists this template.
    pub owner: ContainerId,
    /// Pre-filled metadata values, keyed by field name.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Template {
    /// Create a new template with a fresh identity and zero usage.
    pub fn new(name: TemplateName, owner: ContainerId, create_time: DateTime<Utc>) -> Self {
        Self {
            id: TemplateId::generate(),
            name,
            create_time,
            usage_count: 0,
            owner,
            fields: BTreeMap::new(),
        }
    }

    /// Add a pre-filled field value.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Produce a deep copy with a new identity.
    ///
    /// The copy is named `"Copy of <name>"`, has a zero usage counter and
    /// `create_time` set to `now`. Field values are copied.
    pub fn clone_as_new(&self, owner: ContainerId, now: DateTime<Utc>) -> Self {
        Self {
            id: TemplateId::generate(),
            name: self.name.copy_of(),
            create_time: now,
            usage_count: 0,
            owner,
            fields: self.fields.clone(),
        }
    }
}

/// A node in the tree of organizational units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Container {
    /// Identifier of this container.
    pub id: ContainerId,
    /// Short human-readable alias.
    pub alias: String,
    /// Parent container, if any.
    #[serde(default)]
    pub owner: Option<ContainerId>,
    /// Metadata blocks enabled on this container.
    #[serde(default)]
    pub metadata_blocks: BTreeSet<BlockName>,
    /// Templates owned by this container, in display order.
    #[serde(default)]
    pub templates: Vec<Template>,
    /// Template pre-selected when creating content here.
    #[serde(default)]
    pub default_template: Option<TemplateId>,
    /// Whether the parent's templates are offered here as well.
    #[serde(default)]
    pub inherit_templates: bool,
}

impl Container {
    /// Create an empty root container.
    pub fn new(id: ContainerId, alias: impl Into<String>) -> Self {
        Self {
            id,
            alias: alias.into(),
            owner: None,
            metadata_blocks: BTreeSet::new(),
            templates: Vec::new(),
            default_template: None,
            inherit_templates: false,
        }
    }

    /// Set the parent container.
    pub fn with_owner(mut self, owner: ContainerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Replace the metadata-block set.
    pub fn with_blocks(mut self, blocks: impl IntoIterator<Item = BlockName>) -> Self {
        self.metadata_blocks = blocks.into_iter().collect();
        self
    }

    /// Append an owned template. The template's owner is set to this container.
    pub fn with_template(mut self, mut template: Template) -> Self {
        template.owner = self.id;
        self.templates.push(template);
        self
    }

    /// Whether this container is an inheritance root.
    ///
    /// An inheritance root does not inherit from its parent; its own
    /// template set is authoritative.
    pub fn is_template_root(&self) -> bool {
        !self.inherit_templates
    }

    /// Look up one of this container's own templates.
    pub fn template(&self, id: TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Whether `id` is one of this container's own templates.
    pub fn owns_template(&self, id: TemplateId) -> bool {
        self.template(id).is_some()
    }

    /// Remove one of this container's own templates.
    ///
    /// Returns the removed template, or `None` if it is not owned here.
    pub fn remove_template(&mut self, id: TemplateId) -> Option<Template> {
        let idx = self.templates.iter().position(|t| t.id == id)?;
        Some(self.templates.remove(idx))
    }
}

/// A container together with its resolved immediate parent.
///
/// Only one level of ancestry is ever consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    /// The container being managed.
    pub container: Container,
    /// Its parent, when it has one and the parent could be resolved.
    pub parent: Option<Container>,
}

impl Lineage {
    /// A lineage for a container without a parent.
    pub fn root(container: Container) -> Self {
        Self {
            container,
            parent: None,
        }
    }

    /// A lineage for a container and its parent.
    pub fn with_parent(container: Container, parent: Container) -> Self {
        Self {
            container,
            parent: Some(parent),
        }
    }

    /// Templates the parent offers for inheritance (empty without a parent).
    pub fn parent_templates(&self) -> &[Template] {
        self.parent
            .as_ref()
            .map(|p| p.templates.as_slice())
            .unwrap_or(&[])
    }

    /// Find a template visible through this lineage, own templates first.
    pub fn find_template(&self, id: TemplateId) -> Option<&Template> {
        self.container
            .template(id)
            .or_else(|| self.parent_templates().iter().find(|t| t.id == id))
    }
}
