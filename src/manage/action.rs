//! manage::action
//!
//! User actions on the template management view and their notices.

use std::fmt;

/// An action whose outcome is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveAction {
    /// Select a template as the container's default.
    MakeDefault,
    /// Remove the container's default template.
    UnselectDefault,
    /// Delete a template.
    Delete,
    /// Copy a template into the container.
    Copy,
    /// Persist the container's template data.
    Update,
    /// Change whether the container inherits templates.
    InheritanceRoot,
}

impl SaveAction {
    /// All actions.
    pub const ALL: &'static [SaveAction] = &[
        SaveAction::MakeDefault,
        SaveAction::UnselectDefault,
        SaveAction::Delete,
        SaveAction::Copy,
        SaveAction::Update,
        SaveAction::InheritanceRoot,
    ];

    /// Notice shown when the action succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            SaveAction::MakeDefault => {
                "The template has been selected as the default template for this container"
            }
            SaveAction::UnselectDefault => {
                "The template has been removed as the default template for this container"
            }
            SaveAction::Delete => "The template has been deleted",
            SaveAction::Copy => "The template has been copied",
            SaveAction::Update => "Template data updated",
            SaveAction::InheritanceRoot => "Template inheritance updated",
        }
    }

    /// Notice shown when the action fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            SaveAction::MakeDefault => {
                "The dataset template cannot be made default. Please try again or contact support."
            }
            SaveAction::UnselectDefault | SaveAction::Update => "Template update failed",
            SaveAction::Delete => {
                "The dataset template cannot be deleted. Please try again or contact support."
            }
            SaveAction::Copy => "Template could not be copied.",
            SaveAction::InheritanceRoot => "Template inheritance could not be updated.",
        }
    }

    /// Find the action that reports `message` on success.
    pub fn from_success_message(message: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.success_message() == message)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SaveAction::MakeDefault => "make-default",
            SaveAction::UnselectDefault => "unselect-default",
            SaveAction::Delete => "delete",
            SaveAction::Copy => "copy",
            SaveAction::Update => "update",
            SaveAction::InheritanceRoot => "inheritance-root",
        }
    }
}

impl fmt::Display for SaveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
