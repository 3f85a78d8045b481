//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ContainerId`] - Numeric container identifier
//! - [`TemplateId`] - Opaque template identity (UUID v4)
//! - [`BlockName`] - Validated metadata-block identifier
//! - [`TemplateName`] - Validated template display name
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use templatework::core::types::{BlockName, TemplateName};
//!
//! let block = BlockName::new("citation").unwrap();
//! let name = TemplateName::new("Survey defaults").unwrap();
//! assert_eq!(block.as_str(), "citation");
//! assert_eq!(name.copy_of().as_str(), "Copy of Survey defaults");
//!
//! assert!(BlockName::new("has space").is_err());
//! assert!(TemplateName::new("   ").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Prefix applied to the name of a cloned template.
pub const COPY_PREFIX: &str = "Copy of ";

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid container id: {0}")]
    InvalidContainerId(String),

    #[error("invalid template id: {0}")]
    InvalidTemplateId(String),

    #[error("invalid metadata block name: {0}")]
    InvalidBlockName(String),

    #[error("invalid template name: {0}")]
    InvalidTemplateName(String),
}

/// Identifier of a container in the repository tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Wrap a raw numeric id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw numeric id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl FromStr for ContainerId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| TypeError::InvalidContainerId(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a template.
///
/// Identities are never reused: creation and cloning both mint a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(Uuid);

impl TemplateId {
    /// Mint a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Get an abbreviated form for display (first 8 hex characters).
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl FromStr for TemplateId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| TypeError::InvalidTemplateId(format!("'{}': {}", s, e)))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated metadata-block identifier (e.g. `citation`, `geospatial`).
///
/// Block names are non-empty and consist of ASCII alphanumerics plus
/// `_`, `-` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockName(String);

impl BlockName {
    /// Create a new validated block name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBlockName` if the name is empty or contains
    /// characters outside `[A-Za-z0-9_.-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeError::InvalidBlockName(
                "block name cannot be empty".into(),
            ));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(TypeError::InvalidBlockName(format!(
                "block name cannot contain '{}'",
                c.escape_default()
            )));
        }
        Ok(Self(name))
    }

    /// Get the block name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BlockName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BlockName> for String {
    fn from(name: BlockName) -> Self {
        name.0
    }
}

impl AsRef<str> for BlockName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated template name.
///
/// Names are trimmed on construction; they cannot be blank and cannot
/// contain control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateName(String);

impl TemplateName {
    /// Create a new validated template name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidTemplateName` if the name is blank or
    /// contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidTemplateName(
                "template name cannot be blank".into(),
            ));
        }
        if trimmed.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidTemplateName(
                "template name cannot contain control characters".into(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name given to a copy of a template with this name.
    pub fn copy_of(&self) -> Self {
        // Prefixing a valid name keeps it valid.
        Self(format!("{}{}", COPY_PREFIX, self.0))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<TemplateName> for String {
    fn from(name: TemplateName) -> Self {
        name.0
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
