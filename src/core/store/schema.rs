//! core::store::schema
//!
//! On-disk format of the container store (v1).
//!
//! # Schema Design
//!
//! The store document is:
//! - Self-describing with `kind` and `schema_version`
//! - Strictly parsed (unknown fields rejected)
//! - A flat list of containers; parents are referenced by id
//!
//! # Example
//!
//! ```
//! use templatework::core::store::schema::{parse_store, StoreDocumentV1};
//!
//! let json = r#"{
//!     "kind": "templatework.store",
//!     "schema_version": 1,
//!     "containers": [
//!         { "id": 1, "alias": "root" },
//!         { "id": 2, "alias": "child", "owner": 1, "inherit_templates": true }
//!     ]
//! }"#;
//!
//! let doc = parse_store(json).unwrap();
//! assert_eq!(doc.containers.len(), 2);
//! let set = doc.into_set().unwrap();
//! assert_eq!(set.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::model::Container;
use crate::engine::exec::ContainerSet;

/// The kind identifier for store documents.
pub const STORE_KIND: &str = "templatework.store";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from parsing a store document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse store: {0}")]
    ParseError(String),

    #[error("invalid kind '{found}', expected '{}'", STORE_KIND)]
    InvalidKind { found: String },

    #[error("unsupported schema version {0}, supported: {SCHEMA_VERSION}")]
    UnsupportedVersion(u32),

    #[error("inconsistent store: {0}")]
    Inconsistent(String),
}

/// Envelope for version dispatch before full parsing.
#[derive(Debug, Deserialize)]
struct StoreEnvelope {
    kind: String,
    schema_version: u32,
}

/// Parse a store document with version dispatch.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, the `kind` does not match
/// [`STORE_KIND`], or the `schema_version` is not supported.
pub fn parse_store(json: &str) -> Result<StoreDocumentV1, SchemaError> {
    let envelope: StoreEnvelope =
        serde_json::from_str(json).map_err(|e| SchemaError::ParseError(e.to_string()))?;

    if envelope.kind != STORE_KIND {
        return Err(SchemaError::InvalidKind {
            found: envelope.kind,
        });
    }

    match envelope.schema_version {
        1 => serde_json::from_str(json).map_err(|e| SchemaError::ParseError(e.to_string())),
        v => Err(SchemaError::UnsupportedVersion(v)),
    }
}

/// Store document (v1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StoreDocumentV1 {
    /// Kind identifier (always "templatework.store")
    pub kind: String,

    /// Schema version (always 1 for this struct)
    pub schema_version: u32,

    /// All containers, parents before children.
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl StoreDocumentV1 {
    /// Create an empty document.
    pub fn empty() -> Self {
        Self {
            kind: STORE_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            containers: Vec::new(),
        }
    }

    /// Snapshot a container set into a document.
    ///
    /// Containers are ordered so that every parent precedes its children.
    pub fn from_set(set: &ContainerSet) -> Self {
        let mut ordered: Vec<Container> = Vec::with_capacity(set.len());
        let mut pending: Vec<&Container> = set.iter().collect();

        while !pending.is_empty() {
            let before = pending.len();
            pending.retain(|c| {
                let ready = c
                    .owner
                    .map_or(true, |owner| ordered.iter().any(|o| o.id == owner));
                if ready {
                    ordered.push((*c).clone());
                }
                !ready
            });
            if pending.len() == before {
                // Dangling parents cannot be ordered; keep them at the end.
                ordered.extend(pending.drain(..).cloned());
            }
        }

        Self {
            containers: ordered,
            ..Self::empty()
        }
    }

    /// Build a validated container set from this document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Inconsistent` on duplicate ids, unknown
    /// parents, or duplicate template identities.
    pub fn into_set(self) -> Result<ContainerSet, SchemaError> {
        let mut set = ContainerSet::new();
        for container in self.containers {
            set.insert(container).map_err(SchemaError::Inconsistent)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ContainerId;

    #[test]
    fn invalid_kind_rejected() {
        let json = r#"{"kind":"other","schema_version":1,"containers":[]}"#;
        assert!(matches!(
            parse_store(json),
            Err(SchemaError::InvalidKind { .. })
        ));
    }

    #[test]
    fn unsupported_version_rejected() {
        let json = r#"{"kind":"templatework.store","schema_version":2,"containers":[]}"#;
        assert!(matches!(
            parse_store(json),
            Err(SchemaError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn unknown_fields_rejected() {
        let json = r#"{"kind":"templatework.store","schema_version":1,"containers":[],"x":1}"#;
        assert!(matches!(parse_store(json), Err(SchemaError::ParseError(_))));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            parse_store("{not json"),
            Err(SchemaError::ParseError(_))
        ));
    }

    #[test]
    fn child_before_parent_is_inconsistent() {
        let doc = StoreDocumentV1 {
            containers: vec![
                Container::new(ContainerId::new(2), "child").with_owner(ContainerId::new(1)),
                Container::new(ContainerId::new(1), "root"),
            ],
            ..StoreDocumentV1::empty()
        };
        assert!(matches!(
            doc.into_set(),
            Err(SchemaError::Inconsistent(_))
        ));
    }

    #[test]
    fn from_set_orders_parents_first() {
        // Child id is lower than parent id, so id order alone would be wrong.
        let mut set = ContainerSet::new();
        set.insert(Container::new(ContainerId::new(10), "root"))
            .unwrap();
        set.insert(Container::new(ContainerId::new(3), "child").with_owner(ContainerId::new(10)))
            .unwrap();

        let doc = StoreDocumentV1::from_set(&set);
        assert_eq!(doc.containers[0].id, ContainerId::new(10));
        assert_eq!(doc.containers[1].id, ContainerId::new(3));

        let rebuilt = doc.into_set().unwrap();
        assert_eq!(rebuilt, set);
    }
}
