//! core
//!
//! Core domain types, schemas, and storage for templatework.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ContainerId, TemplateId, BlockName, TemplateName
//! - [`model`] - Containers, templates and lineages
//! - [`store`] - Versioned on-disk store and its lock
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for workspace storage
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing

pub mod config;
pub mod model;
pub mod paths;
pub mod store;
pub mod types;
