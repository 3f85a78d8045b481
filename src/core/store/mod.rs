//! core::store
//!
//! Durable container storage.
//!
//! # Modules
//!
//! - [`schema`] - Versioned on-disk document format
//! - [`lock`] - Exclusive workspace lock
//! - [`json_store`] - File-backed [`CommandExecutor`](crate::engine::command::CommandExecutor)

pub mod json_store;
pub mod lock;
pub mod schema;

pub use json_store::{JsonStore, StoreError};
pub use lock::{LockError, StoreLock};
