//! templatework - inheritable metadata templates for nested data containers
//!
//! Containers (dataverses) form a tree. Each owns a list of metadata
//! templates and may offer its parent's templates as well. templatework
//! resolves which templates a container sees, keeps its default template
//! consistent with its inheritance setting, and persists every change
//! through a single command executor.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to views)
//! - [`manage`] - Template management view with staged mutations
//! - [`resolver`] - Effective template lists and inheritance transitions
//! - [`engine`] - Persistence commands and executors
//! - [`core`] - Domain types, model, store and configuration
//! - [`settings`] - Read-through cache over the settings store
//! - [`ui`] - Output and notifications
//!
//! # Correctness Invariants
//!
//! templatework maintains the following invariants:
//!
//! 1. A displayed template never has its persisted owner rewritten
//! 2. All mutations flow through a single command executor
//! 3. View state changes only after the executor accepted the change
//! 4. A default template is always reachable from its container

pub mod cli;
pub mod core;
pub mod engine;
pub mod manage;
pub mod resolver;
pub mod settings;
pub mod ui;
