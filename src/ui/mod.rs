//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//! - [`notify`] - Notification sinks for operation outcomes
//!
//! # Design
//!
//! All terminal output goes through this module so quiet mode is honored
//! consistently.

pub mod notify;
pub mod output;
