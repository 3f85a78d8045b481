//! cli
//!
//! Command-line interface layer for templatework.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//! - Does NOT change container state directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers that drive a [`ManageTemplates`](crate::manage::ManageTemplates)
//! view over the workspace store.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::fmt;

use anyhow::Result;
use env_logger::Env;

use crate::engine;

/// Error for a failure that was already shown to the user.
///
/// The binary exits with a failure status without printing it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation failed")
    }
}

impl std::error::Error for Reported {}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ctx = engine::Context {
        root: cli.root.clone(),
        actor: cli.actor.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the logger. `RUST_LOG` overrides the flag-derived level.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    // A logger may already be installed when running in-process (tests).
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}
