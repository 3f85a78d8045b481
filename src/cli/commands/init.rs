//! init command - Initialize a templatework workspace

use anyhow::{Context as _, Result};

use super::workspace::workspace_paths;
use crate::core::config::{Config, WorkspaceConfig};
use crate::core::store::JsonStore;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Initialize a workspace in the context's root directory.
///
/// Creates an empty store and, with `actor`, a workspace config naming it.
/// Running it again on an initialized workspace is a no-op.
pub fn init(ctx: &Context, actor: Option<&str>) -> Result<()> {
    let paths = workspace_paths(ctx)?;
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = Config::load(Some(&paths)).context("Failed to load config")?;
    let store_path = config.store_path(&paths);

    if store_path.exists() {
        output::print(
            format!("Workspace already initialized at {}", store_path.display()),
            verbosity,
        );
        return Ok(());
    }

    if let Some(actor) = actor {
        let mut workspace = Config::read_workspace(&paths).context("Failed to read config")?;
        workspace.actor = Some(actor.to_string());
        Config::write_workspace(&paths, &workspace).context("Failed to write config")?;
    } else if !paths.config_path().exists() {
        Config::write_workspace(&paths, &WorkspaceConfig::default())
            .context("Failed to write config")?;
    }

    let store = JsonStore::init(&paths, store_path).context("Failed to create store")?;
    log::info!("initialized store at {}", store.path().display());

    output::print(
        format!("Initialized workspace at {}", paths.data_dir().display()),
        verbosity,
    );
    Ok(())
}
