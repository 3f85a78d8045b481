//! config command - Get, set, or list workspace configuration values

use anyhow::{Context as _, Result};

use super::workspace::workspace_paths;
use crate::core::config::{Config, WorkspaceConfig};
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Get a configuration value.
///
/// Prints nothing when the key is valid but unset.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let paths = workspace_paths(ctx)?;
    let config = Config::read_workspace(&paths).context("Failed to read config")?;

    if let Some(value) = config.get(key)? {
        println!("{}", value);
    }
    Ok(())
}

/// Set a configuration value.
pub fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let paths = workspace_paths(ctx)?;
    let mut config = Config::read_workspace(&paths).context("Failed to read config")?;

    config.set(key, value)?;
    Config::write_workspace(&paths, &config).context("Failed to write config")?;

    output::print(
        format!("Set {} = {}", key, value),
        Verbosity::from_flags(ctx.quiet, ctx.debug),
    );
    Ok(())
}

/// List all configuration values, including effective defaults.
pub fn list(ctx: &Context) -> Result<()> {
    let paths = workspace_paths(ctx)?;
    let config = Config::load(Some(&paths)).context("Failed to load config")?;
    let workspace = config.workspace.clone().unwrap_or_default();

    for key in WorkspaceConfig::KEYS {
        let value = match *key {
            "actor" => config
                .actor()
                .map_or_else(|| ctx.resolve_actor(None).to_string(), str::to_string),
            "store" => config.store_path(&paths).display().to_string(),
            "settings" => config.settings_path(&paths).display().to_string(),
            other => workspace.get(other)?.unwrap_or_default(),
        };
        println!("{} = {}", key, value);
    }

    if let Some(path) = config.global_config_loaded_from() {
        println!("# global config: {}", path.display());
    }
    if let Some(path) = config.workspace_config_loaded_from() {
        println!("# workspace config: {}", path.display());
    }
    Ok(())
}
