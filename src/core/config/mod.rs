//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! templatework has two configuration scopes:
//! - **Global**: User-level settings
//! - **Workspace**: Settings of one workspace directory
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Workspace config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$TEMPLATEWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/templatework/config.toml`
//! 3. `~/.templatework/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use templatework::core::config::Config;
//! use templatework::core::paths::WorkspacePaths;
//! use std::path::PathBuf;
//!
//! let paths = WorkspacePaths::new(PathBuf::from("/data"));
//! let config = Config::load(Some(&paths)).unwrap();
//!
//! println!("Store: {}", config.store_path(&paths).display());
//! println!("Actor: {:?}", config.actor());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, NoticesConfig, WorkspaceConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::paths::{WorkspacePaths, WORKSPACE_DIR};

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "TEMPLATEWORK_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown config key '{0}'")]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: workspace config overrides global config.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Workspace configuration (if one was found)
    pub workspace: Option<WorkspaceConfig>,
    global_path: Option<PathBuf>,
    workspace_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `paths` is provided, also loads the workspace config.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or fail
    /// validation. Missing config files are not an error.
    pub fn load(paths: Option<&WorkspacePaths>) -> Result<Self, ConfigError> {
        let (global, global_path) = Self::load_global()?;
        global.validate()?;

        let (workspace, workspace_path) = match paths {
            Some(paths) if paths.config_path().exists() => {
                let path = paths.config_path();
                let config: WorkspaceConfig = read_toml(&path)?;
                config.validate()?;
                (Some(config), Some(path))
            }
            _ => (None, None),
        };

        if let Some(path) = &global_path {
            log::debug!("loaded global config from {}", path.display());
        }

        Ok(Config {
            global,
            workspace,
            global_path,
            workspace_path,
        })
    }

    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $TEMPLATEWORK_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok((read_toml(&path)?, Some(path)));
            }
        }

        // 2. Check $XDG_CONFIG_HOME/templatework/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("templatework/config.toml");
            if path.exists() {
                return Ok((read_toml(&path)?, Some(path)));
            }
        }

        // 3. Check ~/.templatework/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(WORKSPACE_DIR).join("config.toml");
            if path.exists() {
                return Ok((read_toml(&path)?, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.templatework/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(WORKSPACE_DIR).join("config.toml"))
    }

    /// Read the workspace config file, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn read_workspace(paths: &WorkspacePaths) -> Result<WorkspaceConfig, ConfigError> {
        let path = paths.config_path();
        if path.exists() {
            read_toml(&path)
        } else {
            Ok(WorkspaceConfig::default())
        }
    }

    /// Validate and write workspace config atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write_workspace(
        paths: &WorkspacePaths,
        config: &WorkspaceConfig,
    ) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = paths.config_path();
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Get the configured actor name.
    ///
    /// Returns `None` if neither scope sets one.
    pub fn actor(&self) -> Option<&str> {
        self.workspace
            .as_ref()
            .and_then(|w| w.actor.as_deref())
            .or(self.global.actor.as_deref())
    }

    /// Get the store file path.
    ///
    /// Defaults to `<root>/.templatework/store.json`.
    pub fn store_path(&self, paths: &WorkspacePaths) -> PathBuf {
        self.workspace
            .as_ref()
            .and_then(|w| w.store.as_deref())
            .map(|p| paths.resolve(p))
            .unwrap_or_else(|| paths.store_path())
    }

    /// Get the settings file path.
    ///
    /// Defaults to `<root>/.templatework/settings.toml`.
    pub fn settings_path(&self, paths: &WorkspacePaths) -> PathBuf {
        self.workspace
            .as_ref()
            .and_then(|w| w.settings.as_deref())
            .map(|p| paths.resolve(p))
            .unwrap_or_else(|| paths.settings_path())
    }

    /// Check if informational notices are suppressed.
    ///
    /// Defaults to `false` if not configured.
    pub fn quiet_info(&self) -> bool {
        self.global
            .notices
            .as_ref()
            .and_then(|n| n.quiet_info)
            .unwrap_or(false)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded workspace config file.
    pub fn workspace_config_loaded_from(&self) -> Option<&Path> {
        self.workspace_path.as_deref()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a config file via temp file and rename.
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
