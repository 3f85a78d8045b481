//! core::paths
//!
//! Centralized path routing for templatework storage locations.
//!
//! # Storage Layout
//!
//! All workspace data is stored under `<root>/.templatework/`:
//! - `config.toml` - Workspace configuration
//! - `store.json` - Containers and templates
//! - `settings.toml` - Settings read by the settings cache
//! - `lock` - Exclusive lock file held while the store is written
//!
//! **Hard rule:** no code outside this module joins `.templatework` onto a
//! path by hand.
//!
//! # Example
//!
//! ```
//! use templatework::core::paths::WorkspacePaths;
//! use std::path::PathBuf;
//!
//! let paths = WorkspacePaths::new(PathBuf::from("/data"));
//!
//! assert_eq!(
//!     paths.store_path(),
//!     PathBuf::from("/data/.templatework/store.json")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Name of the workspace data directory.
pub const WORKSPACE_DIR: &str = ".templatework";

/// Centralized path routing for a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// Directory the workspace lives in.
    pub root: PathBuf,
}

impl WorkspacePaths {
    /// Create paths for the workspace rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the workspace data directory (`<root>/.templatework`).
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    /// Get the path to the workspace configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// Get the default path of the container store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    /// Get the default path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir().join("settings.toml")
    }

    /// Get the path to the store lock file.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir().join("lock")
    }

    /// Resolve a path from configuration against the workspace root.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
