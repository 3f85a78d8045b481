//! settings::source
//!
//! Backing stores the settings cache loads from.
//!
//! # Example
//!
//! ```
//! use templatework::settings::{SettingsSource, StaticSettings};
//!
//! let source = StaticSettings::new([(":SystemEmail", "support@example.org")]);
//! let all = source.list_all().unwrap();
//! assert_eq!(all.len(), 1);
//! assert_eq!(all[0].content, "support@example.org");
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("cannot read settings file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// The settings file is not a flat table of strings.
    #[error("cannot parse settings file {path}: {message}")]
    ParseError { path: PathBuf, message: String },
}

/// One stored setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    /// Setting name, e.g. `:GuidesBaseUrl`.
    pub name: String,
    /// Raw setting content.
    pub content: String,
}

impl Setting {
    /// Create a setting.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A store that can list every setting at once.
///
/// Implementations must be thread-safe (Send + Sync).
pub trait SettingsSource: Send + Sync {
    /// Return all stored settings.
    fn list_all(&self) -> Result<Vec<Setting>, SettingsError>;
}

/// Settings stored as a TOML table of `name = "content"` pairs.
///
/// A missing file is an empty set of settings.
///
/// ```toml
/// ":GuidesBaseUrl" = "https://guides.example.org"
/// ":PublicInstall" = "yes"
/// ```
#[derive(Debug, Clone)]
pub struct FileSettingsSource {
    path: PathBuf,
}

impl FileSettingsSource {
    /// Read settings from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for FileSettingsSource {
    fn list_all(&self) -> Result<Vec<Setting>, SettingsError> {
        if !self.path.exists() {
            log::debug!("no settings file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| SettingsError::ReadError {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let table: BTreeMap<String, String> =
            toml::from_str(&content).map_err(|e| SettingsError::ParseError {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        Ok(table
            .into_iter()
            .map(|(name, content)| Setting { name, content })
            .collect())
    }
}

/// Fixed in-memory settings.
///
/// Counts how many times it was listed, which lets tests observe reloads.
#[derive(Debug, Default)]
pub struct StaticSettings {
    settings: Vec<Setting>,
    loads: AtomicUsize,
}

impl StaticSettings {
    /// Create from `(name, content)` pairs.
    pub fn new<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            settings: pairs
                .into_iter()
                .map(|(k, v)| Setting::new(k, v))
                .collect(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of times [`SettingsSource::list_all`] was called.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl SettingsSource for StaticSettings {
    fn list_all(&self) -> Result<Vec<Setting>, SettingsError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.settings.clone())
    }
}
