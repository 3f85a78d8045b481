//! settings
//!
//! Read-through cache over a global key-value settings store.
//!
//! # Caching
//!
//! The complete map is loaded from the [`SettingsSource`] on first access and
//! served from memory afterwards. Concurrent first readers load it once.
//! [`SettingsCache::invalidate`] drops the map so the next read reloads it;
//! [`SettingsCache::reload`] reloads eagerly.
//!
//! A failed load is logged and answered with defaults; it is not cached, so
//! the next read tries again.
//!
//! # Example
//!
//! ```
//! use templatework::settings::{SettingKey, SettingsCache, StaticSettings};
//!
//! let cache = SettingsCache::new(StaticSettings::new([
//!     (":GuidesBaseUrl", "https://guides.example.org"),
//!     (":PublicInstall", " Yes "),
//! ]));
//!
//! assert_eq!(cache.guides_base_url(), "https://guides.example.org/en");
//! assert!(cache.is_true_for_key(":PublicInstall", false));
//! assert_eq!(cache.get_or(":Missing", "fallback"), "fallback");
//! assert_eq!(cache.value_for_key(SettingKey::SystemEmail), None);
//! ```

pub mod key;
pub mod source;

pub use key::SettingKey;
pub use source::{FileSettingsSource, Setting, SettingsError, SettingsSource, StaticSettings};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Values treated as `true` (after trimming and lowercasing).
pub const TRUE_VALUES: &[&str] = &["1", "yes", "true", "allow"];

/// Guides URL used when `:GuidesBaseUrl` is not set.
pub const DEFAULT_GUIDES_BASE_URL: &str = "http://guides.dataverse.org";

/// Language segment appended to the guides URL.
const GUIDES_LANGUAGE: &str = "en";

type SettingsMap = Arc<HashMap<String, String>>;

/// Lazily loaded, invalidatable settings map.
#[derive(Debug)]
pub struct SettingsCache<S> {
    source: S,
    map: RwLock<Option<SettingsMap>>,
}

impl<S: SettingsSource> SettingsCache<S> {
    /// Create a cache over `source`. Nothing is loaded yet.
    pub fn new(source: S) -> Self {
        Self {
            source,
            map: RwLock::new(None),
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the map is currently loaded.
    pub fn is_loaded(&self) -> bool {
        self.map
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Get a setting's raw content.
    pub fn get(&self, key: &str) -> Option<String> {
        self.map().get(key).cloned()
    }

    /// Get a setting's raw content, or `default` when it is absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a well-known setting.
    pub fn value_for_key(&self, key: SettingKey) -> Option<String> {
        self.get(key.name())
    }

    /// Get a well-known setting, or `default` when it is absent.
    pub fn value_for_key_or(&self, key: SettingKey, default: &str) -> String {
        self.get_or(key.name(), default)
    }

    /// Interpret a setting as a boolean.
    ///
    /// Returns `default` when the setting is absent. A present value is
    /// true only if it is one of [`TRUE_VALUES`].
    pub fn is_true_for_key(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(value) => is_truthy(&value),
            None => default,
        }
    }

    /// Interpret a well-known setting as a boolean.
    pub fn is_true(&self, key: SettingKey, default: bool) -> bool {
        self.is_true_for_key(key.name(), default)
    }

    /// Base URL of the user guides, including the language segment.
    pub fn guides_base_url(&self) -> String {
        let base = self.value_for_key_or(SettingKey::GuidesBaseUrl, DEFAULT_GUIDES_BASE_URL);
        format!("{}/{}", base, GUIDES_LANGUAGE)
    }

    /// Drop the cached map; the next read reloads it.
    pub fn invalidate(&self) {
        let mut guard = self.map.write().unwrap_or_else(|e| e.into_inner());
        if guard.take().is_some() {
            log::debug!("settings cache invalidated");
        }
    }

    /// Reload the map from the source now.
    ///
    /// # Errors
    ///
    /// Returns the source error. The previous map is kept in that case.
    pub fn reload(&self) -> Result<(), SettingsError> {
        let fresh = self.load()?;
        *self.map.write().unwrap_or_else(|e| e.into_inner()) = Some(fresh);
        Ok(())
    }

    /// All settings, sorted by name.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .map()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }

    fn map(&self) -> SettingsMap {
        if let Some(map) = self
            .map
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return Arc::clone(map);
        }

        let mut guard = self.map.write().unwrap_or_else(|e| e.into_inner());
        // Another reader may have loaded it while we waited.
        if let Some(map) = guard.as_ref() {
            return Arc::clone(map);
        }

        match self.load() {
            Ok(map) => {
                *guard = Some(Arc::clone(&map));
                map
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Arc::default()
            }
        }
    }

    fn load(&self) -> Result<SettingsMap, SettingsError> {
        let settings = self.source.list_all()?;
        log::debug!("loaded {} settings", settings.len());
        Ok(Arc::new(
            settings
                .into_iter()
                .map(|s| (s.name, s.content))
                .collect(),
        ))
    }
}

/// Whether a raw setting value counts as `true`.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    TRUE_VALUES.contains(&value.as_str())
}
