//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$TEMPLATEWORK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/templatework/config.toml`
//! 3. `~/.templatework/config.toml` (canonical write location)
//!
//! # Workspace Config
//!
//! Located at `<root>/.templatework/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g., the actor name must not
//! be blank).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// actor = "curator"
///
/// [notices]
/// quiet_info = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// User name commands are submitted as
    pub actor: Option<String>,

    /// Notification display settings
    pub notices: Option<NoticesConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_actor(self.actor.as_deref())
    }
}

/// Workspace configuration.
///
/// # Example
///
/// ```toml
/// actor = "curator"
/// store = "shared/store.json"
/// settings = "/etc/templatework/settings.toml"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkspaceConfig {
    /// User name commands are submitted as (overrides global)
    pub actor: Option<String>,

    /// Store file, relative to the workspace root unless absolute
    pub store: Option<PathBuf>,

    /// Settings file, relative to the workspace root unless absolute
    pub settings: Option<PathBuf>,
}

impl WorkspaceConfig {
    /// Keys accepted by `tw config`.
    pub const KEYS: &'static [&'static str] = &["actor", "store", "settings"];

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_actor(self.actor.as_deref())?;

        for (key, path) in [("store", &self.store), ("settings", &self.settings)] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(ConfigError::InvalidValue(format!(
                    "{} path cannot be empty",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Get a key as a display string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`Self::KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match key {
            "actor" => Ok(self.actor.clone()),
            "store" => Ok(self.store.as_ref().map(|p| p.display().to_string())),
            "settings" => Ok(self.settings.as_ref().map(|p| p.display().to_string())),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }

    /// Set a key from a string value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys outside [`Self::KEYS`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "actor" => self.actor = Some(value.to_string()),
            "store" => self.store = Some(PathBuf::from(value)),
            "settings" => self.settings = Some(PathBuf::from(value)),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Notification display settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NoticesConfig {
    /// Suppress informational notices
    pub quiet_info: Option<bool>,
}

fn validate_actor(actor: Option<&str>) -> Result<(), ConfigError> {
    if actor.is_some_and(|a| a.trim().is_empty()) {
        return Err(ConfigError::InvalidValue(
            "actor cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod global {
        use super::*;

        #[test]
        fn parse_full() {
            let config: GlobalConfig = toml::from_str(
                r#"
                actor = "curator"

                [notices]
                quiet_info = true
                "#,
            )
            .unwrap();

            assert_eq!(config.actor.as_deref(), Some("curator"));
            assert_eq!(config.notices.unwrap().quiet_info, Some(true));
        }

        #[test]
        fn blank_actor_invalid() {
            let config = GlobalConfig {
                actor: Some("  ".to_string()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn unknown_section_rejected() {
            let result: Result<GlobalConfig, _> = toml::from_str("[forge]\nname = \"x\"");
            assert!(result.is_err());
        }
    }

    mod workspace {
        use super::*;

        #[test]
        fn empty_is_valid() {
            let config: WorkspaceConfig = toml::from_str("").unwrap();
            assert!(config.validate().is_ok());
        }

        #[test]
        fn empty_store_path_invalid() {
            let config = WorkspaceConfig {
                store: Some(PathBuf::new()),
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }

        #[test]
        fn get_set_keys() {
            let mut config = WorkspaceConfig::default();
            config.set("store", "data/store.json").unwrap();
            config.set("actor", "ana").unwrap();

            assert_eq!(config.get("store").unwrap().as_deref(), Some("data/store.json"));
            assert_eq!(config.get("actor").unwrap().as_deref(), Some("ana"));
            assert_eq!(config.get("settings").unwrap(), None);
        }

        #[test]
        fn unknown_key_rejected() {
            let mut config = WorkspaceConfig::default();
            assert!(matches!(
                config.set("trunk", "main"),
                Err(ConfigError::UnknownKey(_))
            ));
            assert!(config.get("trunk").is_err());
        }

        #[test]
        fn roundtrip_toml() {
            let config = WorkspaceConfig {
                actor: Some("ana".to_string()),
                store: Some(PathBuf::from("s.json")),
                settings: None,
            };
            let text = toml::to_string_pretty(&config).unwrap();
            let parsed: WorkspaceConfig = toml::from_str(&text).unwrap();
            assert_eq!(parsed, config);
        }
    }
}
