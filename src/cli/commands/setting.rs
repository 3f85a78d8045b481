//! setting command - Read application settings

use anyhow::Result;

use super::workspace::workspace_paths;
use crate::core::config::Config;
use crate::engine::Context;
use crate::settings::{FileSettingsSource, SettingKey, SettingsCache};

/// Open the settings cache without requiring an initialized store.
fn settings(ctx: &Context) -> Result<SettingsCache<FileSettingsSource>> {
    let paths = workspace_paths(ctx)?;
    let config = Config::load(Some(&paths))?;
    Ok(SettingsCache::new(FileSettingsSource::new(
        config.settings_path(&paths),
    )))
}

/// Accept well-known names without their leading colon.
fn normalize(key: &str) -> String {
    SettingKey::from_name(key)
        .map(|k| k.name().to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Print a setting's value, or `default` when it is absent.
///
/// Prints nothing when the setting is absent and no default is given.
pub fn get(ctx: &Context, key: &str, default: Option<&str>) -> Result<()> {
    let cache = settings(ctx)?;
    let key = normalize(key);
    let value = match default {
        Some(default) => Some(cache.get_or(&key, default)),
        None => cache.get(&key),
    };
    if let Some(value) = value {
        println!("{}", value);
    }
    Ok(())
}

/// Print `true` or `false` for a setting.
pub fn check(ctx: &Context, key: &str, default_true: bool) -> Result<()> {
    let cache = settings(ctx)?;
    println!("{}", cache.is_true_for_key(&normalize(key), default_true));
    Ok(())
}

/// Print the user guides URL.
pub fn guides(ctx: &Context) -> Result<()> {
    println!("{}", settings(ctx)?.guides_base_url());
    Ok(())
}

/// List all settings.
pub fn list(ctx: &Context) -> Result<()> {
    let cache = settings(ctx)?;
    for (name, content) in cache.entries() {
        println!("{} = {}", name, content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_known_key() {
        assert_eq!(normalize("GuidesBaseUrl"), ":GuidesBaseUrl");
        assert_eq!(normalize(":SystemEmail"), ":SystemEmail");
    }

    #[test]
    fn normalize_unknown_key_untouched() {
        assert_eq!(normalize("CustomThing"), "CustomThing");
    }
}
