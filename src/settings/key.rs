//! settings::key
//!
//! Well-known setting names.

use std::fmt;

/// A setting the application reads by name.
///
/// Stored names carry a leading colon (`:GuidesBaseUrl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Base URL of the user guides.
    GuidesBaseUrl,
    /// Version segment of the user guides.
    GuidesVersion,
    /// Address system mail is sent from.
    SystemEmail,
    /// Copyright line shown in the page footer.
    FooterCopyright,
}

impl SettingKey {
    /// All known keys.
    pub const ALL: &'static [SettingKey] = &[
        SettingKey::GuidesBaseUrl,
        SettingKey::GuidesVersion,
        SettingKey::SystemEmail,
        SettingKey::FooterCopyright,
    ];

    /// Stored name of this key, including the leading colon.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::GuidesBaseUrl => ":GuidesBaseUrl",
            SettingKey::GuidesVersion => ":GuidesVersion",
            SettingKey::SystemEmail => ":SystemEmail",
            SettingKey::FooterCopyright => ":FooterCopyright",
        }
    }

    /// Look up a key by stored name (with or without the leading colon).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(':').unwrap_or(name);
        Self::ALL
            .iter()
            .copied()
            .find(|k| &k.name()[1..] == name)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
