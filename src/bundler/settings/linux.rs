//! Linux platform-specific settings.

/// Debian package and desktop entry configuration.
///
/// # Configuration
///
/// ```toml
/// [linux]
/// section = "sound"
/// maintainer = "CyberNilsen <contact@cybernilsen.com>"
/// categories = "Audio;AudioVideo;"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct DebianSettings {
    /// Debian archive section.
    pub section: String,

    /// Debian priority.
    pub priority: String,

    /// `Maintainer:` field, "Name <email>".
    pub maintainer: String,

    /// freedesktop.org categories, `;`-separated.
    pub categories: String,

    /// `Comment=` of the desktop entry.
    pub desktop_comment: String,
}

impl Default for DebianSettings {
    fn default() -> Self {
        Self {
            section: "sound".into(),
            priority: "optional".into(),
            maintainer: "CyberNilsen <contact@cybernilsen.com>".into(),
            categories: "Audio;AudioVideo;".into(),
            desktop_comment: "Music Downloader".into(),
        }
    }
}
