//! macOS platform-specific settings.

/// macOS application bundle (.app) configuration.
///
/// # Configuration
///
/// ```toml
/// [macos]
/// minimum_system_version = "10.15"
/// category = "public.app-category.utilities"
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct MacOsSettings {
    /// Minimum macOS version required (LSMinimumSystemVersion).
    pub minimum_system_version: String,

    /// LSApplicationCategoryType written by the full app bundle.
    pub category: String,

    /// NSHumanReadableCopyright written by the full app bundle.
    pub copyright: String,

    /// Install location passed to `pkgbuild`.
    ///
    /// Default: `/Applications/{product}.app`
    pub install_location: Option<String>,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            minimum_system_version: "10.15".into(),
            category: "public.app-category.utilities".into(),
            copyright: "Copyright © 2025. All rights reserved.".into(),
            install_location: None,
        }
    }
}
