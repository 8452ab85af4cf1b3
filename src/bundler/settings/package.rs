//! Product metadata shared by every packager.

use std::path::PathBuf;

/// Product metadata and configuration.
///
/// Read from the `[package]` table of `Release.toml`; every field falls back
/// to the Symphex defaults so the file is optional.
///
/// # Examples
///
/// ```no_run
/// use symphex_release::bundler::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "MyApp".into(),
///     bundle_identifier: "com.example.myapp".into(),
///     ..Default::default()
/// };
/// assert_eq!(settings.binary_name_lower(), "myapp");
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct PackageSettings {
    /// Product name. Also the name of the published executable
    /// (`{product_name}` on Unix, `{product_name}.exe` on Windows).
    pub product_name: String,

    /// Version string passed on the command line.
    ///
    /// Not read from `Release.toml`.
    #[serde(skip)]
    pub version: String,

    /// Reverse-DNS bundle identifier, used by macOS packaging.
    pub bundle_identifier: String,

    /// Publisher shown by installers.
    pub publisher: String,

    /// Publisher homepage shown by installers.
    pub publisher_url: String,

    /// `owner/repo` on GitHub, used in release hints.
    pub github_repo: String,

    /// One-line description.
    pub description: String,

    /// Extended description (Debian control continuation line).
    pub long_description: String,

    /// Windows icon, relative to the working directory.
    pub icon: PathBuf,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: "Symphex".into(),
            version: String::new(),
            bundle_identifier: "com.cybernilsen.symphex".into(),
            publisher: "CyberNilsen".into(),
            publisher_url: "https://github.com/CyberNilsen/Symphex".into(),
            github_repo: "CyberNilsen/Symphex".into(),
            description: "Music downloader for YouTube and Spotify".into(),
            long_description: "Cross-platform music downloader with smart metadata detection."
                .into(),
            icon: PathBuf::from("Assets").join("SymphexLogo.ico"),
        }
    }
}

impl PackageSettings {
    /// Lower-cased product name used for Linux paths and package names.
    pub fn binary_name_lower(&self) -> String {
        self.product_name.to_lowercase()
    }
}
