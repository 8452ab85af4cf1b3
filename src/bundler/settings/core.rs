//! Core Settings struct and implementations.

use super::{DebianSettings, MacOsSettings, PackageSettings, TargetOs, WindowsSettings};
use crate::bundler::publish::DOTNET;
use std::path::{Path, PathBuf};

/// Main settings for a release run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Holds the
/// product metadata, per-platform configuration and the directories the
/// packagers read from and write to.
///
/// # Examples
///
/// ```no_run
/// use symphex_release::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> symphex_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .package_settings(PackageSettings::default())
///     .version("1.3.0")
///     .output_directory("release")
///     .build()?;
/// assert_eq!(settings.product_name(), "Symphex");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    windows: WindowsSettings,
    macos: MacOsSettings,
    debian: DebianSettings,

    /// Where artifacts are written.
    output_directory: PathBuf,

    /// Base for relative inputs (icon, `installer_scripts/`, `publish/`).
    working_directory: PathBuf,

    /// OS the packagers believe they run on. `None` on unsupported hosts.
    host_os: Option<TargetOs>,

    /// Program invoked for `dotnet publish`.
    dotnet: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the package metadata.
    pub fn package(&self) -> &PackageSettings {
        &self.package
    }

    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    pub fn macos(&self) -> &MacOsSettings {
        &self.macos
    }

    pub fn debian(&self) -> &DebianSettings {
        &self.debian
    }

    /// Returns the artifact output directory.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Returns the directory relative inputs are resolved against.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Returns the host OS used for platform decisions.
    pub fn host_os(&self) -> Option<TargetOs> {
        self.host_os
    }

    /// Returns the `dotnet` program used for publishing.
    pub fn dotnet_program(&self) -> &Path {
        &self.dotnet
    }

    /// Directory that holds `dotnet publish` output, one subdirectory per runtime.
    pub fn publish_base(&self) -> PathBuf {
        self.working_directory.join("publish")
    }

    /// Path of the product icon, if it exists.
    pub fn icon_path(&self) -> Option<PathBuf> {
        let icon = self.working_directory.join(&self.package.icon);
        icon.is_file().then_some(icon)
    }

    /// Builds an artifact name following `{product}-{version}-{platform}`.
    pub fn artifact_name(&self, platform: &str, extension: &str) -> String {
        format!(
            "{}-{}-{}.{}",
            self.product_name(),
            self.version_string(),
            platform,
            extension
        )
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        package: PackageSettings,
        windows: WindowsSettings,
        macos: MacOsSettings,
        debian: DebianSettings,
        output_directory: PathBuf,
        working_directory: PathBuf,
        host_os: Option<TargetOs>,
    ) -> Self {
        Self {
            package,
            windows,
            macos,
            debian,
            output_directory,
            working_directory,
            host_os,
            dotnet: PathBuf::from(DOTNET),
        }
    }

    pub(super) fn with_dotnet(mut self, dotnet: PathBuf) -> Self {
        self.dotnet = dotnet;
        self
    }
}
