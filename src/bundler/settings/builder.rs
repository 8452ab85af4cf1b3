//! Builder for constructing Settings.

use super::{
    DebianSettings, MacOsSettings, PackageSettings, Settings, TargetOs, WindowsPackageType,
    WindowsSettings,
};
use crate::metadata::ReleaseConfig;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use symphex_release::bundler::{SettingsBuilder, TargetOs, WindowsPackageType};
///
/// # fn example() -> symphex_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .version("1.3.0")
///     .output_directory("release")
///     .windows_package_type(WindowsPackageType::Zip)
///     .host_os(Some(TargetOs::Linux))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    package_settings: Option<PackageSettings>,
    windows: WindowsSettings,
    macos: MacOsSettings,
    debian: DebianSettings,
    version: Option<String>,
    output_directory: Option<PathBuf>,
    working_directory: Option<PathBuf>,
    host_os: Option<Option<TargetOs>>,
    dotnet: Option<PathBuf>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts from a parsed `Release.toml`.
    pub fn from_config(config: ReleaseConfig) -> Self {
        Self {
            package_settings: Some(config.package),
            windows: config.windows,
            macos: config.macos,
            debian: config.linux,
            ..Default::default()
        }
    }

    /// Sets product metadata.
    ///
    /// Default: [`PackageSettings::default`]
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the release version.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the artifact output directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory relative inputs are resolved against.
    ///
    /// Default: `.`
    pub fn working_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.working_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the Windows package type.
    ///
    /// Default: [`WindowsPackageType::Both`]
    pub fn windows_package_type(mut self, package_type: WindowsPackageType) -> Self {
        self.windows.package_type = package_type;
        self
    }

    /// Overrides the Windows settings.
    pub fn windows_settings(mut self, settings: WindowsSettings) -> Self {
        let package_type = self.windows.package_type;
        self.windows = settings;
        self.windows.package_type = package_type;
        self
    }

    /// Overrides the detected host OS.
    ///
    /// Default: [`TargetOs::host`]
    pub fn host_os(mut self, host_os: Option<TargetOs>) -> Self {
        self.host_os = Some(host_os);
        self
    }

    /// Sets the program run for `dotnet publish`.
    ///
    /// Default: `dotnet` from `PATH`
    pub fn dotnet_program<P: AsRef<Path>>(mut self, program: P) -> Self {
        self.dotnet = Some(program.as_ref().to_path_buf());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `version` or `output_directory` is missing, or the
    /// version is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let version = self.version.context("version is required")?;
        if version.trim().is_empty() {
            crate::bail!("version must not be empty");
        }

        let mut package = self.package_settings.unwrap_or_default();
        package.version = version;

        let settings = Settings::new(
            package,
            self.windows,
            self.macos,
            self.debian,
            self.output_directory
                .context("output_directory is required")?,
            self.working_directory.unwrap_or_else(|| PathBuf::from(".")),
            self.host_os.unwrap_or_else(TargetOs::host),
        );

        Ok(match self.dotnet {
            Some(dotnet) => settings.with_dotnet(dotnet),
            None => settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_version_and_output() {
        assert!(SettingsBuilder::new().output_directory("out").build().is_err());
        assert!(SettingsBuilder::new().version("1.0.0").build().is_err());
        assert!(
            SettingsBuilder::new()
                .version("  ")
                .output_directory("out")
                .build()
                .is_err()
        );
    }

    #[test]
    fn artifact_names_follow_product_version_platform() {
        let settings = SettingsBuilder::new()
            .version("1.3.0")
            .output_directory("release")
            .host_os(None)
            .build()
            .unwrap();
        assert_eq!(
            settings.artifact_name("win-x64", "zip"),
            "Symphex-1.3.0-win-x64.zip"
        );
        assert_eq!(settings.host_os(), None);
        assert_eq!(settings.dotnet_program(), Path::new("dotnet"));
        assert_eq!(settings.publish_base(), PathBuf::from("./publish"));
    }

    #[test]
    fn windows_settings_keep_package_type() {
        let settings = SettingsBuilder::new()
            .version("1.0.0")
            .output_directory("out")
            .windows_package_type(WindowsPackageType::Installer)
            .windows_settings(WindowsSettings::default())
            .build()
            .unwrap();
        assert_eq!(settings.windows().package_type, WindowsPackageType::Installer);
    }
}
