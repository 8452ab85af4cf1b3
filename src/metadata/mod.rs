//! Release configuration from `Release.toml`.

use crate::bundler::{DebianSettings, MacOsSettings, PackageSettings, WindowsSettings};
use crate::error::{CliError, ReleaseError, Result};
use std::path::Path;

/// File name looked up in the project directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "Release.toml";

/// Parsed `Release.toml`.
///
/// All tables are optional; missing values fall back to the Symphex
/// defaults.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// `[package]` product metadata
    pub package: PackageSettings,

    /// `[windows]` Inno Setup lookup
    pub windows: WindowsSettings,

    /// `[macos]` bundle metadata
    pub macos: MacOsSettings,

    /// `[linux]` Debian control and desktop entry fields
    pub linux: DebianSettings,
}

impl ReleaseConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Loads the release configuration.
///
/// An explicit path must exist. Without one, `Release.toml` in
/// `project_dir` is used when present and defaults otherwise.
pub fn load_config(project_dir: &Path, explicit: Option<&Path>) -> Result<ReleaseConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(ReleaseError::Cli(CliError::InvalidArguments {
                    reason: format!("Config file not found: {}", path.display()),
                }));
            }
            path.to_path_buf()
        }
        None => {
            let path = project_dir.join(CONFIG_FILE_NAME);
            if !path.is_file() {
                log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, project_dir.display());
                return Ok(ReleaseConfig::default());
            }
            path
        }
    };

    log::debug!("Loading release configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| {
        ReleaseError::Cli(CliError::ExecutionFailed {
            command: "read_release_toml".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    ReleaseConfig::from_toml_str(&content)
}
