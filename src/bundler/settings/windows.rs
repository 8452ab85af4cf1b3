//! Windows platform-specific settings.

use std::path::PathBuf;

/// What the Windows packager produces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowsPackageType {
    /// Plain zip of the published output.
    Zip,
    /// Inno Setup installer only. Missing Inno Setup is fatal.
    Installer,
    /// Zip plus installer; degrades to zip-only without Inno Setup.
    #[default]
    Both,
}

impl WindowsPackageType {
    pub fn wants_zip(self) -> bool {
        matches!(self, Self::Zip | Self::Both)
    }

    pub fn wants_installer(self) -> bool {
        matches!(self, Self::Installer | Self::Both)
    }
}

/// Default Inno Setup 6 compiler locations.
pub const DEFAULT_ISCC_LOCATIONS: [&str; 2] = [
    r"C:\Program Files (x86)\Inno Setup 6\ISCC.exe",
    r"C:\Program Files\Inno Setup 6\ISCC.exe",
];

/// Windows installer configuration.
///
/// # Configuration
///
/// ```toml
/// [windows]
/// iscc_path = "D:/Tools/Inno Setup 6/ISCC.exe"
/// ```
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct WindowsSettings {
    /// Package type for this run. Set from the command line.
    #[serde(skip)]
    pub package_type: WindowsPackageType,

    /// Extra ISCC.exe location checked before the defaults.
    pub iscc_path: Option<PathBuf>,

    /// Replaces the default ISCC.exe locations entirely.
    ///
    /// Default: None (use [`DEFAULT_ISCC_LOCATIONS`])
    pub iscc_locations: Option<Vec<PathBuf>>,
}

impl WindowsSettings {
    /// Candidate ISCC.exe paths in lookup order.
    pub fn iscc_candidates(&self) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = self.iscc_path.iter().cloned().collect();
        match &self.iscc_locations {
            Some(locations) => candidates.extend(locations.iter().cloned()),
            None => candidates.extend(DEFAULT_ISCC_LOCATIONS.iter().map(PathBuf::from)),
        }
        candidates
    }
}
