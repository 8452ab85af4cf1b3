//! Platform-specific packagers.
//!
//! Each packager takes a published output directory and produces one or more
//! distributables. A packager that has to fall back (missing tool, failed
//! tool) records a warning in its [`PackageOutcome`] instead of failing.

pub mod linux;
pub mod macos;
pub mod velopack;
pub mod windows;

use std::{fmt, path::PathBuf};

/// Kind of distributable produced by a packager.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PackageType {
    /// Zip of the published output (Windows zip mode or fallback).
    Zip,
    /// Inno Setup installer executable.
    Installer,
    /// macOS installer package built by `pkgbuild`.
    Pkg,
    /// Debian package built by `dpkg-deb`.
    Deb,
    /// Gzip tarball (Linux fallback).
    TarGz,
    /// Velopack setup executable.
    Velopack,
    /// Zipped full `.app` bundle.
    AppBundle,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Zip => "ZIP",
            Self::Installer => "Installer",
            Self::Pkg => "PKG",
            Self::Deb => "DEB",
            Self::TarGz => "TAR.GZ",
            Self::Velopack => "Velopack",
            Self::AppBundle => "App bundle",
        })
    }
}

/// One file produced by a packager.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageOutput {
    pub package_type: PackageType,
    pub path: PathBuf,
}

/// Everything a packager produced, plus the fallbacks it took.
#[derive(Clone, Debug, Default)]
pub struct PackageOutcome {
    pub outputs: Vec<PackageOutput>,
    pub warnings: Vec<String>,
}

impl PackageOutcome {
    pub fn push(&mut self, package_type: PackageType, path: PathBuf) {
        log::info!("✓ {} created: {}", package_type, path.display());
        self.outputs.push(PackageOutput { package_type, path });
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Paths of all outputs of `package_type`.
    pub fn paths_of(&self, package_type: PackageType) -> Vec<&PathBuf> {
        self.outputs
            .iter()
            .filter(|o| o.package_type == package_type)
            .map(|o| &o.path)
            .collect()
    }
}
