//! Build targets and runtime identifiers.
//!
//! A build target is an (operating system, CPU architecture) pair. Only four
//! pairs have a .NET runtime identifier; everything else is rejected with
//! [`Error::UnsupportedPlatform`].

use crate::bundler::{Error, Result};
use std::fmt;

/// Operating system of a build target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Windows,
    #[serde(rename = "macos")]
    MacOs,
    Linux,
}

impl TargetOs {
    /// Detects the host operating system.
    ///
    /// Returns `None` on hosts that have no runtime identifier at all
    /// (e.g. FreeBSD).
    pub fn host() -> Option<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` value.
    pub fn from_os_name(name: &str) -> Option<Self> {
        match name {
            "windows" => Some(Self::Windows),
            "macos" => Some(Self::MacOs),
            "linux" => Some(Self::Linux),
            _ => None,
        }
    }

    /// Runtime identifiers built for this OS in a release run.
    ///
    /// macOS ships both Intel and Apple Silicon builds.
    pub fn release_runtimes(self) -> &'static [RuntimeIdentifier] {
        match self {
            Self::Windows => &[RuntimeIdentifier::WinX64],
            Self::MacOs => &[RuntimeIdentifier::OsxX64, RuntimeIdentifier::OsxArm64],
            Self::Linux => &[RuntimeIdentifier::LinuxX64],
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
        })
    }
}

/// CPU architecture of a build target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// x86 / i686 (32-bit)
    X86,
    /// AArch64 / ARM64 (64-bit), Apple Silicon
    AArch64,
    /// ARM with hard-float (32-bit)
    Armhf,
}

impl Arch {
    /// Detects the host architecture.
    pub fn host() -> Option<Self> {
        Self::from_arch_name(std::env::consts::ARCH)
    }

    /// Maps a `std::env::consts::ARCH` value.
    pub fn from_arch_name(name: &str) -> Option<Self> {
        match name {
            "x86_64" => Some(Self::X86_64),
            "x86" => Some(Self::X86),
            "aarch64" => Some(Self::AArch64),
            "arm" => Some(Self::Armhf),
            _ => None,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X86_64 => "x86_64",
            Self::X86 => "x86",
            Self::AArch64 => "aarch64",
            Self::Armhf => "armhf",
        })
    }
}

/// .NET runtime identifier consumed by `dotnet publish -r`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize)]
pub enum RuntimeIdentifier {
    #[serde(rename = "win-x64")]
    WinX64,
    #[serde(rename = "linux-x64")]
    LinuxX64,
    #[serde(rename = "osx-x64")]
    OsxX64,
    #[serde(rename = "osx-arm64")]
    OsxArm64,
}

impl RuntimeIdentifier {
    pub const ALL: [RuntimeIdentifier; 4] = [
        RuntimeIdentifier::WinX64,
        RuntimeIdentifier::LinuxX64,
        RuntimeIdentifier::OsxX64,
        RuntimeIdentifier::OsxArm64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WinX64 => "win-x64",
            Self::LinuxX64 => "linux-x64",
            Self::OsxX64 => "osx-x64",
            Self::OsxArm64 => "osx-arm64",
        }
    }

    pub fn os(self) -> TargetOs {
        match self {
            Self::WinX64 => TargetOs::Windows,
            Self::LinuxX64 => TargetOs::Linux,
            Self::OsxX64 | Self::OsxArm64 => TargetOs::MacOs,
        }
    }

    pub fn arch(self) -> Arch {
        match self {
            Self::OsxArm64 => Arch::AArch64,
            _ => Arch::X86_64,
        }
    }

    /// Architecture suffix used in artifact names (`x64`, `arm64`).
    pub fn arch_suffix(self) -> &'static str {
        match self.arch() {
            Arch::AArch64 => "arm64",
            _ => "x64",
        }
    }
}

impl fmt::Display for RuntimeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up the runtime identifier for an (OS, architecture) pair.
pub fn runtime_identifier(os: TargetOs, arch: Arch) -> Result<RuntimeIdentifier> {
    match (os, arch) {
        (TargetOs::Windows, Arch::X86_64) => Ok(RuntimeIdentifier::WinX64),
        (TargetOs::Linux, Arch::X86_64) => Ok(RuntimeIdentifier::LinuxX64),
        (TargetOs::MacOs, Arch::X86_64) => Ok(RuntimeIdentifier::OsxX64),
        (TargetOs::MacOs, Arch::AArch64) => Ok(RuntimeIdentifier::OsxArm64),
        _ => Err(Error::UnsupportedPlatform {
            os: os.to_string(),
            arch: arch.to_string(),
        }),
    }
}

/// Runtime identifier of the machine running the packager.
pub fn host_runtime_identifier() -> Result<RuntimeIdentifier> {
    let unsupported = || Error::UnsupportedPlatform {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
    };
    let os = TargetOs::host().ok_or_else(unsupported)?;
    let arch = Arch::host().ok_or_else(unsupported)?;
    runtime_identifier(os, arch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_table_covers_four_pairs() {
        let cases = [
            (TargetOs::Windows, Arch::X86_64, "win-x64"),
            (TargetOs::Linux, Arch::X86_64, "linux-x64"),
            (TargetOs::MacOs, Arch::X86_64, "osx-x64"),
            (TargetOs::MacOs, Arch::AArch64, "osx-arm64"),
        ];
        for (os, arch, expected) in cases {
            let rid = runtime_identifier(os, arch).unwrap();
            assert_eq!(rid.as_str(), expected);
            assert_eq!(rid.os(), os);
            assert_eq!(rid.arch(), arch);
        }
    }

    #[test]
    fn other_pairs_are_rejected() {
        let oses = [TargetOs::Windows, TargetOs::MacOs, TargetOs::Linux];
        let arches = [Arch::X86_64, Arch::X86, Arch::AArch64, Arch::Armhf];
        let mut supported = 0;
        for os in oses {
            for arch in arches {
                match runtime_identifier(os, arch) {
                    Ok(_) => supported += 1,
                    Err(e) => {
                        assert!(matches!(e, Error::UnsupportedPlatform { .. }));
                        assert!(e.is_fatal());
                    }
                }
            }
        }
        assert_eq!(supported, RuntimeIdentifier::ALL.len());
    }

    #[test]
    fn host_names_map() {
        assert_eq!(TargetOs::from_os_name("macos"), Some(TargetOs::MacOs));
        assert_eq!(TargetOs::from_os_name("freebsd"), None);
        assert_eq!(Arch::from_arch_name("aarch64"), Some(Arch::AArch64));
        assert_eq!(Arch::from_arch_name("mips"), None);
    }

    #[test]
    fn macos_release_builds_both_architectures() {
        let runtimes = TargetOs::MacOs.release_runtimes();
        let suffixes: Vec<_> = runtimes.iter().map(|r| r.arch_suffix()).collect();
        assert_eq!(suffixes, ["x64", "arm64"]);
    }
}
