//! Locate, publish, package and appcast generation.
//!
//! # Module Organization
//!
//! - [`settings`] - Merged configuration handed to every packager
//! - [`publish`] - `dotnet publish` with fixed flag sets
//! - [`platform`] - Windows, macOS, Linux and Velopack packagers
//! - [`builder`] - Per-runtime orchestration and the release report
//! - [`appcast`] - NetSparkle update feed generation
//! - [`tools`] - External tool discovery
//! - [`utils`] - File system, process and archive helpers

pub mod appcast;
pub mod builder;
pub mod error;
pub mod platform;
pub mod publish;
pub mod settings;
pub mod tools;
pub mod utils;

pub use builder::{BundledArtifact, PlatformFailure, ReleaseBuilder, ReleaseKind, ReleaseReport};
pub use error::{Error, Result};
pub use platform::{PackageOutcome, PackageOutput, PackageType};
pub use settings::{
    Arch, DebianSettings, MacOsSettings, PackageSettings, RuntimeIdentifier, Settings,
    SettingsBuilder, TargetOs, WindowsPackageType, WindowsSettings,
};
