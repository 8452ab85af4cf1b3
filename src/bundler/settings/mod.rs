//! Configuration structures for release runs.
//!
//! Product metadata, platform-specific settings, build targets and the
//! builder that assembles them into [`Settings`].

mod builder;
mod core;
mod linux;
mod macos;
mod package;
mod target;
mod windows;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use linux::DebianSettings;
pub use macos::MacOsSettings;
pub use package::PackageSettings;
pub use target::{Arch, RuntimeIdentifier, TargetOs, host_runtime_identifier, runtime_identifier};
pub use windows::{DEFAULT_ISCC_LOCATIONS, WindowsPackageType, WindowsSettings};
