//! Release packager for the Symphex desktop app.
//!
//! Locates the .NET project, publishes it with `dotnet publish` for each
//! target runtime and packages the output:
//! - Windows: zip and/or Inno Setup installer
//! - macOS: `.pkg` (on macOS hosts) or zip, plus a full `.app` bundle
//! - Linux: `.deb` or tar.gz
//! - any platform: Velopack releases
//!
//! It also generates NetSparkle appcasts for a directory of installers.
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
