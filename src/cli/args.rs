//! Command line argument parsing and validation.

use crate::bundler::WindowsPackageType;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Release packager for the Symphex desktop app
#[derive(Parser, Debug)]
#[command(
    name = "symphex_release",
    version,
    about = "Publish, package and ship Symphex releases",
    long_about = "Publishes the Symphex .NET project with `dotnet publish` and packages the output
into native distributables: zip and Inno Setup installer on Windows, .pkg on macOS,
.deb on Linux, with zip/tar.gz fallbacks when packaging tools are missing.

Usage:
  symphex_release build --version 1.3.0
  symphex_release build --version 1.3.0 --all-platforms --package-type zip
  symphex_release velopack --version 1.3.0
  symphex_release appcast --version 1.3.0 --url https://github.com/CyberNilsen/Symphex/releases/download/v1.3.0

Exit code 0 = run completed; 1 = unrecoverable failure."
)]
pub struct Args {
    /// Directory searched for the .csproj and Release.toml
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Explicit Release.toml path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show commands and internal diagnostics
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish single-file builds and create native packages
    Build(BuildArgs),
    /// Publish unpacked builds and pack them with Velopack
    Velopack(VelopackArgs),
    /// Publish a plain self-contained build for this machine
    Publish,
    /// Build a complete Apple Silicon .app bundle and zip it
    MacBundle(MacBundleArgs),
    /// Generate a NetSparkle appcast for a directory of installers
    Appcast(AppcastArgs),
}

#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Version number (e.g., 1.3.0)
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = "release")]
    pub output: PathBuf,

    /// Build for all platforms (default: current OS only)
    #[arg(long)]
    pub all_platforms: bool,

    /// Windows package type
    #[arg(long, value_enum, default_value_t = WindowsPackageType::Both)]
    pub package_type: WindowsPackageType,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct VelopackArgs {
    /// Version number (e.g., 1.3.0)
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Output directory
    #[arg(long, value_name = "DIR", default_value = "releases")]
    pub output: PathBuf,

    /// Build for all platforms (default: current OS only)
    #[arg(long)]
    pub all_platforms: bool,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct MacBundleArgs {
    /// Version written to Info.plist
    #[arg(long, value_name = "VERSION", default_value = "1.0.0")]
    pub version: String,

    /// Publish and bundle directory (wiped first; may not hold the project)
    #[arg(long, value_name = "DIR", default_value = "build")]
    pub build_dir: PathBuf,

    /// Zip archive to create
    #[arg(long, value_name = "FILE", default_value = "Mac.zip")]
    pub zip: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AppcastArgs {
    /// Version number (e.g., 1.3.0)
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Base download URL where the files are hosted
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// Directory with the installers
    #[arg(long, value_name = "DIR", default_value = "release")]
    pub installers_dir: PathBuf,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let version = match &self.command {
            Command::Build(args) => Some(&args.version),
            Command::Velopack(args) => Some(&args.version),
            Command::MacBundle(args) => Some(&args.version),
            Command::Appcast(args) => Some(&args.version),
            Command::Publish => None,
        };

        if let Some(version) = version {
            validate_version(version)?;
        }

        if let Command::Appcast(args) = &self.command {
            if args.url.trim().is_empty() {
                return Err("--url cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Versions end up in file names and `-p:Version=`, so they must be a
/// single non-empty token.
fn validate_version(version: &str) -> Result<(), String> {
    if version.is_empty() {
        return Err("--version cannot be empty".to_string());
    }
    if version.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(format!("Invalid version: {version:?}"));
    }
    Ok(())
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
    project_dir: PathBuf,
    config: Option<PathBuf>,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
            project_dir: args.project_dir.clone(),
            config: args.config.clone(),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("symphex_release").chain(args.iter().copied()))
    }

    #[test]
    fn build_defaults() {
        let args = parse(&["build", "--version", "1.3.0"]).unwrap();
        let Command::Build(build) = &args.command else {
            panic!("expected build");
        };
        assert_eq!(build.output, PathBuf::from("release"));
        assert_eq!(build.package_type, WindowsPackageType::Both);
        assert!(!build.all_platforms);
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn package_type_is_restricted() {
        assert!(parse(&["build", "--version", "1.0.0", "--package-type", "msi"]).is_err());
        let args = parse(&["build", "--version", "1.0.0", "--package-type", "installer"]).unwrap();
        let Command::Build(build) = args.command else {
            panic!("expected build");
        };
        assert_eq!(build.package_type, WindowsPackageType::Installer);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = parse(&["velopack", "--version", "2.0.0", "--project-dir", "app", "-q"]).unwrap();
        assert_eq!(args.project_dir, PathBuf::from("app"));
        assert!(args.quiet);
        let Command::Velopack(velopack) = args.command else {
            panic!("expected velopack");
        };
        assert_eq!(velopack.output, PathBuf::from("releases"));
    }

    #[test]
    fn version_is_required_and_validated() {
        assert!(parse(&["build"]).is_err());
        let args = parse(&["appcast", "--version", "1 0", "--url", "https://x"]).unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn mac_bundle_defaults() {
        let args = parse(&["mac-bundle"]).unwrap();
        let Command::MacBundle(bundle) = args.command else {
            panic!("expected mac-bundle");
        };
        assert_eq!(bundle.version, "1.0.0");
        assert_eq!(bundle.build_dir, PathBuf::from("build"));
        assert_eq!(bundle.zip, PathBuf::from("Mac.zip"));
    }
}
