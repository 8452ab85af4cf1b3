//! `dotnet publish` invocation.
//!
//! Each [`PublishFlavor`] is a fixed flag set. The flavors differ in how the
//! output is laid out: a single self-extracting executable for native
//! installers, unpacked files for Velopack and app bundles, or the plain
//! self-contained layout for quick local builds.

use super::{
    error::{Error, Result},
    settings::RuntimeIdentifier,
    utils::process,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::process::Command;

/// Program run when no other `dotnet` is configured.
pub const DOTNET: &str = "dotnet";

/// Build configuration passed to `dotnet publish -c`.
pub const CONFIGURATION: &str = "Release";

/// Flag set passed to `dotnet publish` on top of the common arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PublishFlavor {
    /// Self-contained, default layout, no version stamp.
    Plain,
    /// Single executable with native libraries embedded, version stamped.
    SingleFile,
    /// Unpacked files, version stamped. Required by Velopack.
    Unpacked,
    /// Unpacked, untrimmed files for a hand-built macOS `.app`. Never
    /// version stamped.
    AppBundle,
}

impl PublishFlavor {
    fn extra_args(self, version: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = match self {
            Self::Plain => Vec::new(),
            Self::SingleFile => vec![
                "-p:PublishSingleFile=true".into(),
                "-p:IncludeNativeLibrariesForSelfExtract=true".into(),
            ],
            Self::Unpacked => vec!["-p:PublishSingleFile=false".into()],
            Self::AppBundle => vec![
                "-p:IncludeNativeLibrariesForSelfExtract=true".into(),
                "-p:PublishTrimmed=false".into(),
                "-p:PublishSingleFile=false".into(),
            ],
        };
        // app bundles carry their version in Info.plist only
        if matches!(self, Self::SingleFile | Self::Unpacked) {
            if let Some(version) = version {
                args.push(format!("-p:Version={version}"));
            }
        }
        args
    }
}

/// One `dotnet publish` invocation.
#[derive(Clone, Debug)]
pub struct PublishRequest<'a> {
    pub project: &'a Path,
    pub runtime: RuntimeIdentifier,
    pub flavor: PublishFlavor,
    pub version: Option<&'a str>,
    pub output_dir: &'a Path,
}

impl PublishRequest<'_> {
    /// Full argument list after the `dotnet` program name.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "publish".into(),
            self.project.as_os_str().to_owned(),
            "-c".into(),
            CONFIGURATION.into(),
            "-r".into(),
            self.runtime.as_str().into(),
            "--self-contained".into(),
            "true".into(),
        ];
        args.extend(
            self.flavor
                .extra_args(self.version)
                .into_iter()
                .map(OsString::from),
        );
        args.push("-o".into());
        args.push(self.output_dir.as_os_str().to_owned());
        args
    }
}

/// Runs `dotnet publish` and returns the output directory.
///
/// Any failure, including `dotnet` not being installed, is
/// [`Error::PublishFailed`] and ends the run.
pub async fn publish(request: &PublishRequest<'_>) -> Result<PathBuf> {
    publish_with(Path::new(DOTNET), request).await
}

/// [`publish`] with an explicit `dotnet` program.
pub async fn publish_with(dotnet: &Path, request: &PublishRequest<'_>) -> Result<PathBuf> {
    log::info!(
        "Publishing {} for {}",
        request.project.display(),
        request.runtime
    );

    let mut command = Command::new(dotnet);
    command.args(request.args());

    let output = process::run_captured(&mut command)
        .await
        .map_err(|e| Error::PublishFailed {
            runtime: request.runtime.to_string(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        // dotnet reports build errors on stdout
        let detail = if stderr.trim().is_empty() {
            stdout.trim()
        } else {
            stderr.trim()
        };
        return Err(Error::PublishFailed {
            runtime: request.runtime.to_string(),
            reason: format!("exit status {:?}: {}", output.status.code(), detail),
        });
    }

    log::info!("✓ Published to {}", request.output_dir.display());
    Ok(request.output_dir.to_path_buf())
}
