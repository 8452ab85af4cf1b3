//! Velopack packaging (`vpk pack`).
//!
//! Velopack produces a setup executable plus the full and delta update
//! packages in the output directory. Everything in that directory is meant
//! to be uploaded to the release.

use super::{PackageOutcome, PackageType};
use crate::bundler::{
    error::{Error, Result},
    settings::{RuntimeIdentifier, Settings, TargetOs},
    tools,
    utils::process,
};
use path_absolutize::Absolutize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::SystemTime,
};
use tokio::process::Command;

/// Install hint shown when `vpk` cannot be found.
pub const VPK_INSTALL_HINT: &str = "Install it with: dotnet tool install -g vpk";

/// A usable Velopack CLI.
#[derive(Clone, Debug)]
pub struct VelopackCli {
    pub program: PathBuf,
    /// The `Velopack CLI ...` line of `vpk --help`, if present.
    pub version_line: Option<String>,
}

/// Extracts the `Velopack CLI` line from `vpk --help` output.
pub fn velopack_version_line(help: &str) -> Option<String> {
    help.lines()
        .find(|line| line.contains("Velopack CLI"))
        .map(|line| line.trim().to_string())
}

async fn check_vpk(program: &Path) -> Result<Option<String>> {
    let mut command = Command::new(program);
    command.arg("--help");
    let output = process::run_checked(&mut command).await?;
    Ok(velopack_version_line(&String::from_utf8_lossy(
        &output.stdout,
    )))
}

/// Finds `vpk` on `PATH` or in the .NET global tools directory.
///
/// A missing CLI is [`Error::ToolNotFound`]. A CLI that is found but whose
/// `--help` check fails is a required-step error.
pub async fn find_vpk() -> Result<VelopackCli> {
    let on_path = PathBuf::from("vpk");
    if let Ok(version_line) = check_vpk(&on_path).await {
        return Ok(VelopackCli {
            program: on_path,
            version_line,
        });
    }

    let Some(program) = tools::dotnet_tool("vpk.exe") else {
        return Err(Error::ToolNotFound {
            tool: "Velopack CLI (vpk)".into(),
            hint: VPK_INSTALL_HINT.into(),
        });
    };

    let version_line = check_vpk(&program)
        .await
        .map_err(|e| e.required("Velopack CLI check failed"))?;
    Ok(VelopackCli {
        program,
        version_line,
    })
}

/// Main executable name passed to `vpk pack -e`.
pub fn main_exe(settings: &Settings, runtime: RuntimeIdentifier) -> String {
    match runtime.os() {
        TargetOs::Windows => format!("{}.exe", settings.product_name()),
        _ => settings.product_name().to_string(),
    }
}

/// Arguments of `vpk pack` after the program name.
pub fn pack_args(
    settings: &Settings,
    runtime: RuntimeIdentifier,
    publish_dir: &Path,
    output_dir: &Path,
) -> Vec<String> {
    let mut args = vec![
        "pack".to_string(),
        "-u".to_string(),
        settings.product_name().to_string(),
        "-v".to_string(),
        settings.version_string().to_string(),
        "-p".to_string(),
        publish_dir.display().to_string(),
        "-e".to_string(),
        main_exe(settings, runtime),
        "-o".to_string(),
        output_dir.display().to_string(),
    ];

    // macOS wants .icns, Linux takes no icon
    if runtime.os() == TargetOs::Windows {
        if let Some(icon) = settings.icon_path() {
            match icon.absolutize() {
                Ok(icon) => {
                    args.push("-i".to_string());
                    args.push(icon.display().to_string());
                }
                Err(e) => log::warn!("Could not resolve icon path {}: {}", icon.display(), e),
            }
        }
    }

    args
}

/// Default Velopack channel of a runtime, used in the setup file name.
pub fn channel(runtime: RuntimeIdentifier) -> &'static str {
    match runtime.os() {
        TargetOs::Windows => "win",
        TargetOs::MacOs => "osx",
        TargetOs::Linux => "linux",
    }
}

/// Modification times of the setup files in an output directory.
///
/// Taken before `vpk pack` runs, so files left by earlier targets or runs
/// are not mistaken for this run's output.
#[derive(Clone, Debug, Default)]
pub struct SetupSnapshot {
    seen: HashMap<PathBuf, Option<SystemTime>>,
}

impl SetupSnapshot {
    pub fn take(product: &str, output_dir: &Path) -> Result<Self> {
        let seen = setup_candidates(product, output_dir)?
            .into_iter()
            .map(|path| {
                let modified = modified(&path);
                (path, modified)
            })
            .collect();
        Ok(Self { seen })
    }

    /// Whether `path` was created or rewritten after the snapshot.
    pub fn is_new(&self, path: &Path) -> bool {
        match self.seen.get(path) {
            Some(before) => before.is_none() || *before != modified(path),
            None => true,
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn setup_candidates(product: &str, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let dir = glob::Pattern::escape(&output_dir.to_string_lossy());
    let mut found = Vec::new();
    for pattern in [
        format!("{dir}/{product}-*-Setup.exe"),
        format!("{dir}/{product}-*Setup.exe"),
    ] {
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(|m| m.ok()).collect();
        matches.sort();
        for path in matches {
            if !found.contains(&path) {
                found.push(path);
            }
        }
    }
    Ok(found)
}

/// Finds the setup executable `vpk pack` wrote for `runtime`.
///
/// The channel name (`{product}-linux-Setup.exe`) wins; otherwise the first
/// new file matching the Velopack patterns.
pub fn find_setup_file(
    product: &str,
    runtime: RuntimeIdentifier,
    output_dir: &Path,
    before: &SetupSnapshot,
) -> Result<Option<PathBuf>> {
    let expected = output_dir.join(format!("{}-{}-Setup.exe", product, channel(runtime)));
    if expected.is_file() && before.is_new(&expected) {
        return Ok(Some(expected));
    }

    Ok(setup_candidates(product, output_dir)?
        .into_iter()
        .find(|path| before.is_new(path)))
}

/// Packs a published output with Velopack.
///
/// `vpk` output is streamed to the console.
pub async fn bundle_project(
    settings: &Settings,
    vpk: &VelopackCli,
    runtime: RuntimeIdentifier,
    publish_dir: &Path,
) -> Result<PackageOutcome> {
    let output_dir = settings.output_directory();
    let product = settings.product_name();
    let mut outcome = PackageOutcome::default();

    let before = SetupSnapshot::take(product, output_dir)?;

    let mut command = Command::new(&vpk.program);
    command.args(pack_args(settings, runtime, publish_dir, output_dir));

    let status = process::run_streaming(&mut command).await?;
    if !status.success() {
        return Err(Error::CommandStatus {
            command: "vpk pack".into(),
            code: status.code(),
            stderr: String::new(),
        });
    }

    match find_setup_file(product, runtime, output_dir, &before)? {
        Some(setup) => outcome.push(PackageType::Velopack, setup),
        None => {
            outcome.warn("Setup file not found, but packaging completed");
            let assumed = output_dir.join(format!("{}-{}-Setup.exe", product, channel(runtime)));
            outcome.push(PackageType::Velopack, assumed);
        }
    }

    Ok(outcome)
}
