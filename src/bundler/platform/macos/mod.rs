//! macOS packaging: `.pkg` installers and zipped `.app` bundles.
//!
//! # Module Organization
//!
//! - `bundle` - `.app` layout and `Info.plist`
//! - `pkg` - `pkgbuild` invocation
//!
//! Installer packages can only be built on a macOS host. Elsewhere, or when
//! `pkgbuild` fails, the published output is zipped instead.

mod bundle;
mod pkg;

pub use bundle::{FullBundle, InfoPlist, assemble_full_bundle, find_executable, stage_app_bundle};
pub use pkg::{install_location, run_pkgbuild};

use super::{PackageOutcome, PackageType};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{RuntimeIdentifier, Settings, TargetOs},
    utils::{archive, fs, process},
};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Directory a bundle is staged in before `pkgbuild`.
pub fn staging_dir(settings: &Settings, runtime: RuntimeIdentifier) -> PathBuf {
    settings
        .output_directory()
        .join(format!(".{}-{}-bundle", settings.product_name(), runtime))
}

/// Packages a published `osx-*` output.
///
/// The staging directory is removed whatever the outcome.
pub async fn bundle_project(
    settings: &Settings,
    runtime: RuntimeIdentifier,
    publish_dir: &Path,
) -> Result<PackageOutcome> {
    let platform = format!("osx-{}", runtime.arch_suffix());
    let mut outcome = PackageOutcome::default();

    if settings.host_os() != Some(TargetOs::MacOs) {
        outcome.warn("Not on macOS - creating ZIP instead of PKG");
        let zip_path = zip_fallback(settings, &platform, publish_dir).await?;
        outcome.push(PackageType::Zip, zip_path);
        return Ok(outcome);
    }

    let staging = staging_dir(settings, runtime);
    let pkg_path = settings
        .output_directory()
        .join(settings.artifact_name(&platform, "pkg"));

    let result = build_pkg(settings, publish_dir, &staging, &pkg_path).await;

    if let Err(e) = fs::remove_dir_all(&staging).await {
        log::warn!("Failed to remove staging directory: {}", e);
    }

    match result {
        Ok(()) => outcome.push(PackageType::Pkg, pkg_path),
        Err(e) => {
            outcome.warn(format!("PKG creation failed ({e}), creating ZIP instead"));
            let zip_path = zip_fallback(settings, &platform, publish_dir).await?;
            outcome.push(PackageType::Zip, zip_path);
        }
    }

    Ok(outcome)
}

async fn build_pkg(
    settings: &Settings,
    publish_dir: &Path,
    staging: &Path,
    pkg_path: &Path,
) -> Result<()> {
    fs::create_dir_all(staging, true).await?;
    let app_dir = stage_app_bundle(settings, publish_dir, staging).await?;
    run_pkgbuild(settings, &app_dir, pkg_path).await
}

async fn zip_fallback(settings: &Settings, platform: &str, publish_dir: &Path) -> Result<PathBuf> {
    let zip_path = settings
        .output_directory()
        .join(settings.artifact_name(platform, "zip"));
    archive::zip_directory(publish_dir, &zip_path).await
}

/// Empties `build_dir` for a fresh publish.
///
/// Refuses to wipe a directory that is, or contains, any of `keep` (the
/// project directory, the `.csproj`, the current directory). Paths that do
/// not exist are not checked.
pub async fn reset_build_dir(build_dir: &Path, keep: &[&Path]) -> Result<()> {
    if build_dir.exists() {
        let resolved = tokio::fs::canonicalize(build_dir)
            .await
            .fs_context("resolving build directory", build_dir)?;
        for path in keep {
            let Ok(kept) = tokio::fs::canonicalize(path).await else {
                continue;
            };
            if kept.starts_with(&resolved) {
                return Err(Error::InvalidArgument {
                    reason: format!(
                        "refusing to clean build directory {}: it contains {}",
                        build_dir.display(),
                        path.display()
                    ),
                });
            }
        }
        log::debug!("Cleaning build directory {}", build_dir.display());
    }
    fs::create_dir_all(build_dir, true).await
}

/// Builds the full `.app` bundle inside `build_dir` and zips it to
/// `zip_path`, entry names relative to `build_dir`.
///
/// Clearing extended attributes is best effort.
pub async fn bundle_full_app(
    settings: &Settings,
    build_dir: &Path,
    zip_path: &Path,
) -> Result<PackageOutcome> {
    let mut outcome = PackageOutcome::default();
    let bundle = assemble_full_bundle(settings, build_dir).await?;

    let mut xattr = Command::new("xattr");
    xattr.arg("-cr").arg(&bundle.app_dir);
    match process::run_checked(&mut xattr).await {
        Ok(_) => log::info!("Removed quarantine attributes"),
        Err(e) => outcome.warn(format!("Could not remove quarantine attributes: {e}")),
    }

    if zip_path.exists() {
        tokio::fs::remove_file(zip_path).await?;
        log::debug!("Removed existing zip: {}", zip_path.display());
    }
    let zip_path = archive::zip_tree(build_dir, &bundle.app_dir, zip_path).await?;
    outcome.push(PackageType::AppBundle, zip_path);

    Ok(outcome)
}
