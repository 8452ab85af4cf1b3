//! Linux packaging: Debian package, or a tarball when `dpkg-deb` is
//! unavailable or fails.

mod debian;

pub use debian::{deb_file_name, run_dpkg_deb, stage_deb};

use super::{PackageOutcome, PackageType};
use crate::bundler::{
    error::Result,
    settings::Settings,
    utils::{archive, fs},
};
use std::path::{Path, PathBuf};

/// Directory the package tree is staged in.
pub fn staging_dir(settings: &Settings) -> PathBuf {
    settings.output_directory().join("deb_build")
}

/// Packages a published `linux-x64` output.
///
/// The staging directory is removed whatever the outcome.
pub async fn bundle_project(settings: &Settings, publish_dir: &Path) -> Result<PackageOutcome> {
    let mut outcome = PackageOutcome::default();
    let staging = staging_dir(settings);

    let result = build_deb(settings, publish_dir, &staging).await;

    if let Err(e) = fs::remove_dir_all(&staging).await {
        log::warn!("Failed to remove staging directory: {}", e);
    }

    match result {
        Ok(deb) => outcome.push(PackageType::Deb, deb),
        Err(e) => {
            outcome.warn(format!("DEB creation skipped ({e}), creating TAR.GZ instead"));
            let tarball = settings
                .output_directory()
                .join(settings.artifact_name("linux-x64", "tar.gz"));
            let tarball = archive::tar_gz_directory(publish_dir, &tarball).await?;
            outcome.push(PackageType::TarGz, tarball);
        }
    }

    Ok(outcome)
}

async fn build_deb(settings: &Settings, publish_dir: &Path, staging: &Path) -> Result<PathBuf> {
    fs::create_dir_all(staging, true).await?;
    stage_deb(settings, publish_dir, staging).await?;

    let dpkg_deb = which::which("dpkg-deb").map_err(|_| crate::bundler::Error::ToolNotFound {
        tool: "dpkg-deb".into(),
        hint: "Install dpkg to build .deb packages.".into(),
    })?;
    log::debug!("Using dpkg-deb at {}", dpkg_deb.display());

    let deb_path = settings.output_directory().join(deb_file_name(settings));
    run_dpkg_deb(&dpkg_deb, staging, &deb_path).await
}
