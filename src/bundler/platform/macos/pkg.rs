//! Installer package creation with `pkgbuild`.

use crate::bundler::{error::Result, settings::Settings, utils::process};
use std::path::Path;
use tokio::process::Command;

/// Default install location of the bundle.
pub fn install_location(settings: &Settings) -> String {
    settings
        .macos()
        .install_location
        .clone()
        .unwrap_or_else(|| format!("/Applications/{}.app", settings.product_name()))
}

/// Runs `pkgbuild` over a staged `.app` bundle.
pub async fn run_pkgbuild(settings: &Settings, app_dir: &Path, pkg_path: &Path) -> Result<()> {
    let mut command = Command::new("pkgbuild");
    command
        .arg("--root")
        .arg(app_dir)
        .args(["--identifier", &settings.package().bundle_identifier])
        .args(["--version", settings.version_string()])
        .args(["--install-location", &install_location(settings)])
        .arg(pkg_path);

    process::run_checked(&mut command).await?;
    Ok(())
}
