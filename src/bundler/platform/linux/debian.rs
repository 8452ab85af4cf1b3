//! Debian package staging and `dpkg-deb` invocation.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::{fs, process},
};
use std::path::{Path, PathBuf};
use tokio::{io::AsyncWriteExt, process::Command};

/// `{product_lower}_{version}_amd64.deb`
pub fn deb_file_name(settings: &Settings) -> String {
    format!(
        "{}_{}_amd64.deb",
        settings.package().binary_name_lower(),
        settings.version_string()
    )
}

/// Lays out the package tree under `staging`.
///
/// ```text
/// staging/
/// ├── DEBIAN/control
/// └── usr/
///     ├── bin/{product_lower}
///     └── share/applications/{product_lower}.desktop
/// ```
pub async fn stage_deb(settings: &Settings, publish_dir: &Path, staging: &Path) -> Result<()> {
    let executable = publish_dir.join(settings.product_name());
    if !executable.is_file() {
        return Err(Error::GenericError(format!(
            "Executable not found in publish output: {}",
            executable.display()
        )));
    }

    let lower = settings.package().binary_name_lower();
    let bin_dir = staging.join("usr/bin");
    let applications_dir = staging.join("usr/share/applications");
    let debian_dir = staging.join("DEBIAN");

    for dir in [&bin_dir, &applications_dir, &debian_dir] {
        fs::create_dir_all(dir, false).await?;
    }

    let installed = bin_dir.join(&lower);
    fs::copy_file(&executable, &installed).await?;
    fs::set_executable(&installed).await?;

    create_control_file(settings, &debian_dir.join("control")).await?;
    create_desktop_file(settings, &applications_dir.join(format!("{lower}.desktop"))).await?;

    Ok(())
}

/// Writes `DEBIAN/control`.
async fn create_control_file(settings: &Settings, path: &Path) -> Result<()> {
    let package = settings.package();
    let debian = settings.debian();

    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating control file", path)?;

    file.write_all(format!("Package: {}\n", package.binary_name_lower()).as_bytes())
        .await?;
    file.write_all(format!("Version: {}\n", settings.version_string()).as_bytes())
        .await?;
    file.write_all(format!("Section: {}\n", debian.section).as_bytes())
        .await?;
    file.write_all(format!("Priority: {}\n", debian.priority).as_bytes())
        .await?;
    file.write_all(b"Architecture: amd64\n").await?;
    file.write_all(format!("Maintainer: {}\n", debian.maintainer).as_bytes())
        .await?;
    file.write_all(format!("Description: {}\n", package.description).as_bytes())
        .await?;
    file.write_all(format!(" {}\n", package.long_description).as_bytes())
        .await?;

    file.flush().await?;
    Ok(())
}

/// Writes the freedesktop.org entry installed under `usr/share/applications`.
async fn create_desktop_file(settings: &Settings, path: &Path) -> Result<()> {
    let debian = settings.debian();

    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating desktop file", path)?;

    file.write_all(b"[Desktop Entry]\n").await?;
    file.write_all(b"Type=Application\n").await?;
    file.write_all(format!("Name={}\n", settings.product_name()).as_bytes())
        .await?;
    file.write_all(format!("Comment={}\n", debian.desktop_comment).as_bytes())
        .await?;
    file.write_all(
        format!("Exec=/usr/bin/{}\n", settings.package().binary_name_lower()).as_bytes(),
    )
    .await?;
    file.write_all(b"Terminal=false\n").await?;
    file.write_all(format!("Categories={}\n", debian.categories).as_bytes())
        .await?;

    file.flush().await?;
    Ok(())
}

/// Runs `dpkg-deb --build` over a staged tree.
pub async fn run_dpkg_deb(dpkg_deb: &Path, staging: &Path, deb_path: &Path) -> Result<PathBuf> {
    let mut command = Command::new(dpkg_deb);
    command.arg("--build").arg(staging).arg(deb_path);
    process::run_checked(&mut command).await?;
    Ok(deb_path.to_path_buf())
}
