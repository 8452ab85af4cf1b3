//! Windows packaging: zip and/or Inno Setup installer.
//!
//! | Package type | Zip | Installer | Inno Setup missing |
//! |--------------|-----|-----------|--------------------|
//! | `zip`        | yes | no        | irrelevant         |
//! | `installer`  | no  | yes       | fatal              |
//! | `both`       | yes | yes       | zip only, warning  |

pub mod inno;

use super::{PackageOutcome, PackageType};
use crate::bundler::{
    error::{Error, Result},
    settings::{Settings, WindowsPackageType},
    utils::archive,
};
use std::path::Path;

/// Packages a published `win-x64` output.
pub async fn bundle_project(settings: &Settings, publish_dir: &Path) -> Result<PackageOutcome> {
    let package_type = settings.windows().package_type;
    log::info!(
        "Creating Windows package ({:?}) for {}",
        package_type,
        settings.product_name()
    );

    let mut outcome = PackageOutcome::default();

    if package_type.wants_zip() {
        let zip_path = settings
            .output_directory()
            .join(settings.artifact_name("win-x64", "zip"));
        let zip_path = archive::zip_directory(publish_dir, &zip_path).await?;
        outcome.push(PackageType::Zip, zip_path);
    }

    if package_type.wants_installer() {
        match inno::bundle_installer(settings, publish_dir).await {
            Ok(installer) => outcome.push(PackageType::Installer, installer),
            Err(e) if package_type == WindowsPackageType::Installer => {
                return Err(e.required("Cannot create installer"));
            }
            Err(Error::ToolNotFound { hint, .. }) => {
                outcome.warn(format!(
                    "Inno Setup not found - skipping installer creation. {hint}"
                ));
            }
            Err(e) => outcome.warn(format!("Installer creation failed: {e}")),
        }
    }

    Ok(outcome)
}
