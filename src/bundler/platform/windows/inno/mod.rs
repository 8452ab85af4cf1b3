//! Windows installer creation with Inno Setup.
//!
//! # Module Organization
//!
//! - `template` - ISS script template constant
//! - `toolset` - ISCC.exe discovery at known install locations
//! - `script` - ISS script generation from the template
//! - `build` - ISCC execution

mod build;
mod script;
mod template;
mod toolset;

pub use script::{generate_iss_script, installer_base_name, render_iss_script, script_path};
pub use toolset::{INNO_SETUP_DOWNLOAD_URL, find_iscc};

use crate::bundler::{
    error::{Error, Result},
    settings::Settings,
};
use std::path::{Path, PathBuf};

/// Builds the Inno Setup installer for a published Windows app.
///
/// # Process
///
/// 1. Locate ISCC.exe ([`Error::ToolNotFound`] if absent)
/// 2. Render and save the ISS script
/// 3. Compile it into `{product}-{version}-win-x64-setup.exe`
///
/// On a failed compile the script is left in place and the error names it.
pub async fn bundle_installer(settings: &Settings, publish_dir: &Path) -> Result<PathBuf> {
    let iscc = find_iscc(settings.windows())?;
    let iss_path = generate_iss_script(settings, publish_dir).await?;

    let output = build::run_iscc(&iscc, &iss_path).await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(Error::CommandStatus {
            command: format!(
                "ISCC (script kept at {} for manual compilation)",
                iss_path.display()
            ),
            code: output.status.code(),
            stderr: if stderr.trim().is_empty() {
                stdout.into_owned()
            } else {
                stderr.into_owned()
            },
        });
    }

    let installer_path = settings
        .output_directory()
        .join(format!("{}.exe", installer_base_name(settings)));
    log::info!("✓ Created Inno Setup installer: {}", installer_path.display());

    Ok(installer_path)
}
