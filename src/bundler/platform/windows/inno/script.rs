//! Inno Setup script generation.
//!
//! Renders the `.iss` script from [`ISS_TEMPLATE`] with Handlebars and saves
//! it under `installer_scripts/` so a failed compile can be retried by hand.

use super::template::ISS_TEMPLATE;
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
};
use handlebars::Handlebars;
use path_absolutize::Absolutize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};
use tokio::io::AsyncWriteExt;

/// Output file name of the installer without extension.
pub fn installer_base_name(settings: &Settings) -> String {
    format!(
        "{}-{}-win-x64-setup",
        settings.product_name(),
        settings.version_string()
    )
}

/// Path the generated script is saved to.
pub fn script_path(settings: &Settings) -> PathBuf {
    settings
        .working_directory()
        .join("installer_scripts")
        .join(format!(
            "{}-{}.iss",
            settings.product_name(),
            settings.version_string()
        ))
}

/// Renders the Inno Setup script for `publish_dir`.
pub fn render_iss_script(settings: &Settings, publish_dir: &Path) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let product = settings.product_name();
    let package = settings.package();
    let app_exe = format!("{{app}}\\{product}.exe");

    let output_dir = absolute(settings.output_directory())?;
    let publish_dir = absolute(publish_dir)?;

    let icon_lines = match settings.icon_path() {
        Some(icon) => format!(
            "SetupIconFile={}\nUninstallDisplayIcon={}",
            absolute(&icon)?.display(),
            app_exe
        ),
        None => format!("UninstallDisplayIcon={app_exe}"),
    };

    let mut data = BTreeMap::new();
    data.insert("product_name", product.to_string());
    data.insert("version", settings.version_string().to_string());
    data.insert("publisher", package.publisher.clone());
    data.insert("publisher_url", package.publisher_url.clone());
    data.insert("default_dir", format!("{{autopf}}\\{product}"));
    data.insert("output_dir", output_dir.display().to_string());
    data.insert("output_base_filename", installer_base_name(settings));
    data.insert("icon_lines", icon_lines);
    data.insert("files_source", format!("{}\\*", publish_dir.display()));
    data.insert("group_icon", format!("{{group}}\\{product}"));
    data.insert("desktop_icon", format!("{{autodesktop}}\\{product}"));
    data.insert("app_exe", app_exe);
    data.insert("launch_description", format!("{{cm:LaunchProgram,{product}}}"));

    handlebars
        .register_template_string("installer.iss", ISS_TEMPLATE)
        .map_err(|e| Error::GenericError(format!("failed to register ISS template: {}", e)))?;

    handlebars
        .render("installer.iss", &data)
        .map_err(|e| Error::GenericError(format!("failed to render ISS template: {}", e)))
}

/// Renders and saves the script, returning its path.
pub async fn generate_iss_script(settings: &Settings, publish_dir: &Path) -> Result<PathBuf> {
    let content = render_iss_script(settings, publish_dir)?;
    let iss_path = script_path(settings);
    if let Some(parent) = iss_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer_scripts directory", parent)?;
    }
    write_utf8_bom(&iss_path, &content).await?;
    log::info!("Inno Setup script saved to: {}", iss_path.display());
    Ok(iss_path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}

/// Write file with UTF-8 BOM so ISCC reads the script as Unicode.
async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating ISS script file", path)?;

    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing ISS content", path)?;
    file.flush().await.fs_context("flushing ISS file", path)?;

    Ok(())
}
