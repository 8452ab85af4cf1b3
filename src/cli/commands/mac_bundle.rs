//! `mac-bundle`: full Apple Silicon `.app` bundle zipped for distribution.

use crate::{
    bundler::{
        PackageType, RuntimeIdentifier,
        platform::macos,
        publish::{self, PublishFlavor, PublishRequest},
    },
    cli::{MacBundleArgs, RuntimeConfig},
    error::Result,
};
use path_absolutize::Absolutize;

pub async fn execute(args: &MacBundleArgs, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    let project = super::locate_project(config)?;

    let settings = super::settings_builder(config)?
        .version(&args.version)
        .output_directory(&args.build_dir)
        .build()?;

    output.progress("Building app for macOS...")?;
    if args.build_dir.exists() {
        output.verbose(&format!(
            "Cleaning existing build directory: {}",
            args.build_dir.display()
        ))?;
    }
    let current_dir = std::env::current_dir()?;
    macos::reset_build_dir(
        &args.build_dir,
        &[config.project_dir(), project.as_path(), current_dir.as_path()],
    )
    .await?;

    publish::publish(&PublishRequest {
        project: &project,
        runtime: RuntimeIdentifier::OsxArm64,
        flavor: PublishFlavor::AppBundle,
        version: None,
        output_dir: &args.build_dir,
    })
    .await?;
    output.success("Build completed successfully")?;

    output.progress("Creating app bundle...")?;
    let zip_path = args.zip.absolutize()?.into_owned();
    let outcome = macos::bundle_full_app(&settings, &args.build_dir, &zip_path).await?;

    for warning in &outcome.warnings {
        output.warn(warning)?;
    }

    for zip in outcome.paths_of(PackageType::AppBundle) {
        let size = tokio::fs::metadata(zip).await?.len();
        output.success(&format!(
            "Zip archive created: {} ({:.1} MB)",
            zip.display(),
            size as f64 / (1024.0 * 1024.0)
        ))?;
    }

    output.success("macOS app bundle created successfully!")?;
    output.indent(&format!(
        "You can now distribute the {} file",
        args.zip.display()
    ))?;
    output.indent(&format!(
        "Check the {} directory for the .app bundle",
        args.build_dir.display()
    ))?;
    Ok(0)
}
