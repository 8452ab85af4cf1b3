//! `build`: single-file publish and native packages.

use super::{print_diagnostics, print_run_header, print_summary, runtime_title};
use crate::{
    bundler::{ReleaseBuilder, ReleaseKind, TargetOs, platform::windows::inno::INNO_SETUP_DOWNLOAD_URL},
    cli::{BuildArgs, RuntimeConfig},
    error::Result,
};

pub async fn execute(args: &BuildArgs, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    let project = super::locate_project(config)?;

    let settings = super::settings_builder(config)?
        .version(&args.version)
        .output_directory(&args.output)
        .windows_package_type(args.package_type)
        .build()?;

    print_run_header(output, &project, &args.version, args.all_platforms)?;

    let builder = ReleaseBuilder::new(settings, project);
    let targets = builder.targets(args.all_platforms)?;

    let report = builder
        .run(&ReleaseKind::Native, &targets, |runtime| {
            if let Err(e) = output.section(&format!("Building {}", runtime_title(runtime))) {
                log::debug!("Failed to print section header: {}", e);
            }
        })
        .await?;

    if args.json {
        output.json(&report)?;
        return Ok(0);
    }

    print_diagnostics(output, &report)?;

    let next_steps = [
        "Test the installer(s) on your platform".to_string(),
        "When ready, manually upload to GitHub Releases".to_string(),
        "Run the app cast generator to create update manifest".to_string(),
    ];

    let mut notes = Vec::new();
    if !args.all_platforms {
        let host = TargetOs::host()
            .map(|os| os.to_string())
            .unwrap_or_else(|| std::env::consts::OS.to_string());
        notes.push(format!(
            "Only built for {host} (use --all-platforms to build for all)"
        ));
    }
    notes.extend([
        format!("Windows installer requires Inno Setup: {INNO_SETUP_DOWNLOAD_URL}"),
        "Use --package-type to choose: zip, installer, or both".to_string(),
        "macOS PKG requires running on macOS".to_string(),
        "Linux DEB requires dpkg-deb".to_string(),
        "Falls back to ZIP/TAR.GZ if tools are missing".to_string(),
    ]);

    print_summary(output, &report, "Files created:", &next_steps, &notes)?;
    Ok(0)
}
