//! `velopack`: unpacked publish and `vpk pack`.

use super::{print_diagnostics, print_run_header, print_summary, runtime_title};
use crate::{
    bundler::{ReleaseBuilder, ReleaseKind, platform::velopack},
    cli::{RuntimeConfig, VelopackArgs},
    error::Result,
};

pub async fn execute(args: &VelopackArgs, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();

    let vpk = velopack::find_vpk().await?;
    match &vpk.version_line {
        Some(line) => output.success(&format!("Found: {line}"))?,
        None => output.success("Velopack CLI found")?,
    }

    let project = super::locate_project(config)?;
    let settings = super::settings_builder(config)?
        .version(&args.version)
        .output_directory(&args.output)
        .build()?;

    print_run_header(output, &project, &args.version, args.all_platforms)?;
    match settings.icon_path() {
        Some(icon) => output.success(&format!("Found icon: {}", icon.display()))?,
        None => output.warn(&format!(
            "Icon not found at: {}",
            settings.package().icon.display()
        ))?,
    }

    let github_repo = settings.package().github_repo.clone();
    let builder = ReleaseBuilder::new(settings, project);
    let targets = builder.targets(args.all_platforms)?;

    let report = builder
        .run(&ReleaseKind::Velopack(vpk), &targets, |runtime| {
            let title = format!("Building {} with Velopack", runtime_title(runtime));
            if let Err(e) = output.section(&title) {
                log::debug!("Failed to print section header: {}", e);
            }
        })
        .await?;

    if args.json {
        output.json(&report)?;
        return Ok(0);
    }

    print_diagnostics(output, &report)?;

    let out = args.output.display();
    let next_steps = [
        "Test the installer on your platform".to_string(),
        format!("Upload ALL files in '{out}' to GitHub Releases"),
        "Velopack will automatically handle updates!".to_string(),
    ];
    let notes = [
        format!("Upload the entire '{out}' folder contents to GitHub"),
        "Velopack creates delta updates automatically".to_string(),
        "No need for appcast.xml - Velopack handles it".to_string(),
        format!("Update URL in app: https://github.com/{github_repo}/releases/latest/download"),
    ];

    print_summary(
        output,
        &report,
        "Velopack packages created:",
        &next_steps,
        &notes,
    )?;
    Ok(0)
}
