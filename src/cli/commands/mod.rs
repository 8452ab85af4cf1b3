//! Subcommand implementations.
//!
//! Each subcommand returns the process exit code. Shared steps (locating the
//! project, loading `Release.toml`, printing the release summary) live here.

pub mod appcast;
pub mod build;
pub mod mac_bundle;
pub mod publish;
pub mod velopack;

use super::{OutputManager, RuntimeConfig, symbols};
use crate::{
    bundler::{ReleaseReport, RuntimeIdentifier, SettingsBuilder, TargetOs},
    error::Result,
    metadata, source,
};
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Finds the project descriptor under `--project-dir`.
pub fn locate_project(config: &RuntimeConfig) -> Result<PathBuf> {
    let project = source::find_csproj(config.project_dir())?;
    config
        .output()
        .verbose(&format!("Found project: {}", project.display()))?;
    Ok(project)
}

/// Settings builder seeded from `Release.toml`.
pub fn settings_builder(config: &RuntimeConfig) -> Result<SettingsBuilder> {
    let release_config = metadata::load_config(config.project_dir(), config.config_path())?;
    Ok(SettingsBuilder::from_config(release_config))
}

/// Section title shown before a runtime is built.
pub fn runtime_title(runtime: RuntimeIdentifier) -> &'static str {
    match runtime {
        RuntimeIdentifier::WinX64 => "Windows",
        RuntimeIdentifier::OsxX64 => "macOS Intel",
        RuntimeIdentifier::OsxArm64 => "macOS Apple Silicon",
        RuntimeIdentifier::LinuxX64 => "Linux",
    }
}

/// Prints the opening lines shared by `build` and `velopack`.
pub fn print_run_header(
    output: &OutputManager,
    project: &std::path::Path,
    version: &str,
    all_platforms: bool,
) -> Result<()> {
    let host = TargetOs::host()
        .map(|os| os.to_string())
        .unwrap_or_else(|| std::env::consts::OS.to_string());
    output.info(&format!("Current OS: {host}"))?;
    output.info(&format!("Project: {}", project.display()))?;
    output.info(&format!("Version: {version}"))?;

    if all_platforms {
        output.warn("Building for ALL platforms (--all-platforms flag set)")?;
    } else {
        output.info("Building for current OS only (use --all-platforms to build for all)")?;
    }
    Ok(())
}

/// Prints warnings and failures collected during a run.
pub fn print_diagnostics(output: &OutputManager, report: &ReleaseReport) -> Result<()> {
    for warning in &report.warnings {
        output.warn(warning)?;
    }
    for failure in &report.failures {
        output.error(&format!(
            "{} packaging failed: {}",
            runtime_title(failure.runtime),
            failure.error
        ))?;
    }
    Ok(())
}

/// Prints the closing summary of a run.
pub fn print_summary(
    output: &OutputManager,
    report: &ReleaseReport,
    files_heading: &str,
    next_steps: &[String],
    notes: &[String],
) -> Result<()> {
    output.section("✨ Build Complete! ✨")?;

    output.heading(files_heading)?;
    for artifact in &report.artifacts {
        let name = artifact
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.path.display().to_string());
        output.indent(&format!(
            "{} {} ({:.2} MB)",
            symbols::ITEM,
            name,
            artifact.size_mb()
        ))?;
    }

    let output_dir = report.output_directory.absolutize()?;
    output.heading("Output directory:")?;
    output.indent(&output_dir.display().to_string())?;

    output.heading("Next steps:")?;
    for (i, step) in next_steps.iter().enumerate() {
        output.indent(&format!("{}. {}", i + 1, step))?;
    }

    if !notes.is_empty() {
        output.heading("Note:")?;
        for note in notes {
            output.indent(&format!("{} {note}", symbols::BULLET))?;
        }
    }
    Ok(())
}
