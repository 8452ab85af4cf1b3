//! `publish`: plain self-contained build for the host runtime.

use crate::{
    bundler::{
        publish::{self, PublishFlavor, PublishRequest},
        settings::host_runtime_identifier,
    },
    cli::RuntimeConfig,
    error::Result,
};

pub async fn execute(config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();

    output.info(&format!(
        "Host OS: {}, Architecture: {}",
        std::env::consts::OS,
        std::env::consts::ARCH
    ))?;
    let runtime = host_runtime_identifier()?;
    let project = super::locate_project(config)?;

    let output_dir = project
        .parent()
        .map(|dir| dir.join("publish").join(runtime.as_str()))
        .unwrap_or_else(|| std::path::Path::new("publish").join(runtime.as_str()));

    output.progress(&format!("📦 Publishing for runtime: {runtime}"))?;
    publish::publish(&PublishRequest {
        project: &project,
        runtime,
        flavor: PublishFlavor::Plain,
        version: None,
        output_dir: &output_dir,
    })
    .await?;

    output.success(&format!("Build complete: {}", output_dir.display()))?;
    Ok(0)
}
