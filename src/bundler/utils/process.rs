//! External process execution.
//!
//! Every external tool (dotnet, ISCC, pkgbuild, dpkg-deb, vpk, the appcast
//! generator) runs to completion before the caller continues. There is no
//! timeout: a hung tool hangs the run.

use crate::bundler::error::{Error, Result};
use std::process::{ExitStatus, Output};
use tokio::process::Command;

/// Renders a command line for logs and error messages.
pub fn describe(command: &Command) -> String {
    let std = command.as_std();
    std::iter::once(std.get_program())
        .chain(std.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs a command with captured stdout/stderr.
///
/// Returns the output whatever the exit status; only a failure to spawn is
/// an error.
pub async fn run_captured(command: &mut Command) -> Result<Output> {
    let description = describe(command);
    log::info!("Running: {}", description);

    command.output().await.map_err(|error| Error::CommandFailed {
        command: description,
        error,
    })
}

/// Runs a command with captured output and fails on a non-zero exit.
pub async fn run_checked(command: &mut Command) -> Result<Output> {
    let output = run_captured(command).await?;
    if !output.status.success() {
        return Err(Error::CommandStatus {
            command: describe(command),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(output)
}

/// Runs a command with inherited stdio so the tool's progress stays visible.
pub async fn run_streaming(command: &mut Command) -> Result<ExitStatus> {
    let description = describe(command);
    log::info!("Running: {}", description);

    command.status().await.map_err(|error| Error::CommandFailed {
        command: description,
        error,
    })
}
