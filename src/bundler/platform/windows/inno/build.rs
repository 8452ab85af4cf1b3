//! Inno Setup compilation.

use crate::bundler::{error::Result, utils::process};
use std::{path::Path, process::Output};
use tokio::process::Command;

/// Runs ISCC.exe on a script.
///
/// Returns the captured output whatever the exit status; the caller decides
/// whether a failed compile is fatal.
pub async fn run_iscc(iscc: &Path, iss_path: &Path) -> Result<Output> {
    log::info!("Compiling {} with Inno Setup...", iss_path.display());

    let mut command = Command::new(iscc);
    command.arg(iss_path);
    process::run_captured(&mut command).await
}
