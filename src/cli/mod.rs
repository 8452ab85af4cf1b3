//! Command line interface for the release packager.
//!
//! Parses arguments, sets up logging and dispatches to the subcommand
//! implementations in [`commands`].

mod args;
pub mod commands;
mod output;

pub use args::{
    AppcastArgs, Args, BuildArgs, Command, MacBundleArgs, RuntimeConfig, VelopackArgs,
};
pub use output::{OutputManager, symbols};

use crate::error::{CliError, ReleaseError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(&args);

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    match &args.command {
        Command::Build(build) => commands::build::execute(build, &config).await,
        Command::Velopack(velopack) => commands::velopack::execute(velopack, &config).await,
        Command::Publish => commands::publish::execute(&config).await,
        Command::MacBundle(bundle) => commands::mac_bundle::execute(bundle, &config).await,
        Command::Appcast(appcast) => commands::appcast::execute(appcast, &config).await,
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` shows info-level diagnostics.
fn init_logging(args: &Args) {
    let default_filter = if args.verbose { "info" } else { "error" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

/// Prints a failed run's error with recovery suggestions.
pub fn report_error(error: &ReleaseError) {
    let output = OutputManager::new(false, false);
    if output.error(&error.to_string()).is_err() {
        return;
    }
    for suggestion in error.recovery_suggestions() {
        if output.indent(&suggestion).is_err() {
            return;
        }
    }
}
