//! Symphex release packager.
//!
//! Publishes the app for each platform and creates native packages, Velopack
//! releases and appcasts.

use std::process;
use symphex_release::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            cli::report_error(&e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
