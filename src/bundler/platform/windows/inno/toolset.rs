//! Inno Setup compiler discovery.
//!
//! ISCC.exe is looked up only at fixed install locations; it is not expected
//! on PATH.

use crate::bundler::{error::Error, settings::WindowsSettings};
use std::path::PathBuf;

/// Where to download Inno Setup.
pub const INNO_SETUP_DOWNLOAD_URL: &str = "https://jrsoftware.org/isdl.php";

/// Locates ISCC.exe.
///
/// Returns the first candidate from [`WindowsSettings::iscc_candidates`] that
/// exists, or [`Error::ToolNotFound`].
pub fn find_iscc(settings: &WindowsSettings) -> Result<PathBuf, Error> {
    let candidates = settings.iscc_candidates();
    for candidate in &candidates {
        if candidate.is_file() {
            log::debug!("Found Inno Setup compiler at {}", candidate.display());
            return Ok(candidate.clone());
        }
        log::debug!("No Inno Setup compiler at {}", candidate.display());
    }

    Err(Error::ToolNotFound {
        tool: "Inno Setup".into(),
        hint: format!("Download from: {}", INNO_SETUP_DOWNLOAD_URL),
    })
}
