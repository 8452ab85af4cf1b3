//! External tool discovery.
//!
//! Tools are looked up on `PATH` first, then in the .NET global tools
//! directory (`~/.dotnet/tools`), where `dotnet tool install -g` puts them.

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// `~/.dotnet/tools`, if a home directory is known.
///
/// Cached result to avoid repeated home directory lookups.
pub static DOTNET_TOOLS_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    let dir = dirs::home_dir().map(|home| home.join(".dotnet").join("tools"));
    match &dir {
        Some(dir) => log::debug!("dotnet global tools directory: {}", dir.display()),
        None => log::debug!("No home directory; dotnet global tools will not be found"),
    }
    dir
});

/// Path of a file in the .NET global tools directory, if it exists.
pub fn dotnet_tool(file_name: &str) -> Option<PathBuf> {
    dotnet_tool_in(DOTNET_TOOLS_DIR.as_deref()?, file_name)
}

fn dotnet_tool_in(tools_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let path = tools_dir.join(file_name);
    if path.is_file() {
        log::debug!("Found {} at: {}", file_name, path.display());
        Some(path)
    } else {
        None
    }
}

/// Finds `name` on `PATH`, falling back to `fallback_file` in the .NET global
/// tools directory.
pub fn find_tool(name: &str, fallback_file: &str) -> Option<PathBuf> {
    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", name, e);
            dotnet_tool(fallback_file)
        }
    }
}
