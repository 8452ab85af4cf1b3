//! Project descriptor discovery.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension of the build descriptor handed to `dotnet publish`.
pub const PROJECT_EXTENSION: &str = "csproj";

/// Finds the first `*.csproj` below `root`.
///
/// Traversal order is whatever the filesystem yields; exactly one descriptor
/// is expected, so the first match wins. Unreadable entries are skipped.
pub fn find_csproj(root: &Path) -> Result<PathBuf> {
    log::debug!("Searching for .{} under {}", PROJECT_EXTENSION, root.display());

    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| path.extension().and_then(|e| e.to_str()) == Some(PROJECT_EXTENSION))
        .ok_or_else(|| Error::ProjectNotFound {
            root: root.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("src").join("App");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("App.csproj"), "<Project />").unwrap();
        std::fs::write(dir.path().join("README.md"), "readme").unwrap();

        let found = find_csproj(dir.path()).unwrap();
        assert!(found.ends_with("src/App/App.csproj"));
    }

    #[test]
    fn directory_named_like_descriptor_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("Weird.csproj")).unwrap();
        let err = find_csproj(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_csproj(&dir.path().join("nope")).unwrap_err();
        assert!(err.is_fatal());
    }
}
