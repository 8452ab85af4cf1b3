//! Plain archive creation (zip, tar.gz).
//!
//! These archives are the fallback distributables when a native packaging
//! tool is missing, and the primary output of the Windows `zip` mode.

use crate::bundler::error::{Error, Result};
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Zips the contents of `src_dir` into `dest`.
///
/// Entry names are relative to `src_dir`, so a file `src_dir/App.exe` ends up
/// at the root of the archive.
pub async fn zip_directory(src_dir: &Path, dest: &Path) -> Result<PathBuf> {
    zip_tree(src_dir, src_dir, dest).await
}

/// Zips everything below `include` into `dest`, naming entries relative to
/// `base`.
///
/// `include` must be `base` or lie inside it.
pub async fn zip_tree(base: &Path, include: &Path, dest: &Path) -> Result<PathBuf> {
    if !include.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            include.display()
        )));
    }

    let base = base.to_path_buf();
    let include = include.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&dest)?;
        let mut writer = ZipWriter::new(BufWriter::new(file));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut entries: Vec<_> = walkdir::WalkDir::new(&include)
            .into_iter()
            .collect::<std::result::Result<_, _>>()?;
        entries.sort_by(|a, b| a.path().cmp(b.path()));

        let mut file_count = 0usize;
        for entry in entries {
            let rel_path = entry.path().strip_prefix(&base)?;
            if rel_path.as_os_str().is_empty() {
                continue;
            }
            let name = entry_name(rel_path);

            if entry.file_type().is_dir() {
                writer.add_directory(format!("{name}/"), options)?;
            } else {
                let options = options.unix_permissions(unix_mode(entry.path())?);
                writer.start_file(name, options)?;
                let mut input = File::open(entry.path())?;
                io::copy(&mut input, &mut writer)?;
                file_count += 1;
            }
        }

        writer.finish()?.flush()?;
        log::debug!("Added {} files to {}", file_count, dest.display());
        Ok(dest)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Zip task panicked: {}", e)))?
}

/// Creates a gzip-compressed tarball of the contents of `src_dir`.
pub async fn tar_gz_directory(src_dir: &Path, dest: &Path) -> Result<PathBuf> {
    if !src_dir.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            src_dir.display()
        )));
    }

    let src_dir = src_dir.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let encoder = GzEncoder::new(BufWriter::new(File::create(&dest)?), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        builder.append_dir_all(".", &src_dir)?;
        builder.into_inner()?.finish()?.flush()?;
        Ok(dest)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Tarball task panicked: {}", e)))?
}

/// Zip entry names always use `/`, whatever the host separator.
fn entry_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn unix_mode(path: &Path) -> io::Result<u32> {
    use std::os::unix::fs::PermissionsExt;
    Ok(std::fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn unix_mode(_path: &Path) -> io::Result<u32> {
    Ok(0o644)
}
