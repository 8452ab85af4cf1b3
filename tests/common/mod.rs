//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use symphex_release::bundler::{Settings, SettingsBuilder, TargetOs, WindowsPackageType, WindowsSettings};

/// Fixture project with a descriptor and a Release.toml.
pub fn fixture_project() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

/// Fake published output: the product executable plus a native library.
pub fn fake_publish_dir(root: &Path, runtime: &str) -> PathBuf {
    let dir = root.join("publish").join(runtime);
    std::fs::create_dir_all(dir.join("runtimes")).unwrap();
    std::fs::write(dir.join("Symphex"), b"#!/bin/sh\necho symphex\n").unwrap();
    std::fs::write(dir.join("Symphex.exe"), b"MZ").unwrap();
    std::fs::write(dir.join("runtimes/libSkiaSharp.so"), b"native").unwrap();
    dir
}

/// Settings writing to `root/release` with Inno Setup guaranteed absent.
pub fn settings(root: &Path, package_type: WindowsPackageType, host: Option<TargetOs>) -> Settings {
    SettingsBuilder::new()
        .version("1.3.0")
        .output_directory(root.join("release"))
        .working_directory(root)
        .windows_package_type(package_type)
        .windows_settings(WindowsSettings {
            iscc_locations: Some(vec![root.join("no-inno/ISCC.exe")]),
            ..Default::default()
        })
        .host_os(host)
        .build()
        .unwrap()
}

/// File names directly inside `dir`, sorted. Empty if `dir` is missing.
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
