//! Project discovery and configuration loading.

mod common;

use common::fixture_project;
use symphex_release::{
    bundler::{Error, SettingsBuilder},
    metadata::load_config,
    source::find_csproj,
};

#[test]
fn finds_fixture_descriptor() {
    let project = find_csproj(&fixture_project()).unwrap();
    assert!(project.ends_with("Symphex/Symphex.csproj"));
}

#[test]
fn empty_directory_has_no_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_csproj(dir.path()).unwrap_err();
    assert!(matches!(err, Error::ProjectNotFound { .. }));
    assert!(err.to_string().starts_with("Could not find .csproj file"));
}

#[test]
fn fixture_config_feeds_settings() {
    let config = load_config(&fixture_project(), None).unwrap();
    assert_eq!(
        config.windows.iscc_path.as_deref(),
        Some(std::path::Path::new("C:/Tools/Inno Setup 6/ISCC.exe"))
    );

    let settings = SettingsBuilder::from_config(config)
        .version("1.3.0")
        .output_directory("release")
        .build()
        .unwrap();
    assert_eq!(settings.product_name(), "Symphex");
    assert_eq!(settings.debian().categories, "Audio;AudioVideo;");
    assert_eq!(
        settings.windows().iscc_candidates()[0],
        std::path::PathBuf::from("C:/Tools/Inno Setup 6/ISCC.exe")
    );
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(dir.path(), None).unwrap();
    assert_eq!(config.package.github_repo, "CyberNilsen/Symphex");

    assert!(load_config(dir.path(), Some(&dir.path().join("Nope.toml"))).is_err());
}
