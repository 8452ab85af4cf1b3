//! CLI smoke tests.
//!
//! Every case here fails before `dotnet` would be invoked.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn release_cmd() -> Command {
    cargo_bin_cmd!("symphex_release")
}

#[test]
fn help_lists_subcommands() {
    release_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("velopack"))
        .stdout(predicate::str::contains("appcast"))
        .stdout(predicate::str::contains("mac-bundle"));
}

#[test]
fn build_without_project_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd()
        .current_dir(dir.path())
        .args(["build", "--version", "1.0.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find .csproj file"));
}

#[test]
fn project_dir_flag_is_searched() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd()
        .current_dir(dir.path())
        .args(["build", "--version", "1.0.0", "--project-dir", "missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn unknown_package_type_is_rejected() {
    release_cmd()
        .args(["build", "--version", "1.0.0", "--package-type", "msi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'msi'"));
}

#[test]
fn empty_version_is_rejected() {
    release_cmd()
        .args(["build", "--version", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--version cannot be empty"));
}

#[test]
fn missing_explicit_config_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("App.csproj"), "<Project />").unwrap();
    release_cmd()
        .current_dir(dir.path())
        .args(["build", "--version", "1.0.0", "--config", "Other.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn appcast_requires_installers_dir() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd()
        .current_dir(dir.path())
        .args([
            "appcast",
            "--version",
            "1.3.0",
            "--url",
            "https://github.com/CyberNilsen/Symphex/releases/download/v1.3.0",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn appcast_rejects_relative_url() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("release")).unwrap();
    release_cmd()
        .current_dir(dir.path())
        .args(["appcast", "--version", "1.3.0", "--url", "downloads/v1.3.0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn publish_without_project_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    release_cmd()
        .current_dir(dir.path())
        .arg("publish")
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains("Could not find .csproj file")
                .or(predicate::str::contains("Unsupported platform")),
        );
}

#[test]
fn mac_bundle_refuses_to_wipe_the_project() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("App.csproj"), "<Project />").unwrap();
    std::fs::write(dir.path().join("Program.cs"), "class Program {}").unwrap();

    release_cmd()
        .current_dir(dir.path())
        .args(["mac-bundle", "--build-dir", "."])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("refusing to clean build directory"));

    assert!(dir.path().join("App.csproj").is_file());
    assert!(dir.path().join("Program.cs").is_file());
}
