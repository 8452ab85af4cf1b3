//! Multi-runtime runs with stand-in `dotnet` and `vpk` programs.

#![cfg(unix)]

mod common;

use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};
use symphex_release::bundler::{
    Error, PackageType, ReleaseBuilder, ReleaseKind, RuntimeIdentifier, SettingsBuilder, TargetOs,
    WindowsPackageType, WindowsSettings, platform::velopack::VelopackCli,
};

/// Writes an executable shell script.
fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// `dotnet` that creates the `-o` directory (its last argument) with an executable.
fn fake_dotnet(dir: &Path) -> PathBuf {
    script(
        dir,
        "dotnet-stub",
        r#"for a in "$@"; do out="$a"; done
mkdir -p "$out"
printf 'bin' > "$out/Symphex""#,
    )
}

/// `vpk` that fails for win-x64 and writes the channel setup file otherwise.
fn fake_vpk(dir: &Path) -> VelopackCli {
    let program = script(
        dir,
        "vpk-stub",
        r#"case "$*" in *win-x64*) echo "pack failed" >&2; exit 2;; esac
prev=""
for a in "$@"; do
  if [ "$prev" = "-o" ]; then out="$a"; fi
  prev="$a"
done
printf 'setup' > "$out/Symphex-linux-Setup.exe""#,
    );
    VelopackCli {
        program,
        version_line: None,
    }
}

fn builder(root: &Path, dotnet: &Path, package_type: WindowsPackageType) -> ReleaseBuilder {
    let settings = SettingsBuilder::new()
        .version("1.3.0")
        .output_directory(root.join("release"))
        .working_directory(root)
        .windows_package_type(package_type)
        .windows_settings(WindowsSettings {
            iscc_locations: Some(vec![root.join("no-inno/ISCC.exe")]),
            ..Default::default()
        })
        .host_os(Some(TargetOs::Linux))
        .dotnet_program(dotnet)
        .build()
        .unwrap();
    ReleaseBuilder::new(settings, common::fixture_project().join("Symphex/Symphex.csproj"))
}

#[tokio::test]
async fn failed_packaging_does_not_stop_later_runtimes() {
    let dir = tempfile::tempdir().unwrap();
    let dotnet = fake_dotnet(dir.path());
    let vpk = fake_vpk(dir.path());

    let mut visited = Vec::new();
    let report = builder(dir.path(), &dotnet, WindowsPackageType::Both)
        .run(
            &ReleaseKind::Velopack(vpk),
            &[RuntimeIdentifier::WinX64, RuntimeIdentifier::LinuxX64],
            |runtime| visited.push(runtime),
        )
        .await
        .unwrap();

    assert_eq!(visited, [RuntimeIdentifier::WinX64, RuntimeIdentifier::LinuxX64]);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].runtime, RuntimeIdentifier::WinX64);
    assert!(report.failures[0].error.contains("vpk pack"));

    assert_eq!(report.artifacts.len(), 1);
    let artifact = &report.artifacts[0];
    assert_eq!(artifact.runtime, RuntimeIdentifier::LinuxX64);
    assert_eq!(artifact.package_type, PackageType::Velopack);
    assert_eq!(artifact.path, dir.path().join("release/Symphex-linux-Setup.exe"));
    assert_eq!(artifact.size, 5);
    assert!(
        !report
            .artifacts
            .iter()
            .any(|a| a.runtime == RuntimeIdentifier::WinX64)
    );
}

#[tokio::test]
async fn required_installer_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let dotnet = fake_dotnet(dir.path());

    let err = builder(dir.path(), &dotnet, WindowsPackageType::Installer)
        .run(
            &ReleaseKind::Native,
            &[RuntimeIdentifier::WinX64, RuntimeIdentifier::LinuxX64],
            |_| {},
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Required { .. }));
    assert!(matches!(err.innermost(), Error::ToolNotFound { .. }));
    assert!(dir.path().join("publish/win-x64/Symphex").is_file());
    assert!(!dir.path().join("publish/linux-x64").exists());
}

#[tokio::test]
async fn publish_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let dotnet = script(dir.path(), "dotnet-broken", "echo 'error CS1002' ; exit 1");

    let err = builder(dir.path(), &dotnet, WindowsPackageType::Zip)
        .run(
            &ReleaseKind::Native,
            &[RuntimeIdentifier::WinX64, RuntimeIdentifier::LinuxX64],
            |_| {},
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PublishFailed { ref runtime, .. } if runtime == "win-x64"));
    assert!(err.to_string().contains("error CS1002"));
    assert!(common::file_names(&dir.path().join("release")).is_empty());
}
