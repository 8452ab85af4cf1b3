//! Release orchestration: publish and package each target runtime in turn.

use super::checksum::calculate_sha256;
use crate::bundler::{
    Result, Settings,
    error::{Context, Error, ErrorExt},
    platform::{self, PackageOutcome, PackageType, velopack::VelopackCli},
    publish::{self, PublishFlavor, PublishRequest},
    settings::{RuntimeIdentifier, TargetOs},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which distributables a run produces.
#[derive(Clone, Debug)]
pub enum ReleaseKind {
    /// Single-file publish, then the platform's native package.
    Native,
    /// Unpacked publish, then `vpk pack`.
    Velopack(VelopackCli),
}

impl ReleaseKind {
    fn flavor(&self) -> PublishFlavor {
        match self {
            Self::Native => PublishFlavor::SingleFile,
            Self::Velopack(_) => PublishFlavor::Unpacked,
        }
    }
}

/// A file produced by a run, with the metadata shown in the summary.
#[derive(Clone, Debug, Serialize)]
pub struct BundledArtifact {
    pub package_type: PackageType,
    pub runtime: RuntimeIdentifier,
    pub path: PathBuf,
    pub size: u64,
    pub checksum: String,
}

impl BundledArtifact {
    /// Size in megabytes, as shown in the summary.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// A target whose packaging failed without aborting the run.
#[derive(Clone, Debug, Serialize)]
pub struct PlatformFailure {
    pub runtime: RuntimeIdentifier,
    pub error: String,
}

/// Outcome of a whole run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReleaseReport {
    pub version: String,
    pub output_directory: PathBuf,
    pub artifacts: Vec<BundledArtifact>,
    pub warnings: Vec<String>,
    pub failures: Vec<PlatformFailure>,
}

/// Drives publish and packaging for a set of target runtimes.
///
/// Runtimes are processed one after another. A failed publish ends the run;
/// a failed package only drops that runtime's artifacts unless the error is
/// fatal.
#[derive(Debug)]
pub struct ReleaseBuilder {
    settings: Settings,
    project: PathBuf,
}

impl ReleaseBuilder {
    pub fn new(settings: Settings, project: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            project: project.into(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runtimes to build: every release runtime, or the host's.
    ///
    /// Order is Windows, macOS (x64 then arm64), Linux.
    pub fn targets(&self, all_platforms: bool) -> Result<Vec<RuntimeIdentifier>> {
        if all_platforms {
            return Ok([TargetOs::Windows, TargetOs::MacOs, TargetOs::Linux]
                .into_iter()
                .flat_map(|os| os.release_runtimes().iter().copied())
                .collect());
        }

        let os = self.settings.host_os().ok_or_else(|| Error::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        })?;
        Ok(os.release_runtimes().to_vec())
    }

    /// Output directory of `dotnet publish` for `runtime`.
    pub fn publish_dir(&self, runtime: RuntimeIdentifier) -> PathBuf {
        self.settings.publish_base().join(runtime.as_str())
    }

    /// Publishes and packages every runtime in `targets`.
    ///
    /// `on_target` is called before each runtime starts.
    pub async fn run(
        &self,
        kind: &ReleaseKind,
        targets: &[RuntimeIdentifier],
        mut on_target: impl FnMut(RuntimeIdentifier),
    ) -> Result<ReleaseReport> {
        tokio::fs::create_dir_all(self.settings.output_directory())
            .await
            .fs_context("creating output directory", self.settings.output_directory())?;

        let mut report = ReleaseReport {
            version: self.settings.version_string().to_string(),
            output_directory: self.settings.output_directory().to_path_buf(),
            ..Default::default()
        };

        for &runtime in targets {
            on_target(runtime);

            let publish_dir = self.publish_dir(runtime);
            publish::publish_with(
                self.settings.dotnet_program(),
                &PublishRequest {
                    project: &self.project,
                    runtime,
                    flavor: kind.flavor(),
                    version: Some(self.settings.version_string()),
                    output_dir: &publish_dir,
                },
            )
            .await?;

            match self.package(kind, runtime, &publish_dir).await {
                Ok(outcome) => self.record(runtime, outcome, &mut report).await?,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log::error!("Packaging for {} failed: {}", runtime, e);
                    report.failures.push(PlatformFailure {
                        runtime,
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Packages an already published output for `runtime`.
    pub async fn package(
        &self,
        kind: &ReleaseKind,
        runtime: RuntimeIdentifier,
        publish_dir: &Path,
    ) -> Result<PackageOutcome> {
        match kind {
            ReleaseKind::Velopack(vpk) => {
                platform::velopack::bundle_project(&self.settings, vpk, runtime, publish_dir).await
            }
            ReleaseKind::Native => match runtime.os() {
                TargetOs::Windows => {
                    platform::windows::bundle_project(&self.settings, publish_dir).await
                }
                TargetOs::MacOs => {
                    platform::macos::bundle_project(&self.settings, runtime, publish_dir).await
                }
                TargetOs::Linux => {
                    platform::linux::bundle_project(&self.settings, publish_dir).await
                }
            },
        }
    }

    /// Adds a packager's outputs to the report.
    ///
    /// Outputs that do not exist on disk are reported as warnings instead of
    /// artifacts.
    pub async fn record(
        &self,
        runtime: RuntimeIdentifier,
        outcome: PackageOutcome,
        report: &mut ReleaseReport,
    ) -> Result<()> {
        report.warnings.extend(outcome.warnings);

        for output in outcome.outputs {
            if !output.path.is_file() {
                let message = format!("Expected output missing: {}", output.path.display());
                log::warn!("{}", message);
                report.warnings.push(message);
                continue;
            }

            let size = tokio::fs::metadata(&output.path)
                .await
                .fs_context("reading artifact metadata", &output.path)?
                .len();
            let checksum = calculate_sha256(&output.path)
                .await
                .with_context(|| format!("hashing {}", output.path.display()))?;

            report.artifacts.push(BundledArtifact {
                package_type: output.package_type,
                runtime,
                path: output.path,
                size,
                checksum,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn builder(host: Option<TargetOs>) -> ReleaseBuilder {
        let settings = SettingsBuilder::new()
            .version("1.0.0")
            .output_directory("release")
            .host_os(host)
            .build()
            .unwrap();
        ReleaseBuilder::new(settings, "Symphex/Symphex.csproj")
    }

    #[test]
    fn all_platforms_in_release_order() {
        assert_eq!(
            builder(Some(TargetOs::Linux)).targets(true).unwrap(),
            [
                RuntimeIdentifier::WinX64,
                RuntimeIdentifier::OsxX64,
                RuntimeIdentifier::OsxArm64,
                RuntimeIdentifier::LinuxX64
            ]
        );
    }

    #[test]
    fn host_targets_follow_host_os() {
        assert_eq!(
            builder(Some(TargetOs::MacOs)).targets(false).unwrap(),
            [RuntimeIdentifier::OsxX64, RuntimeIdentifier::OsxArm64]
        );
        assert_eq!(
            builder(Some(TargetOs::Windows)).targets(false).unwrap(),
            [RuntimeIdentifier::WinX64]
        );
    }

    #[tokio::test]
    async fn record_skips_missing_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("Symphex-1.0.0-win-x64.zip");
        std::fs::write(&present, b"zip").unwrap();

        let mut outcome = PackageOutcome::default();
        outcome.push(PackageType::Zip, present.clone());
        outcome.push(PackageType::Velopack, dir.path().join("Symphex-win-x64-Setup.exe"));

        let mut report = ReleaseReport::default();
        builder(Some(TargetOs::Windows))
            .record(RuntimeIdentifier::WinX64, outcome, &mut report)
            .await
            .unwrap();

        assert_eq!(report.artifacts.len(), 1);
        assert_eq!(report.artifacts[0].path, present);
        assert_eq!(report.artifacts[0].size, 3);
        assert_eq!(report.warnings.len(), 1);
    }
}
