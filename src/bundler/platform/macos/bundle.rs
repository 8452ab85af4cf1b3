//! `.app` bundle layout and `Info.plist` generation.
//!
//! Two layouts are supported:
//!
//! - the minimal bundle staged for `pkgbuild`: only the single-file
//!   executable in `Contents/MacOS`
//! - the full bundle: every published file in `Contents/MacOS` with native
//!   libraries made executable

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// `Contents/Info.plist` of an application bundle.
#[derive(Clone, Debug, Serialize)]
pub struct InfoPlist {
    #[serde(rename = "CFBundleExecutable")]
    pub executable: String,
    #[serde(rename = "CFBundleIdentifier")]
    pub identifier: String,
    #[serde(rename = "CFBundleName")]
    pub name: String,
    #[serde(rename = "CFBundleDisplayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "CFBundleVersion")]
    pub version: String,
    #[serde(rename = "CFBundleShortVersionString")]
    pub short_version: String,
    #[serde(rename = "CFBundlePackageType")]
    pub package_type: String,
    #[serde(rename = "LSMinimumSystemVersion")]
    pub minimum_system_version: String,
    #[serde(rename = "NSHighResolutionCapable")]
    pub high_resolution_capable: bool,
    #[serde(
        rename = "NSSupportsAutomaticGraphicsSwitching",
        skip_serializing_if = "Option::is_none"
    )]
    pub automatic_graphics_switching: Option<bool>,
    #[serde(
        rename = "LSApplicationCategoryType",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        rename = "NSHumanReadableCopyright",
        skip_serializing_if = "Option::is_none"
    )]
    pub copyright: Option<String>,
    #[serde(
        rename = "LSRequiresNativeExecution",
        skip_serializing_if = "Option::is_none"
    )]
    pub requires_native_execution: Option<bool>,
}

impl InfoPlist {
    /// Keys written for the installer package bundle.
    pub fn minimal(settings: &Settings, executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
            identifier: settings.package().bundle_identifier.clone(),
            name: settings.product_name().to_string(),
            display_name: None,
            version: settings.version_string().to_string(),
            short_version: settings.version_string().to_string(),
            package_type: "APPL".to_string(),
            minimum_system_version: settings.macos().minimum_system_version.clone(),
            high_resolution_capable: true,
            automatic_graphics_switching: None,
            category: None,
            copyright: None,
            requires_native_execution: None,
        }
    }

    /// Keys written for the full application bundle.
    pub fn full(settings: &Settings, executable: &str) -> Self {
        Self {
            name: executable.to_string(),
            display_name: Some(executable.to_string()),
            automatic_graphics_switching: Some(true),
            category: Some(settings.macos().category.clone()),
            copyright: Some(settings.macos().copyright.clone()),
            requires_native_execution: Some(true),
            ..Self::minimal(settings, executable)
        }
    }

    /// Writes the plist as XML to `path`.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let mut buffer = Vec::new();
        plist::to_writer_xml(&mut buffer, self)?;
        tokio::fs::write(path, buffer)
            .await
            .fs_context("writing Info.plist", path)
    }
}

/// Creates `{dest_dir}/{product}.app/Contents/{MacOS,Resources}` and returns
/// the `.app` path.
async fn create_bundle_dirs(dest_dir: &Path, app_name: &str) -> Result<PathBuf> {
    let app_dir = dest_dir.join(format!("{app_name}.app"));
    let contents = app_dir.join("Contents");
    fs::create_dir_all(&contents.join("MacOS"), true).await?;
    fs::create_dir_all(&contents.join("Resources"), true).await?;
    Ok(app_dir)
}

/// Stages the minimal bundle for a single-file publish.
///
/// The published executable `{publish_dir}/{product}` is copied to
/// `Contents/MacOS/{product}` with mode 0755.
pub async fn stage_app_bundle(
    settings: &Settings,
    publish_dir: &Path,
    dest_dir: &Path,
) -> Result<PathBuf> {
    let product = settings.product_name();
    let executable = publish_dir.join(product);
    if !executable.is_file() {
        return Err(Error::GenericError(format!(
            "Executable not found in publish output: {}",
            executable.display()
        )));
    }

    let app_dir = create_bundle_dirs(dest_dir, product).await?;
    let contents = app_dir.join("Contents");

    let bundled = contents.join("MacOS").join(product);
    fs::copy_file(&executable, &bundled).await?;
    fs::set_executable(&bundled).await?;

    InfoPlist::minimal(settings, product)
        .write_to(&contents.join("Info.plist"))
        .await?;

    log::debug!("Staged app bundle at {}", app_dir.display());
    Ok(app_dir)
}

/// Finds the app executable in an unpacked publish directory.
///
/// Prefers `{build_dir}/{product}`, then the first executable regular file.
pub fn find_executable(settings: &Settings, build_dir: &Path) -> Result<PathBuf> {
    let preferred = build_dir.join(settings.product_name());
    if preferred.is_file() {
        return Ok(preferred);
    }
    log::warn!("Executable not found: {}", preferred.display());

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(build_dir)
        .fs_context("reading build directory", build_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && fs::is_executable(path))
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| Error::MissingInput {
        what: "Executable",
        path: preferred,
    })
}

/// Result of [`assemble_full_bundle`].
#[derive(Clone, Debug)]
pub struct FullBundle {
    pub app_dir: PathBuf,
    pub executable: PathBuf,
    pub native_libraries: usize,
}

/// Assembles `{build_dir}/{exe}.app` from an unpacked publish directory.
///
/// Everything in `build_dir` except existing `.app` bundles is copied into
/// `Contents/MacOS`. The executable and every `.dylib` / `.so` below it are
/// made executable.
pub async fn assemble_full_bundle(settings: &Settings, build_dir: &Path) -> Result<FullBundle> {
    let executable = find_executable(settings, build_dir)?;
    let exe_name = executable
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::GenericError("Invalid executable path".into()))?;

    let app_dir = create_bundle_dirs(build_dir, &exe_name).await?;
    let contents = app_dir.join("Contents");
    let macos_dir = contents.join("MacOS");

    let mut items: Vec<PathBuf> = std::fs::read_dir(build_dir)
        .fs_context("reading build directory", build_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_none_or(|ext| ext != "app"))
        .collect();
    items.sort();

    log::info!("Copying {} items to bundle...", items.len());
    for item in &items {
        let Some(name) = item.file_name() else {
            continue;
        };
        let dest = macos_dir.join(name);
        if item.is_dir() {
            fs::copy_dir(item, &dest).await?;
        } else {
            fs::copy_file(item, &dest).await?;
        }
    }

    InfoPlist::full(settings, &exe_name)
        .write_to(&contents.join("Info.plist"))
        .await?;

    let bundled = macos_dir.join(&exe_name);
    fs::set_executable(&bundled).await?;

    let mut native_libraries = 0;
    for entry in walkdir::WalkDir::new(&macos_dir) {
        let entry = entry?;
        let is_native = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == "dylib" || ext == "so");
        if entry.file_type().is_file() && is_native {
            fs::set_executable(entry.path()).await?;
            native_libraries += 1;
        }
    }
    log::info!("Set permissions for {} native libraries", native_libraries);

    Ok(FullBundle {
        app_dir,
        executable: bundled,
        native_libraries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn settings(out: &Path) -> Settings {
        SettingsBuilder::new()
            .version("1.2.3")
            .output_directory(out)
            .build()
            .unwrap()
    }

    fn plist_value(app: &Path, key: &str) -> Option<plist::Value> {
        let value = plist::Value::from_file(app.join("Contents/Info.plist")).unwrap();
        value.as_dictionary().unwrap().get(key).cloned()
    }

    #[tokio::test]
    async fn minimal_bundle_has_executable_and_plist() {
        let dir = tempfile::tempdir().unwrap();
        let publish = dir.path().join("publish");
        std::fs::create_dir_all(&publish).unwrap();
        std::fs::write(publish.join("Symphex"), b"macho").unwrap();

        let settings = settings(dir.path());
        let app = stage_app_bundle(&settings, &publish, &dir.path().join("stage"))
            .await
            .unwrap();

        assert!(app.ends_with("Symphex.app"));
        assert!(app.join("Contents/Resources").is_dir());
        assert!(fs::is_executable(&app.join("Contents/MacOS/Symphex")));
        assert_eq!(
            plist_value(&app, "CFBundleVersion").and_then(|v| v.as_string().map(String::from)),
            Some("1.2.3".to_string())
        );
        assert_eq!(
            plist_value(&app, "NSHighResolutionCapable").and_then(|v| v.as_boolean()),
            Some(true)
        );
        assert!(plist_value(&app, "CFBundleDisplayName").is_none());
    }

    #[tokio::test]
    async fn minimal_bundle_requires_executable() {
        let dir = tempfile::tempdir().unwrap();
        let publish = dir.path().join("publish");
        std::fs::create_dir_all(&publish).unwrap();

        let err = stage_app_bundle(&settings(dir.path()), &publish, dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Executable not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn full_bundle_copies_everything_and_marks_natives() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir_all(build.join("runtimes")).unwrap();
        std::fs::write(build.join("Symphex"), b"macho").unwrap();
        std::fs::write(build.join("libSkiaSharp.dylib"), b"dylib").unwrap();
        std::fs::write(build.join("runtimes/libnative.so"), b"so").unwrap();
        std::fs::write(build.join("Symphex.dll"), b"il").unwrap();

        let bundle = assemble_full_bundle(&settings(dir.path()), &build)
            .await
            .unwrap();

        let macos = bundle.app_dir.join("Contents/MacOS");
        assert!(macos.join("Symphex.dll").is_file());
        assert!(fs::is_executable(&macos.join("Symphex")));
        assert!(fs::is_executable(&macos.join("runtimes/libnative.so")));
        assert_eq!(bundle.native_libraries, 2);
        assert_eq!(
            plist_value(&bundle.app_dir, "LSRequiresNativeExecution")
                .and_then(|v| v.as_boolean()),
            Some(true)
        );
    }
}
