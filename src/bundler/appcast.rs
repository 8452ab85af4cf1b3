//! NetSparkle appcast generation.
//!
//! The appcast (`appcast.xml` plus its `.signature`) is produced by the
//! external `netsparkle-generate-appcast` tool over a directory of
//! installers. Success is judged by the tool's exit status only; the
//! document itself is never read back.

use super::{
    error::{Error, Result},
    tools,
    utils::process,
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::process::Command;
use url::Url;

/// Tool name on `PATH`.
pub const APPCAST_TOOL: &str = "netsparkle-generate-appcast";

/// Install hint shown when the generator cannot be found.
pub const APPCAST_INSTALL_HINT: &str =
    "Install it with: dotnet tool install --global NetSparkleUpdater.Tools.AppCastGenerator";

/// Input of [`generate_appcast`].
#[derive(Clone, Debug)]
pub struct AppcastRequest<'a> {
    pub installers_dir: &'a Path,
    pub version: &'a str,
    pub base_url: &'a str,
    pub product: &'a str,
}

/// Files written by the generator.
#[derive(Clone, Debug)]
pub struct Appcast {
    pub appcast: PathBuf,
    pub signature: PathBuf,
    /// Where `appcast.xml` must be reachable once uploaded.
    pub public_url: String,
}

/// Parses the download base URL. Relative URLs are rejected.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|e| Error::InvalidArgument {
        reason: format!("--url {base_url:?} is not an absolute URL: {e}"),
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidArgument {
            reason: format!("--url {base_url:?} cannot be used as a download base"),
        });
    }
    Ok(url)
}

/// Public location of `appcast.xml` under the base URL.
pub fn appcast_url(base_url: &str) -> String {
    format!("{}/appcast.xml", base_url.trim_end_matches('/'))
}

/// Generator arguments after the program name.
pub fn appcast_args(request: &AppcastRequest<'_>) -> Vec<OsString> {
    vec![
        "-b".into(),
        request.installers_dir.as_os_str().to_owned(),
        "-o".into(),
        request.installers_dir.as_os_str().to_owned(),
        "-u".into(),
        request.base_url.into(),
        "-n".into(),
        request.product.into(),
        "--file-extract-version".into(),
    ]
}

/// Finds the generator on `PATH` or in the .NET global tools directory.
pub fn find_appcast_tool() -> Result<PathBuf> {
    tools::find_tool(APPCAST_TOOL, &format!("{APPCAST_TOOL}.exe")).ok_or_else(|| {
        Error::ToolNotFound {
            tool: APPCAST_TOOL.into(),
            hint: APPCAST_INSTALL_HINT.into(),
        }
    })
}

/// Runs the generator over `request.installers_dir`.
///
/// The installers directory must exist and the base URL must be absolute;
/// both are checked before the tool is looked up.
pub async fn generate_appcast(request: &AppcastRequest<'_>) -> Result<Appcast> {
    if !request.installers_dir.is_dir() {
        return Err(Error::MissingInput {
            what: "Directory",
            path: request.installers_dir.to_path_buf(),
        });
    }
    parse_base_url(request.base_url)?;

    let tool = find_appcast_tool()?;
    log::info!(
        "Generating appcast for {} {} from {}",
        request.product,
        request.version,
        request.installers_dir.display()
    );

    let mut command = Command::new(&tool);
    command.args(appcast_args(request));
    process::run_checked(&mut command).await?;

    Ok(Appcast {
        appcast: request.installers_dir.join("appcast.xml"),
        signature: request.installers_dir.join("appcast.xml.signature"),
        public_url: appcast_url(request.base_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_absolute() {
        assert!(parse_base_url("https://github.com/CyberNilsen/Symphex/releases/download/v1.3.0").is_ok());

        let err = parse_base_url("releases/v1.3.0").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("Invalid argument"));

        assert!(parse_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn appcast_url_joins_without_double_slash() {
        assert_eq!(
            appcast_url("https://example.com/dl/"),
            "https://example.com/dl/appcast.xml"
        );
        assert_eq!(
            appcast_url("https://example.com/dl"),
            "https://example.com/dl/appcast.xml"
        );
    }

    #[test]
    fn args_read_and_write_the_installers_dir() {
        let request = AppcastRequest {
            installers_dir: Path::new("release"),
            version: "1.3.0",
            base_url: "https://example.com/v1.3.0",
            product: "Symphex",
        };
        let args: Vec<String> = appcast_args(&request)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-b",
                "release",
                "-o",
                "release",
                "-u",
                "https://example.com/v1.3.0",
                "-n",
                "Symphex",
                "--file-extract-version"
            ]
        );
    }

    #[tokio::test]
    async fn missing_installers_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("release");
        let err = generate_appcast(&AppcastRequest {
            installers_dir: &missing,
            version: "1.0.0",
            base_url: "https://example.com",
            product: "Symphex",
        })
        .await
        .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("Directory not found"));
    }
}
