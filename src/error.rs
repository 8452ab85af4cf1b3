//! Top-level error types for the release packager.
//!
//! Library operations fail with [`crate::bundler::Error`]; the CLI layer wraps
//! them together with argument and configuration errors in [`ReleaseError`].

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for a release run
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Release.toml parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Locate, publish, package and appcast errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as B;

        match self {
            ReleaseError::Bundler(err) => match err.innermost() {
                B::ToolNotFound { hint, .. } => vec![hint.clone()],
                B::ProjectNotFound { .. } => {
                    vec!["Run from the project directory or pass --project-dir".to_string()]
                }
                B::PublishFailed { .. } => {
                    vec!["Check that the .NET SDK is installed and `dotnet` is on PATH".to_string()]
                }
                B::UnsupportedPlatform { .. } => vec![
                    "Supported hosts: Windows x64, Linux x64, macOS x64 and arm64".to_string(),
                ],
                _ => vec!["Check the error message above for specific details".to_string()],
            },
            ReleaseError::Toml(_) => vec!["Fix the syntax of Release.toml".to_string()],
            ReleaseError::Cli(_) => vec!["Run with --help for usage".to_string()],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::Error as B;

    #[test]
    fn wrapped_tool_errors_keep_install_hint() {
        let err = ReleaseError::from(
            B::ToolNotFound {
                tool: "Inno Setup".into(),
                hint: "Download from: https://jrsoftware.org/isdl.php".into(),
            }
            .required("Cannot create installer"),
        );
        assert_eq!(
            err.recovery_suggestions(),
            ["Download from: https://jrsoftware.org/isdl.php"]
        );
        assert_eq!(err.exit_code(), 1);
    }
}
