//! Error types for locating, publishing and packaging.
//!
//! Every bundler operation returns [`Result`]. Errors carry enough context
//! (the command, the path, the tool that was missing) to be printed directly
//! to the user. [`Error::is_fatal`] separates failures that abort the whole
//! run from failures that only drop one platform's artifact.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

/// Result type alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Free-form error message.
    #[error("{0}")]
    GenericError(String),

    /// Unannotated I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// I/O error annotated with the operation and path.
    #[error("{context} ({}): {error}", .path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        #[source]
        error: io::Error,
    },

    /// An external command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        command: String,
        #[source]
        error: io::Error,
    },

    /// An external command ran and exited unsuccessfully.
    #[error("`{command}` exited with status {code:?}{}", stderr_suffix(.stderr))]
    CommandStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// `dotnet publish` failed. Always fatal.
    #[error("publishing for {runtime} failed: {reason}")]
    PublishFailed { runtime: String, reason: String },

    /// No project descriptor under the search root.
    #[error("Could not find .csproj file under {}", .root.display())]
    ProjectNotFound { root: PathBuf },

    /// A required external tool is not installed.
    #[error("{tool} not found. {hint}")]
    ToolNotFound { tool: String, hint: String },

    /// A required input file or directory does not exist.
    #[error("{what} not found: {}", .path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    /// An argument value was rejected.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// OS/architecture pair without a runtime identifier.
    #[error("Unsupported platform: {os} / {arch}")]
    UnsupportedPlatform { os: String, arch: String },

    /// A step the user explicitly asked for could not be completed.
    #[error("{step}: {source}")]
    Required {
        step: String,
        #[source]
        source: Box<Error>,
    },

    /// Error with an added context message.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),

    #[error("directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl Error {
    /// Whether this error must abort the whole run instead of only dropping
    /// the current platform's artifact.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::PublishFailed { .. }
            | Error::ProjectNotFound { .. }
            | Error::ToolNotFound { .. }
            | Error::MissingInput { .. }
            | Error::InvalidArgument { .. }
            | Error::UnsupportedPlatform { .. }
            | Error::Required { .. } => true,
            Error::Context { source, .. } => source.is_fatal(),
            _ => false,
        }
    }

    /// The error underneath any [`Error::Required`] / [`Error::Context`]
    /// wrappers.
    pub fn innermost(&self) -> &Error {
        match self {
            Error::Required { source, .. } | Error::Context { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Marks this error as belonging to a step the user explicitly requested.
    pub fn required(self, step: impl Into<String>) -> Self {
        Error::Required {
            step: step.into(),
            source: Box::new(self),
        }
    }
}

/// Adds context to errors and missing values.
pub trait Context<T> {
    /// Wraps the error (or `None`) with a context message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Like [`Context::context`], but builds the message lazily.
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context {
            context: context.to_string(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context {
            context: f().to_string(),
            source: Box::new(e.into()),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Annotates I/O errors with the failed operation and the path involved.
pub trait ErrorExt<T> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_fatality() {
        let err: Result<()> = Err(Error::ToolNotFound {
            tool: "vpk".into(),
            hint: "install it".into(),
        });
        let err = err.context("packing").unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "packing: vpk not found. install it");
    }

    #[test]
    fn command_status_is_not_fatal() {
        let err = Error::CommandStatus {
            command: "pkgbuild".into(),
            code: Some(1),
            stderr: "  boom \n".into(),
        };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "`pkgbuild` exited with status Some(1): boom");
        let required = err.required("building installer");
        assert!(required.is_fatal());
        assert!(matches!(required.innermost(), Error::CommandStatus { .. }));
    }

    #[test]
    fn option_context_yields_generic_error() {
        let missing: Option<u8> = None;
        let err = missing.context("nothing here").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "nothing here"));
    }
}
