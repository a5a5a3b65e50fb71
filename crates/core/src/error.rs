//! Error types for version parsing and output operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for semver-output operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a version or writing its outputs.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The input did not match the SemVer 2.0 grammar after prefix stripping.
    #[error("target is not semver string: '{input}'")]
    #[diagnostic(
        code(semver_output::parse),
        help("Version must follow semantic versioning (e.g., 1.0.0, 2.1.0-beta.1+build.5)")
    )]
    Parse {
        /// The normalized (prefix-stripped) input
        input: String,
    },

    /// A required configuration value is missing.
    #[error("{message}")]
    #[diagnostic(code(semver_output::configuration))]
    Configuration {
        /// The error message
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },

    /// Failed to open or write the output file.
    #[error("I/O {operation} failed on {}: {source}", .path.display())]
    #[diagnostic(
        code(semver_output::io),
        help("Check file permissions and ensure the parent directory exists")
    )]
    Io {
        /// The underlying source error
        #[source]
        source: std::io::Error,
        /// The path that caused the error
        path: PathBuf,
        /// The operation that failed
        operation: &'static str,
    },

    /// Conversion into a comparable `semver::Version` failed.
    #[error("version is out of range: {0}")]
    #[diagnostic(code(semver_output::semver))]
    Semver(#[from] semver::Error),
}

impl Error {
    /// Create a new parse error for the given normalized input.
    #[must_use]
    pub fn parse(input: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: None,
        }
    }

    /// Create a new configuration error with help text.
    #[must_use]
    pub fn configuration_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a new I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>, operation: &'static str) -> Self {
        Self::Io {
            source,
            path: path.into(),
            operation,
        }
    }
}
