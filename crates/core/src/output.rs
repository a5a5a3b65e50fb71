//! CI output formatting.
//!
//! A parsed version is published as six `key=value` lines appended to the
//! file named by `GITHUB_OUTPUT`, which GitHub Actions reads back as step
//! outputs once the step finishes.

use crate::error::{Error, Result};
use crate::version::ParsedVersion;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable naming the GitHub Actions step output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Output keys in the order they are written.
pub const OUTPUT_KEYS: [&str; 6] = [
    "version",
    "major",
    "minor",
    "patch",
    "prerelease",
    "build-metadata",
];

/// Ordered `(key, value)` pairs for `version`.
///
/// Absent prerelease and build metadata become empty strings.
#[must_use]
pub fn outputs(version: &ParsedVersion) -> [(&'static str, &str); 6] {
    let [k_version, k_major, k_minor, k_patch, k_pre, k_build] = OUTPUT_KEYS;
    [
        (k_version, version.normalized()),
        (k_major, version.major()),
        (k_minor, version.minor()),
        (k_patch, version.patch()),
        (k_pre, version.prerelease().unwrap_or_default()),
        (k_build, version.build_metadata().unwrap_or_default()),
    ]
}

/// Render `version` as newline-terminated `key=value` lines.
#[must_use]
pub fn format_outputs(version: &ParsedVersion) -> String {
    outputs(version)
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}

/// Write the rendered outputs to `writer` in a single call.
///
/// # Errors
///
/// Propagates any error returned by the writer.
pub fn write_outputs<W: Write>(writer: &mut W, version: &ParsedVersion) -> std::io::Result<()> {
    writer.write_all(format_outputs(version).as_bytes())?;
    writer.flush()
}

/// Destination file for step outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    path: PathBuf,
}

impl OutputTarget {
    /// Create a target for an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the target from `GITHUB_OUTPUT`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_env_var(GITHUB_OUTPUT_ENV)
    }

    /// Resolve the target from an arbitrary environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the variable is unset or empty.
    pub fn from_env_var(name: &str) -> Result<Self> {
        let value = std::env::var_os(name).filter(|v| !v.is_empty());
        Self::resolve_named(value.map(PathBuf::from), name)
    }

    /// Resolve the target from an already-read `GITHUB_OUTPUT` value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `path` is `None` or empty.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        Self::resolve_named(path, GITHUB_OUTPUT_ENV)
    }

    fn resolve_named(path: Option<PathBuf>, name: &str) -> Result<Self> {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Ok(Self::new(path)),
            _ => Err(Error::configuration_with_help(
                format!("{name} environment variable is not defined"),
                format!("Run inside a GitHub Actions step or set {name} to a writable file"),
            )),
        }
    }

    /// Path of the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the outputs for `version`, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or written.
    pub fn append(&self, version: &ParsedVersion) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::io(e, &self.path, "open"))?;

        write_outputs(&mut file, version).map_err(|e| Error::io(e, &self.path, "write"))?;

        tracing::info!(path = %self.path.display(), version = %version, "appended version outputs");
        Ok(())
    }
}
