//! SemVer 2.0 parsing.
//!
//! Versions are validated with the regular expression suggested by
//! [semver.org](https://semver.org/#is-there-a-suggested-regular-expression-regex-to-check-a-semver-string),
//! restricted to ASCII digits. Components are kept as the exact text that
//! matched so that reassembling them reproduces the input byte for byte.

use crate::error::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// SemVer 2.0 grammar with named groups `major`, `minor`, `patch`,
/// `prerelease` and `buildmetadata`.
pub const SEMVER_PATTERN: &str = r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+(?P<buildmetadata>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$";

#[allow(clippy::expect_used)]
static SEMVER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SEMVER_PATTERN).expect("SEMVER_PATTERN is a valid regex"));

/// A version string split into its SemVer components.
///
/// Every field holds the text exactly as it appeared in the input. Major,
/// minor and patch are not converted to integers, so arbitrarily large
/// numbers survive untouched; use [`ParsedVersion::to_semver`] when
/// precedence comparison is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedVersion {
    normalized: String,
    major: String,
    minor: String,
    patch: String,
    prerelease: Option<String>,
    build_metadata: Option<String>,
}

impl ParsedVersion {
    /// The prefix-stripped input that was validated.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Major version component.
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Minor version component.
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// Patch version component.
    #[must_use]
    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// Pre-release identifiers (e.g. `"beta.2"`), without the leading `-`.
    #[must_use]
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    /// Build metadata identifiers (e.g. `"sha.abc123"`), without the leading `+`.
    #[must_use]
    pub fn build_metadata(&self) -> Option<&str> {
        self.build_metadata.as_deref()
    }

    /// Check if this is a pre-release version.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Convert into a [`semver::Version`] for precedence comparison.
    ///
    /// Build metadata is carried over but, as in SemVer, does not affect
    /// ordering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Semver`] when a numeric component does not fit in a `u64`.
    pub fn to_semver(&self) -> Result<semver::Version> {
        Ok(semver::Version::parse(&self.normalized)?)
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}

impl FromStr for ParsedVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s, "")
    }
}

/// Parse `text` as a SemVer 2.0 version after stripping `prefix`.
///
/// The prefix is removed once if `text` starts with it; otherwise `text` is
/// validated unchanged. An empty prefix never strips anything.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the prefix-stripped text does not match the
/// SemVer grammar in full.
pub fn parse(text: &str, prefix: &str) -> Result<ParsedVersion> {
    let normalized = match text.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() => {
            tracing::debug!(prefix, original = text, "stripped version prefix");
            rest
        }
        _ => text,
    };

    let captures = SEMVER_REGEX
        .captures(normalized)
        .ok_or_else(|| Error::parse(normalized))?;

    let group = |name: &str| captures.name(name).map(|m| m.as_str().to_string());
    let required = |name: &str| group(name).ok_or_else(|| Error::parse(normalized));

    let parsed = ParsedVersion {
        normalized: normalized.to_string(),
        major: required("major")?,
        minor: required("minor")?,
        patch: required("patch")?,
        prerelease: group("prerelease"),
        build_metadata: group("buildmetadata"),
    };

    tracing::debug!(version = %parsed, "parsed semver");
    Ok(parsed)
}
