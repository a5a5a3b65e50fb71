//! SemVer parsing and CI output formatting.
//!
//! This crate holds the pure logic behind the `semver-output` CLI:
//!
//! - [`version`] - Validate a (possibly prefixed) tag against the SemVer 2.0 grammar
//! - [`output`] - Render the parsed components as `key=value` step outputs and
//!   append them to the file named by `GITHUB_OUTPUT`
//! - [`error`] - Error kinds shared by both
//!
//! # Example
//!
//! ```rust
//! use semver_output_core::{format_outputs, parse};
//!
//! let version = parse("v2.1.0-beta.2", "v")?;
//! assert_eq!(version.prerelease(), Some("beta.2"));
//! assert!(format_outputs(&version).starts_with("version=2.1.0-beta.2\n"));
//! # Ok::<(), semver_output_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod output;
pub mod version;

pub use error::{Error, Result};
pub use output::{
    GITHUB_OUTPUT_ENV, OUTPUT_KEYS, OutputTarget, format_outputs, outputs, write_outputs,
};
pub use version::{ParsedVersion, SEMVER_PATTERN, parse};
