//! semver-output CLI library
//!
//! Argument parsing, tracing setup and the top-level pipeline behind the
//! `semver-output` binary. The parsing and formatting logic itself lives in
//! `semver_output_core`.

pub mod cli;
pub mod tracing;

pub use cli::{Cli, EXIT_FAILURE, EXIT_OK, run};
