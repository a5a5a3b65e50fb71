//! semver-output CLI Application
//!
//! Splits a SemVer tag into its components and appends them to the GitHub
//! Actions step output file named by `GITHUB_OUTPUT`.

// CLI binary needs to output to stderr before tracing is available
#![allow(clippy::print_stderr)]

use semver_output::cli::{self, EXIT_FAILURE, EXIT_OK};
use semver_output::tracing::init_tracing;

fn main() {
    let cli = match cli::parse() {
        Ok(cli) => cli,
        Err(err) => {
            cli::render_error(err);
            std::process::exit(EXIT_FAILURE);
        }
    };

    // NOTE: Using eprintln! here is intentional - the subscriber failed to
    // install, so tracing output would be dropped.
    if let Err(e) = init_tracing(&cli.tracing_config()) {
        eprintln!("Warning: {e}");
    }

    let exit_code = match cli::run(&cli) {
        Ok(version) => {
            tracing::debug!(%version, "semver outputs written");
            EXIT_OK
        }
        Err(err) => {
            cli::render_error(err);
            EXIT_FAILURE
        }
    };

    std::process::exit(exit_code);
}
