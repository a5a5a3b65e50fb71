//! Command-line parsing, the top-level pipeline and error rendering.
//!
//! Every failure, including a rejected command line, is reported as a single
//! `::error::` workflow command on stdout with exit code 1.

use crate::tracing::{LogLevel, TracingConfig, TracingFormat};
use clap::Parser;
use clap::error::ErrorKind;
use miette::Report;
use semver_output_core::{Error, GITHUB_OUTPUT_ENV, OutputTarget, ParsedVersion, Result};
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

/// Exit codes for the CLI application
pub const EXIT_OK: i32 = 0;
/// Exit code for every reported error
pub const EXIT_FAILURE: i32 = 1;

/// Prefix of the GitHub workflow command printed on failure
pub const ERROR_ANNOTATION: &str = "::error::raised error: ";

/// Parse a SemVer tag and append its components to the GitHub Actions step output file.
#[derive(Parser, Debug)]
#[command(name = "semver-output", version)]
pub struct Cli {
    /// Version string to parse, e.g. `v1.2.3` or `2.0.0-rc.1+build.5`
    #[arg(value_name = "VERSION", allow_hyphen_values = true)]
    pub target: Option<String>,

    /// Literal prefix stripped from VERSION before validation, e.g. `v`
    #[arg(value_name = "PREFIX", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Extra positional arguments, accepted and ignored
    #[arg(
        value_name = "IGNORED",
        hide = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub ignored: Vec<String>,

    /// File the step outputs are appended to
    #[arg(long, value_name = "PATH", env = GITHUB_OUTPUT_ENV, hide_env_values = true)]
    pub output: Option<OsString>,

    /// Log level for diagnostics written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Format for diagnostics written to stderr
    #[arg(long, value_enum, default_value_t = TracingFormat::Compact)]
    pub log_format: TracingFormat,
}

impl Cli {
    /// Tracing settings selected on the command line
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig {
            format: self.log_format,
            level: self.log_level.into(),
        }
    }
}

/// Parse command-line arguments
///
/// `--help` and `--version` print and exit as usual.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when clap rejects the command line.
pub fn parse() -> Result<Cli> {
    Cli::try_parse().map_err(usage_error)
}

/// Parse an explicit argument list, see [`parse`].
///
/// # Errors
///
/// Returns [`Error::Configuration`] when clap rejects the arguments.
pub fn parse_from<I, T>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(usage_error)
}

fn usage_error(err: clap::Error) -> Error {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
        _ => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            Error::configuration(first_line.strip_prefix("error: ").unwrap_or(first_line))
        }
    }
}

/// Resolve the output file, parse the version and append its outputs.
///
/// The output file is resolved first so that a missing `GITHUB_OUTPUT` is
/// reported even when the version is also invalid. Nothing is written unless
/// every step before the append succeeds.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when no output file is configured,
/// [`Error::Parse`] when the version is not SemVer, and [`Error::Io`] when the
/// file cannot be written.
pub fn run(cli: &Cli) -> Result<ParsedVersion> {
    let target = OutputTarget::resolve(cli.output.clone().map(PathBuf::from))?;

    let text = cli.target.as_deref().unwrap_or_default();
    let prefix = cli.prefix.as_deref().unwrap_or_default();
    let version = semver_output_core::parse(text, prefix)?;

    target.append(&version)?;
    Ok(version)
}

/// Format the single-line workflow annotation for `err`
#[must_use]
pub fn annotation(err: &Error) -> String {
    format!("{ERROR_ANNOTATION}{}", escape_data(&err.to_string()))
}

/// Escape workflow command data so it cannot span lines.
#[must_use]
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Print the workflow annotation on stdout and log the full diagnostic
#[allow(clippy::print_stdout)]
pub fn render_error(err: Error) {
    println!("{}", annotation(&err));
    // Ensure output is flushed before process exit
    let _ = io::stdout().flush();

    tracing::debug!("{:?}", Report::new(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    fn cli_from(args: &[&str]) -> Cli {
        parse_from(std::iter::once("semver-output").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_are_optional() {
        let cli = cli_from(&["--output", "out.txt"]);
        assert_eq!(cli.target, None);
        assert_eq!(cli.prefix, None);
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, TracingFormat::Compact);
    }

    #[test]
    fn test_positionals() {
        let cli = cli_from(&["v1.2.3", "v", "--output", "out.txt", "--log-level", "debug"]);
        assert_eq!(cli.target.as_deref(), Some("v1.2.3"));
        assert_eq!(cli.prefix.as_deref(), Some("v"));
        assert_eq!(cli.output, Some(OsString::from("out.txt")));
        assert_eq!(cli.tracing_config().level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_run_appends_outputs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        let cli = cli_from(&["v1.4.0", "v", "--output", path.to_str().unwrap()]);

        let version = run(&cli).unwrap();
        assert_eq!(version.normalized(), "1.4.0");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "version=1.4.0\nmajor=1\nminor=4\npatch=0\nprerelease=\nbuild-metadata=\n"
        );
    }

    #[test]
    fn test_run_missing_output_is_configuration_error() {
        let cli = Cli {
            target: Some("1.2.3".to_string()),
            prefix: None,
            ignored: Vec::new(),
            output: None,
            log_level: LogLevel::Warn,
            log_format: TracingFormat::Compact,
        };
        assert!(matches!(run(&cli), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_run_invalid_version_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        let cli = cli_from(&["1.2", "--output", path.to_str().unwrap()]);

        assert!(matches!(run(&cli), Err(Error::Parse { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_run_without_version_fails_parse() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("github_output");
        let cli = cli_from(&["--output", path.to_str().unwrap()]);

        let err = run(&cli).unwrap_err();
        assert_eq!(err.to_string(), "target is not semver string: ''");
    }

    #[test]
    fn test_annotation_format() {
        let err = Error::parse("v1.2.3");
        assert_eq!(
            annotation(&err),
            "::error::raised error: target is not semver string: 'v1.2.3'"
        );
    }

    #[test]
    fn test_hyphenated_positionals() {
        let cli = cli_from(&["-v1.2.3", "-v", "--output", "out.txt"]);
        assert_eq!(cli.target.as_deref(), Some("-v1.2.3"));
        assert_eq!(cli.prefix.as_deref(), Some("-v"));

        let cli = cli_from(&["-1.2.3", "--output", "out.txt"]);
        assert_eq!(cli.target.as_deref(), Some("-1.2.3"));
    }

    #[test]
    fn test_extra_positionals_are_ignored() {
        let cli = cli_from(&["--output", "out.txt", "1.2.3", "v", "extra", "-x"]);
        assert_eq!(cli.target.as_deref(), Some("1.2.3"));
        assert_eq!(cli.prefix.as_deref(), Some("v"));
        assert_eq!(cli.ignored, ["extra", "-x"]);
    }

    #[test]
    fn test_rejected_arguments_are_configuration_errors() {
        let err = parse_from(["semver-output", "--log-level", "bogus"]).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        let msg = err.to_string();
        assert!(msg.contains("invalid value 'bogus'"), "{msg}");
        assert!(!msg.starts_with("error:"));
        assert!(!msg.contains('\n'));
    }

    #[test]
    fn test_annotation_escapes_line_breaks() {
        let err = Error::parse("1.2.3\r\n::warning::injected 100%");
        assert_eq!(
            annotation(&err),
            "::error::raised error: target is not semver string: '1.2.3%0D%0A::warning::injected 100%25'"
        );
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain"), "plain");
        assert_eq!(escape_data("%0A"), "%250A");
        assert_eq!(escape_data("a\nb"), "a%0Ab");
    }
}
