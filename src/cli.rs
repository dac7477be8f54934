//! Command-line surface. Every option falls back to an environment variable
//! so the gate can be driven purely from CI configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{GateConfig, DEFAULT_REPORT_PATH, DEFAULT_THRESHOLD};
use crate::error::GateError;
use crate::filter::{PathFilter, DEFAULT_EXCLUDE_PREFIXES, DEFAULT_INCLUDE_PREFIXES};
use crate::gate;
use crate::report::Style;
use crate::rollup::DEFAULT_TOP;
use crate::{EXIT_INVALID_INPUT, EXIT_REPORT_NOT_FOUND};

#[derive(Parser, Debug)]
#[command(name = "covgate", version)]
#[command(about = "Fail the build when LCOV coverage for gated paths drops below a threshold")]
#[command(long_about = "Aggregate LCOV line, function and branch counters for the selected \
    source paths and compare each ratio against a threshold.\n\n\
    Exit codes:\n  \
    0 - All metrics meet the threshold\n  \
    1 - At least one metric is below the threshold\n  \
    2 - Coverage report not found\n  \
    3 - Malformed report or invalid configuration")]
pub struct Cli {
    /// Path to the LCOV report
    #[arg(long, env = "LCOV_FILE", default_value = DEFAULT_REPORT_PATH)]
    pub lcov_file: PathBuf,

    /// Minimum coverage as a fraction in [0, 1]
    #[arg(long, env = "COVERAGE_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Gated path prefixes (comma-separated or repeated; replaces the defaults)
    #[arg(long, env = "COVERAGE_INCLUDE", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Path prefixes removed from the gate (comma-separated or repeated; replaces the defaults)
    #[arg(long, env = "COVERAGE_EXCLUDE", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Number of worst files to list
    #[arg(long, env = "COVERAGE_TOP", default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// Reject a report that repeats an `SF:` block for the same path
    #[arg(
        long,
        env = "COVERAGE_STRICT_RECORDS",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub strict_records: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: Style,

    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the gate configuration, substituting the default prefix sets
    /// for any list left empty.
    pub fn to_config(&self) -> GateConfig {
        let include: Vec<String> = if self.include.is_empty() {
            DEFAULT_INCLUDE_PREFIXES.iter().map(|p| p.to_string()).collect()
        } else {
            self.include.clone()
        };
        let exclude: Vec<String> = if self.exclude.is_empty() {
            DEFAULT_EXCLUDE_PREFIXES.iter().map(|p| p.to_string()).collect()
        } else {
            self.exclude.clone()
        };

        GateConfig {
            report_path: self.lcov_file.clone(),
            threshold: self.threshold,
            filter: PathFilter::new(include, exclude),
            top: self.top,
            strict_records: self.strict_records,
            style: self.format,
        }
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Output of one gate invocation, kept separate from printing so it can be
/// checked without capturing stdout.
#[derive(Debug)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Exit code for a fatal error.
pub fn error_exit_code(err: &GateError) -> i32 {
    match err {
        GateError::ReportNotFound { .. } => EXIT_REPORT_NOT_FOUND,
        _ => EXIT_INVALID_INPUT,
    }
}

pub fn cmd_check(config: &GateConfig) -> CommandOutput {
    match gate::run(config) {
        Ok(outcome) => CommandOutput {
            exit_code: outcome.exit_code(),
            stdout: outcome.render(config),
            stderr: String::new(),
        },
        Err(e) => CommandOutput {
            exit_code: error_exit_code(&e),
            stdout: String::new(),
            stderr: format!("Error: {e}\n"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXIT_SUCCESS, EXIT_THRESHOLD_NOT_MET};

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn config_for(name: &str) -> GateConfig {
        GateConfig {
            report_path: fixture(name),
            ..Default::default()
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["covgate"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.report_path, PathBuf::from("lcov.info"));
        assert_eq!(config.threshold, 0.90);
        assert_eq!(config.top, 10);
        assert_eq!(config.filter, PathFilter::default());
        assert_eq!(config.style, Style::Text);
        assert!(!config.strict_records);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "covgate",
            "--lcov-file",
            "out/lcov.info",
            "--threshold",
            "0.75",
            "--include",
            "contracts/,src/",
            "--include",
            "pkg/",
            "--exclude",
            "src/mocks/",
            "--top",
            "3",
            "--strict-records",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "trace");

        let config = cli.to_config();
        assert_eq!(config.report_path, PathBuf::from("out/lcov.info"));
        assert_eq!(config.threshold, 0.75);
        assert_eq!(
            config.filter.include_prefixes(),
            &["contracts/".to_string(), "src/".to_string(), "pkg/".to_string()]
        );
        assert_eq!(config.filter.exclude_prefixes(), &["src/mocks/".to_string()]);
        assert_eq!(config.top, 3);
        assert!(config.strict_records);
        assert_eq!(config.style, Style::Json);
    }

    #[test]
    fn test_cmd_check_pass() {
        let out = cmd_check(&config_for("passing.info"));
        assert_eq!(out.exit_code, EXIT_SUCCESS);
        assert!(out
            .stdout
            .starts_with("Coverage summary: lines=95.00% functions=100.00% branches=95.00%\n"));
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_cmd_check_threshold_failure() {
        let out = cmd_check(&config_for("failing_lines.info"));
        assert_eq!(out.exit_code, EXIT_THRESHOLD_NOT_MET);
        assert!(out.stdout.contains("FAIL: line coverage 80.00% < 90%"));
    }

    #[test]
    fn test_cmd_check_missing_report() {
        let out = cmd_check(&config_for("does-not-exist.info"));
        assert_eq!(out.exit_code, EXIT_REPORT_NOT_FOUND);
        assert!(out.stdout.is_empty());
        assert!(out.stderr.contains("lcov file not found"));
        assert!(out.stderr.contains("does-not-exist.info"));
    }

    #[test]
    fn test_cmd_check_malformed_report() {
        let out = cmd_check(&config_for("malformed.info"));
        assert_eq!(out.exit_code, EXIT_INVALID_INPUT);
        assert!(out.stdout.is_empty());
        assert!(out.stderr.contains("malformed LH value 'ninety'"));
    }

    #[test]
    fn test_cmd_check_invalid_threshold() {
        let config = GateConfig {
            threshold: 90.0,
            ..config_for("passing.info")
        };
        let out = cmd_check(&config);
        assert_eq!(out.exit_code, EXIT_INVALID_INPUT);
        assert!(out.stdout.is_empty());
    }
}
