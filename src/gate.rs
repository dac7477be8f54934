use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use log::debug;

use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::filter::PathFilter;
use crate::lcov::{self, ParseOptions};
use crate::model::CoverageData;
use crate::rollup::Rollup;
use crate::{EXIT_SUCCESS, EXIT_THRESHOLD_NOT_MET};

/// Open the report at `path` and parse it in one pass.
///
/// A missing or unreadable path, or one that is not a regular file (such as
/// a directory), is reported as [`GateError::ReportNotFound`] before any
/// parsing happens. The file handle is dropped on every return
/// path, including parse errors.
pub fn load_report(path: &Path, filter: &PathFilter, options: ParseOptions) -> Result<CoverageData> {
    let file = File::open(path).map_err(|source| GateError::ReportNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    if !file.metadata()?.is_file() {
        return Err(GateError::ReportNotFound {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    debug!("reading {}", path.display());
    let mut reader = BufReader::new(file);
    lcov::parse_reader(&mut reader, filter, options)
}

/// Result of a complete gate run.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub data: CoverageData,
    pub rollup: Rollup,
}

impl GateOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.rollup.passed()
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            EXIT_SUCCESS
        } else {
            EXIT_THRESHOLD_NOT_MET
        }
    }

    /// Render the rollup with the configured output style.
    pub fn render(&self, config: &GateConfig) -> String {
        config.style.formatter().format(&self.rollup)
    }
}

/// Validate the configuration, load the report and compute the verdict.
pub fn run(config: &GateConfig) -> Result<GateOutcome> {
    config.validate()?;
    let data = load_report(&config.report_path, &config.filter, config.parse_options())?;
    let rollup = Rollup::build(&data, config.threshold, config.top);
    debug!(
        "{} files gated, verdict: {}",
        rollup.file_count,
        if rollup.passed() { "pass" } else { "fail" }
    );
    Ok(GateOutcome { data, rollup })
}
