//! Gate configuration, built once at the entry point and passed down by
//! reference.

use std::path::PathBuf;

use crate::error::{GateError, Result};
use crate::filter::PathFilter;
use crate::lcov::ParseOptions;
use crate::report::Style;
use crate::rollup::DEFAULT_TOP;

pub const DEFAULT_THRESHOLD: f64 = 0.90;
pub const DEFAULT_REPORT_PATH: &str = "lcov.info";

#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Location of the LCOV report.
    pub report_path: PathBuf,
    /// Minimum fraction in `[0, 1]` each metric must reach.
    pub threshold: f64,
    pub filter: PathFilter,
    /// How many files the worst-offenders section lists.
    pub top: usize,
    pub strict_records: bool,
    pub style: Style,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            threshold: DEFAULT_THRESHOLD,
            filter: PathFilter::default(),
            top: DEFAULT_TOP,
            strict_records: false,
            style: Style::Text,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(GateError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_records: self.strict_records,
        }
    }
}
