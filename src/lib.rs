pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod gate;
pub mod lcov;
pub mod model;
pub mod report;
pub mod rollup;

/// Report parsed and every metric meets the threshold.
pub const EXIT_SUCCESS: i32 = 0;
/// Report parsed but at least one metric is below the threshold.
pub const EXIT_THRESHOLD_NOT_MET: i32 = 1;
/// The configured report could not be opened.
pub const EXIT_REPORT_NOT_FOUND: i32 = 2;
/// Malformed report contents, invalid configuration, or a read failure.
pub const EXIT_INVALID_INPUT: i32 = 3;
