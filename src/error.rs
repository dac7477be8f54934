use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("lcov file not found at {}: {source}", .path.display())]
    ReportNotFound {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: malformed {field} value '{value}': {source}")]
    MalformedCounter {
        line: usize,
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("line {line}: duplicate record for '{path}'")]
    DuplicateRecord { path: String, line: usize },

    #[error("threshold must be a fraction in [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GateError>;
