/// Streaming reader for the LCOV `.info` summary counters.
///
/// Only the per-record summary lines matter here:
///   SF:<path to source file>
///   FNF:<number of functions found>
///   FNH:<number of functions hit>
///   LF:<lines found>
///   LH:<lines hit>
///   BRF:<branches found>
///   BRH:<branches hit>
///   end_of_record
///
/// Every other record (`TN`, `FN`, `DA`, `BRDA`, ...) is skipped.
use std::io::BufRead;

use log::{debug, trace, warn};

use crate::error::{GateError, Result};
use crate::filter::PathFilter;
use crate::model::{Counter, CoverageData};

const END_OF_RECORD: &str = "end_of_record";
const SOURCE_FILE_TAG: &str = "SF";

/// Where the parser is between two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseState {
    /// No `SF:` record is open.
    Idle,
    /// Counters belong to `path`; `included` is fixed when the record opens.
    InFile { path: String, included: bool },
}

/// Knobs that change how the parser treats questionable input.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Fail on a second `SF:` block for a path that was already recorded,
    /// instead of accumulating into the existing entry.
    pub strict_records: bool,
}

/// Parser accumulating counters for the paths accepted by a filter.
pub struct LcovParser<'a> {
    filter: &'a PathFilter,
    options: ParseOptions,
    state: ParseState,
    data: CoverageData,
    line_number: usize,
    records: usize,
    excluded: usize,
}

impl<'a> LcovParser<'a> {
    pub fn new(filter: &'a PathFilter, options: ParseOptions) -> Self {
        Self {
            filter,
            options,
            state: ParseState::Idle,
            data: CoverageData::new(),
            line_number: 0,
            records: 0,
            excluded: 0,
        }
    }

    pub fn state(&self) -> &ParseState {
        &self.state
    }

    pub fn data(&self) -> &CoverageData {
        &self.data
    }

    /// Feed one raw line of the report.
    pub fn step(&mut self, raw_line: &str) -> Result<()> {
        self.line_number += 1;
        let line = raw_line.trim();
        if line.is_empty() {
            return Ok(());
        }

        if line == END_OF_RECORD {
            self.state = ParseState::Idle;
            return Ok(());
        }

        // Split on first ':'
        let (tag, value) = match line.split_once(':') {
            Some(pair) => pair,
            None => return Ok(()),
        };

        if tag == SOURCE_FILE_TAG {
            return self.open_record(value);
        }

        let Some(counter) = Counter::from_tag(tag) else {
            return Ok(());
        };

        // Idle or excluded: the value is never looked at.
        if let ParseState::InFile {
            path,
            included: true,
        } = &self.state
        {
            let amount = parse_counter(counter, value, self.line_number)?;
            self.data.record(path, counter, amount);
        }

        Ok(())
    }

    fn open_record(&mut self, path: &str) -> Result<()> {
        self.records += 1;
        let included = self.filter.include(path);

        if included {
            if self.data.files.contains_key(path) {
                if self.options.strict_records {
                    return Err(GateError::DuplicateRecord {
                        path: path.to_string(),
                        line: self.line_number,
                    });
                }
                warn!(
                    "duplicate record for '{path}' at line {}; counters accumulate into the existing entry",
                    self.line_number
                );
            }
            self.data.touch(path);
        } else {
            self.excluded += 1;
            trace!("excluding '{path}'");
        }

        self.state = ParseState::InFile {
            path: path.to_string(),
            included,
        };
        Ok(())
    }

    /// Consume the parser. A trailing record without `end_of_record` keeps
    /// whatever it already contributed.
    pub fn finish(self) -> CoverageData {
        debug!(
            "parsed {} lines: {} records, {} included files, {} excluded records",
            self.line_number,
            self.records,
            self.data.files.len(),
            self.excluded
        );
        self.data
    }
}

fn parse_counter(counter: Counter, value: &str, line: usize) -> Result<u64> {
    let value = value.trim();
    value
        .parse::<u64>()
        .map_err(|source| GateError::MalformedCounter {
            line,
            field: counter.tag(),
            value: value.to_string(),
            source,
        })
}

/// Read LCOV line-by-line from a buffered reader so the full input need
/// not be in memory at once.
pub fn parse_reader(
    reader: &mut dyn BufRead,
    filter: &PathFilter,
    options: ParseOptions,
) -> Result<CoverageData> {
    let mut parser = LcovParser::new(filter, options);

    let mut raw_line = String::new();
    loop {
        raw_line.clear();
        let n = reader.read_line(&mut raw_line)?;
        if n == 0 {
            break; // EOF
        }
        parser.step(&raw_line)?;
    }

    Ok(parser.finish())
}

/// Parse LCOV data from raw bytes.
pub fn parse(input: &[u8], filter: &PathFilter, options: ParseOptions) -> Result<CoverageData> {
    parse_reader(&mut &*input, filter, options)
}
