//! In-memory representation of the aggregated coverage counters. The parser
//! produces a `CoverageData`, which the rollup turns into ratios and a verdict.

use indexmap::IndexMap;
use serde::Serialize;

/// Compute a coverage rate, returning 1.0 when nothing was found.
///
/// An empty denominator counts as fully covered, so files or metrics
/// with nothing instrumented never fail the gate.
#[must_use]
pub fn rate(hit: u64, found: u64) -> f64 {
    if found == 0 {
        1.0
    } else {
        hit as f64 / found as f64
    }
}

/// One of the six LCOV summary counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    FunctionsFound,
    FunctionsHit,
    LinesFound,
    LinesHit,
    BranchesFound,
    BranchesHit,
}

impl Counter {
    pub const ALL: [Counter; 6] = [
        Counter::FunctionsFound,
        Counter::FunctionsHit,
        Counter::LinesFound,
        Counter::LinesHit,
        Counter::BranchesFound,
        Counter::BranchesHit,
    ];

    /// The record tag used in the report, e.g. `LF`.
    pub fn tag(&self) -> &'static str {
        match self {
            Counter::FunctionsFound => "FNF",
            Counter::FunctionsHit => "FNH",
            Counter::LinesFound => "LF",
            Counter::LinesHit => "LH",
            Counter::BranchesFound => "BRF",
            Counter::BranchesHit => "BRH",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

/// Functions, lines and branches found/hit.
///
/// `hit <= found` is expected but not enforced; whatever the report says
/// is summed as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSet {
    pub functions_found: u64,
    pub functions_hit: u64,
    pub lines_found: u64,
    pub lines_hit: u64,
    pub branches_found: u64,
    pub branches_hit: u64,
}

impl CounterSet {
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::FunctionsFound => self.functions_found,
            Counter::FunctionsHit => self.functions_hit,
            Counter::LinesFound => self.lines_found,
            Counter::LinesHit => self.lines_hit,
            Counter::BranchesFound => self.branches_found,
            Counter::BranchesHit => self.branches_hit,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut u64 {
        match counter {
            Counter::FunctionsFound => &mut self.functions_found,
            Counter::FunctionsHit => &mut self.functions_hit,
            Counter::LinesFound => &mut self.lines_found,
            Counter::LinesHit => &mut self.lines_hit,
            Counter::BranchesFound => &mut self.branches_found,
            Counter::BranchesHit => &mut self.branches_hit,
        }
    }

    /// Add `value` to one counter, saturating at `u64::MAX`.
    pub fn add(&mut self, counter: Counter, value: u64) {
        let slot = self.slot(counter);
        *slot = slot.saturating_add(value);
    }

    /// Componentwise sum.
    pub fn merge(&mut self, other: &CounterSet) {
        for counter in Counter::ALL {
            self.add(counter, other.get(counter));
        }
    }

    #[must_use]
    pub fn line_rate(&self) -> f64 {
        rate(self.lines_hit, self.lines_found)
    }

    #[must_use]
    pub fn function_rate(&self) -> f64 {
        rate(self.functions_hit, self.functions_found)
    }

    #[must_use]
    pub fn branch_rate(&self) -> f64 {
        rate(self.branches_hit, self.branches_found)
    }
}

/// Everything the parser accumulated from one report.
///
/// `files` keeps first-seen order so that ranking ties resolve the same way
/// on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoverageData {
    pub totals: CounterSet,
    pub files: IndexMap<String, CounterSet>,
}

impl CoverageData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to both the global totals and the record for `path`,
    /// creating the record on first use.
    pub fn record(&mut self, path: &str, counter: Counter, value: u64) {
        self.totals.add(counter, value);
        self.files
            .entry(path.to_string())
            .or_default()
            .add(counter, value);
    }

    /// Make sure `path` has a record even if no counters follow.
    pub fn touch(&mut self, path: &str) {
        if !self.files.contains_key(path) {
            self.files.insert(path.to_string(), CounterSet::default());
        }
    }
}
