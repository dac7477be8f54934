//! Turns accumulated counters into ratios, a worst-first file ranking and
//! a pass/fail verdict.

use serde::Serialize;

use crate::model::{CounterSet, CoverageData};

/// Number of files listed in the worst-offenders section by default.
pub const DEFAULT_TOP: usize = 10;

/// A gated coverage metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Line,
    Function,
    Branch,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Line, Metric::Function, Metric::Branch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Line => "line",
            Metric::Function => "function",
            Metric::Branch => "branch",
        }
    }

    /// `(hit, found)` for this metric.
    pub fn counts(&self, counters: &CounterSet) -> (u64, u64) {
        match self {
            Metric::Line => (counters.lines_hit, counters.lines_found),
            Metric::Function => (counters.functions_hit, counters.functions_found),
            Metric::Branch => (counters.branches_hit, counters.branches_found),
        }
    }

    pub fn rate(&self, counters: &CounterSet) -> f64 {
        match self {
            Metric::Line => counters.line_rate(),
            Metric::Function => counters.function_rate(),
            Metric::Branch => counters.branch_rate(),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric compared against the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub hit: u64,
    pub found: u64,
    pub rate: f64,
    pub passed: bool,
}

/// Outcome of comparing the three overall rates against one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub threshold: f64,
    pub metrics: Vec<MetricResult>,
}

impl Verdict {
    /// Compare each overall rate against `threshold`. Equal counts as passing.
    pub fn evaluate(totals: &CounterSet, threshold: f64) -> Self {
        let metrics = Metric::ALL
            .iter()
            .map(|&metric| {
                let (hit, found) = metric.counts(totals);
                let rate = metric.rate(totals);
                MetricResult {
                    metric,
                    hit,
                    found,
                    rate,
                    passed: rate >= threshold,
                }
            })
            .collect();
        Self { threshold, metrics }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.metrics.iter().all(|m| m.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &MetricResult> {
        self.metrics.iter().filter(|m| !m.passed)
    }

    pub fn get(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.metric == metric)
    }
}

/// Per-file row of the worst-offenders list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub counters: CounterSet,
    pub line_rate: f64,
    pub function_rate: f64,
    pub branch_rate: f64,
}

impl FileSummary {
    fn new(path: &str, counters: &CounterSet) -> Self {
        Self {
            path: path.to_string(),
            counters: *counters,
            line_rate: counters.line_rate(),
            function_rate: counters.function_rate(),
            branch_rate: counters.branch_rate(),
        }
    }
}

/// Files sorted by line coverage ascending, at most `limit` of them.
///
/// The sort is stable, so files with equal rates stay in the order the
/// report first mentioned them.
pub fn worst_offenders(data: &CoverageData, limit: usize) -> Vec<FileSummary> {
    let mut files: Vec<FileSummary> = data
        .files
        .iter()
        .map(|(path, counters)| FileSummary::new(path, counters))
        .collect();
    files.sort_by(|a, b| a.line_rate.total_cmp(&b.line_rate));
    files.truncate(limit);
    files
}

/// Everything the reporter needs from one parsed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rollup {
    pub totals: CounterSet,
    pub file_count: usize,
    pub worst_files: Vec<FileSummary>,
    pub verdict: Verdict,
}

impl Rollup {
    pub fn build(data: &CoverageData, threshold: f64, top: usize) -> Self {
        Self {
            totals: data.totals,
            file_count: data.files.len(),
            worst_files: worst_offenders(data, top),
            verdict: Verdict::evaluate(&data.totals, threshold),
        }
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.verdict.passed()
    }
}
