//! Output formatting for gate results.

use std::fmt::Write;

use chrono::Utc;
use clap::ValueEnum;
use serde::Serialize;

use crate::rollup::{FileSummary, Rollup};

/// Output style for the gate report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Style {
    #[default]
    Text,
    Markdown,
    Json,
}

impl Style {
    pub fn formatter(&self) -> &'static dyn ReportFormatter {
        match self {
            Style::Text => &TextFormatter,
            Style::Markdown => &MarkdownFormatter,
            Style::Json => &JsonFormatter,
        }
    }
}

/// Trait for formatting gate results.
pub trait ReportFormatter {
    /// Format the rollup to a string.
    fn format(&self, rollup: &Rollup) -> String;
}

fn pct(rate: f64) -> f64 {
    rate * 100.0
}

/// Plain text formatter, the default console output.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, rollup: &Rollup) -> String {
        let mut out = String::new();
        let totals = &rollup.totals;

        writeln!(
            out,
            "Coverage summary: lines={:.2}% functions={:.2}% branches={:.2}%",
            pct(totals.line_rate()),
            pct(totals.function_rate()),
            pct(totals.branch_rate()),
        )
        .unwrap();

        writeln!(out, "Worst files by line coverage (min to max):").unwrap();
        for f in &rollup.worst_files {
            writeln!(
                out,
                " - {}: lines={:.2}% (LH/LF={}/{}), funcs={:.2}%, branches={:.2}%",
                f.path,
                pct(f.line_rate),
                f.counters.lines_hit,
                f.counters.lines_found,
                pct(f.function_rate),
                pct(f.branch_rate),
            )
            .unwrap();
        }

        let threshold = pct(rollup.verdict.threshold);
        for m in rollup.verdict.failures() {
            writeln!(
                out,
                "FAIL: {} coverage {:.2}% < {threshold:.0}%",
                m.metric,
                pct(m.rate),
            )
            .unwrap();
        }

        out
    }
}

/// Markdown formatter, suited to CI job summaries and PR comments.
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, rollup: &Rollup) -> String {
        let mut md = String::new();
        let verdict = &rollup.verdict;
        let threshold = pct(verdict.threshold);

        let status = if verdict.passed() { "passed" } else { "failed" };
        writeln!(md, "### Coverage gate {status} (threshold {threshold:.0}%)\n").unwrap();

        md.push_str("| Metric | Hit | Found | Coverage | |\n");
        md.push_str("|:-------|----:|------:|---------:|:-|\n");
        for m in &verdict.metrics {
            let mark = if m.passed { "✅" } else { "❌" };
            writeln!(
                md,
                "| {} | {} | {} | {:.2}% | {mark} |",
                m.metric,
                m.hit,
                m.found,
                pct(m.rate)
            )
            .unwrap();
        }

        if !rollup.worst_files.is_empty() {
            let shown = rollup.worst_files.len();
            let total = rollup.file_count;
            writeln!(md, "\n<details>\n<summary>Worst files ({shown} of {total})</summary>\n").unwrap();
            md.push_str("| File | Lines | Functions | Branches |\n");
            md.push_str("|:-----|------:|----------:|---------:|\n");
            for f in &rollup.worst_files {
                writeln!(
                    md,
                    "| `{}` | {:.2}% ({}/{}) | {:.2}% | {:.2}% |",
                    f.path,
                    pct(f.line_rate),
                    f.counters.lines_hit,
                    f.counters.lines_found,
                    pct(f.function_rate),
                    pct(f.branch_rate)
                )
                .unwrap();
            }
            md.push_str("\n</details>\n");
        }

        md
    }
}

/// Machine-readable formatter.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    passed: bool,
    threshold: f64,
    file_count: usize,
    totals: &'a crate::model::CounterSet,
    metrics: &'a [crate::rollup::MetricResult],
    worst_files: &'a [FileSummary],
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, rollup: &Rollup) -> String {
        let report = JsonReport {
            generated_at: Utc::now().to_rfc3339(),
            passed: rollup.passed(),
            threshold: rollup.verdict.threshold,
            file_count: rollup.file_count,
            totals: &rollup.totals,
            metrics: &rollup.verdict.metrics,
            worst_files: &rollup.worst_files,
        };
        // Every rate is finite, so serialization cannot fail.
        let mut out = serde_json::to_string_pretty(&report).expect("report serializes");
        out.push('\n');
        out
    }
}
