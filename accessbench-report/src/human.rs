//! Human-Readable Output
//!
//! A fixed-width score table in the familiar `score ± error units` shape,
//! widest column wins.

use crate::report::Report;
use std::fmt::Write;

/// Generate the human-readable score table.
pub fn generate_human_report(report: &Report) -> String {
    let unit = report.meta.time_unit.label();
    let name_width = report
        .results
        .iter()
        .map(|r| r.strategy.len())
        .chain(["Benchmark".len()].into_iter())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  Threads  Samples  {:>16}  {:>12}  Units",
        "Benchmark", "Score", "Error"
    );
    for result in &report.results {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>7}  {:>7}  {:>16.3}  {:>12}  {}",
            result.strategy,
            result.threads,
            result.summary.sample_count,
            result.score,
            format!("± {:.3}", result.error),
            unit,
        );
    }
    out
}
