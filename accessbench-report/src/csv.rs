//! CSV Output

use crate::report::Report;
use std::fmt::Write;

/// Generate a CSV report, one row per strategy.
pub fn generate_csv_report(report: &Report) -> String {
    let mut out = String::new();
    let unit = report.meta.time_unit.label();
    let _ = writeln!(
        out,
        "strategy,threads,samples,score ({unit}),error ({unit}),min ({unit}),max ({unit})"
    );
    for result in &report.results {
        let _ = writeln!(
            out,
            "{},{},{},{:.3},{:.3},{:.3},{:.3}",
            result.strategy,
            result.threads,
            result.summary.sample_count,
            result.score,
            result.error,
            result.summary.min,
            result.summary.max,
        );
    }
    out
}
