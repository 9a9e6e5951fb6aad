//! Per-sample throughput conversion.

use std::time::Duration;

/// Convert one iteration's operation count and elapsed wall-clock time into
/// operations per second.
///
/// A zero elapsed time yields zero rather than infinity; such a sample only
/// arises from a degenerate clock and must not poison the summary.
pub fn ops_per_second(operations: u64, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        return 0.0;
    }
    operations as f64 / seconds
}
