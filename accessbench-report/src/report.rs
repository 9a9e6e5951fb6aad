//! Report Data Structures

use crate::TimeUnit;
use accessbench_core::{RunConfig, StrategyMeasurement};
use accessbench_stats::{Summary, compute_summary, ops_per_second};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complete benchmark report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One entry per measured strategy, in run order
    pub results: Vec<StrategyResult>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Schema version of this report layout
    pub schema_version: u32,
    /// Harness version that produced the report
    pub version: String,
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    /// Unit every score in the report is expressed in
    pub time_unit: TimeUnit,
    /// Run configuration the results were measured under
    pub config: ReportRunConfig,
}

/// Execution configuration captured in report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRunConfig {
    /// Warm-up iterations per strategy
    pub warmup_iterations: u32,
    /// Measurement iterations per strategy
    pub measurement_iterations: u32,
    /// Wall-clock milliseconds per iteration
    pub iteration_duration_ms: u64,
    /// Worker threads per iteration
    pub threads: usize,
    /// Text payload written by every operation
    pub payload_text: String,
    /// Integer payload written by every operation
    pub payload_number: i64,
}

impl From<&RunConfig> for ReportRunConfig {
    fn from(config: &RunConfig) -> Self {
        Self {
            warmup_iterations: config.warmup_iterations,
            measurement_iterations: config.measurement_iterations,
            iteration_duration_ms: config.iteration_duration.as_millis() as u64,
            threads: config.threads,
            payload_text: config.payload_text.clone(),
            payload_number: config.payload_number,
        }
    }
}

/// One strategy's result: per-iteration detail plus the throughput summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Strategy identifier
    pub strategy: String,
    /// Worker threads per iteration
    pub threads: usize,
    /// Per-iteration samples, in iteration order
    pub iterations: Vec<IterationRecord>,
    /// Mean throughput in the report's time unit
    pub score: f64,
    /// Standard error of the score, same unit
    pub error: f64,
    /// Summary over the per-iteration throughput samples, same unit
    pub summary: Summary,
}

/// One measurement iteration as it appears in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Completed operations across all workers
    pub operations: u64,
    /// Elapsed milliseconds of the slowest worker
    pub elapsed_ms: f64,
    /// Throughput in the report's time unit
    pub throughput: f64,
}

/// Fold a set of raw measurements into the report model.
///
/// Every per-iteration throughput is converted to `unit` before summarizing,
/// so scores, errors, and per-iteration values all share one unit.
pub fn build_report(
    measurements: &[StrategyMeasurement],
    config: &RunConfig,
    unit: TimeUnit,
    version: &str,
) -> Report {
    let results = measurements
        .iter()
        .map(|measurement| {
            let iterations: Vec<IterationRecord> = measurement
                .samples
                .iter()
                .map(|sample| IterationRecord {
                    operations: sample.operations,
                    elapsed_ms: sample.elapsed.as_secs_f64() * 1e3,
                    throughput: unit.scale(ops_per_second(sample.operations, sample.elapsed)),
                })
                .collect();
            let throughputs: Vec<f64> = iterations.iter().map(|i| i.throughput).collect();
            let summary = compute_summary(&throughputs);
            StrategyResult {
                strategy: measurement.strategy.id().to_string(),
                threads: measurement.threads,
                iterations,
                score: summary.mean,
                error: summary.std_error,
                summary,
            }
        })
        .collect();

    Report {
        meta: ReportMeta {
            schema_version: 1,
            version: version.to_string(),
            timestamp: Utc::now(),
            time_unit: unit,
            config: ReportRunConfig::from(config),
        },
        results,
    }
}
