//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
///
/// Serializes the benchmark report into machine-readable JSON format.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use crate::report::build_report;
    use crate::TimeUnit;
    use accessbench_core::{MeasurementSample, RunConfig, StrategyKind, StrategyMeasurement};
    use std::time::Duration;

    #[test]
    fn json_round_trips_through_the_report_model() {
        let measurements = vec![StrategyMeasurement {
            strategy: StrategyKind::ReflectiveFieldCached,
            threads: 2,
            samples: vec![MeasurementSample {
                operations: 123_456,
                elapsed: Duration::from_millis(500),
            }],
        }];
        let report = build_report(
            &measurements,
            &RunConfig::default(),
            TimeUnit::Millis,
            "0.1.0",
        );

        let json = super::generate_json_report(&report).unwrap();
        let parsed: crate::Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].strategy, "reflective-field-cached");
        assert_eq!(parsed.results[0].iterations[0].operations, 123_456);
        assert_eq!(parsed.meta.time_unit, TimeUnit::Millis);
    }
}
