#![warn(missing_docs)]
//! Accessbench Report - Result Model and Rendering
//!
//! Generates the output formats:
//! - JSON (machine-readable, full sample detail)
//! - CSV (spreadsheet-compatible, one row per strategy)
//! - Human-readable score table

mod csv;
mod human;
mod json;
mod report;

pub use csv::generate_csv_report;
pub use human::generate_human_report;
pub use json::generate_json_report;
pub use report::{
    IterationRecord, Report, ReportMeta, ReportRunConfig, StrategyResult, build_report,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full sample detail
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable score table
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Time unit scores are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Operations per second
    Seconds,
    /// Operations per millisecond
    Millis,
    /// Operations per microsecond
    Micros,
    /// Operations per nanosecond
    Nanos,
}

impl TimeUnit {
    /// Convert an ops-per-second rate into this unit.
    pub fn scale(self, ops_per_second: f64) -> f64 {
        match self {
            TimeUnit::Seconds => ops_per_second,
            TimeUnit::Millis => ops_per_second / 1e3,
            TimeUnit::Micros => ops_per_second / 1e6,
            TimeUnit::Nanos => ops_per_second / 1e9,
        }
    }

    /// Unit label as printed next to scores.
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "ops/s",
            TimeUnit::Millis => "ops/ms",
            TimeUnit::Micros => "ops/us",
            TimeUnit::Nanos => "ops/ns",
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "sec" | "seconds" => Ok(TimeUnit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(TimeUnit::Millis),
            "us" | "micros" | "microseconds" => Ok(TimeUnit::Micros),
            "ns" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanos),
            other => Err(format!("Unknown time unit: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parses_aliases() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn time_unit_scales_rates() {
        assert_eq!(TimeUnit::Seconds.scale(2.5e6), 2.5e6);
        assert_eq!(TimeUnit::Millis.scale(2.5e6), 2.5e3);
        assert_eq!(TimeUnit::Nanos.scale(2.5e9), 2.5);
    }

    #[test]
    fn time_unit_parses_aliases() {
        assert_eq!("ms".parse::<TimeUnit>().unwrap(), TimeUnit::Millis);
        assert_eq!("Nanos".parse::<TimeUnit>().unwrap(), TimeUnit::Nanos);
        assert!("fortnights".parse::<TimeUnit>().is_err());
    }
}
