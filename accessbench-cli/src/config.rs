//! Configuration loading from accessbench.toml
//!
//! Accessbench configuration can be specified in an `accessbench.toml` file in
//! the project root. The configuration is automatically discovered by walking
//! up from the current directory.

use accessbench_core::{MemberNames, RunConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Accessbench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Payload configuration
    #[serde(default)]
    pub payload: PayloadConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Warm-up iterations per strategy
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: u32,
    /// Measurement iterations per strategy
    #[serde(default = "default_measurement_iterations")]
    pub measurement_iterations: u32,
    /// Wall-clock duration of one iteration (e.g., "5s", "500ms")
    #[serde(default = "default_iteration_time")]
    pub iteration_time: String,
    /// Worker threads per iteration
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Grace period for workers to report after the stop signal (e.g., "5s")
    #[serde(default = "default_grace_period")]
    pub grace_period: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: default_warmup_iterations(),
            measurement_iterations: default_measurement_iterations(),
            iteration_time: default_iteration_time(),
            threads: default_threads(),
            grace_period: default_grace_period(),
        }
    }
}

fn default_warmup_iterations() -> u32 {
    4
}
fn default_measurement_iterations() -> u32 {
    4
}
fn default_iteration_time() -> String {
    "5s".to_string()
}
fn default_threads() -> usize {
    2
}
fn default_grace_period() -> String {
    "5s".to_string()
}

/// Payload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// Text written to the record's text field by every operation
    #[serde(default = "default_payload_text")]
    pub text: String,
    /// Integer written to the record's integer field by every operation
    #[serde(default = "default_payload_number")]
    pub number: i64,
    /// Member names the strategies resolve against
    #[serde(default)]
    pub names: MemberNames,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            text: default_payload_text(),
            number: default_payload_number(),
            names: MemberNames::default(),
        }
    }
}

fn default_payload_text() -> String {
    "Hello World!".to_string()
}
fn default_payload_number() -> i64 {
    10_000
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Time unit scores are reported in: "s", "ms", "us", "ns"
    #[serde(default = "default_time_unit")]
    pub time_unit: String,
    /// Result file the JSON report is always written to
    #[serde(default = "default_result_file")]
    pub result_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            time_unit: default_time_unit(),
            result_file: default_result_file(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_time_unit() -> String {
    "ms".to_string()
}
fn default_result_file() -> String {
    "accessbench-result.json".to_string()
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("accessbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# Accessbench Configuration

[runner]
# Warm-up iterations per strategy (discarded)
warmup_iterations = 4
# Measurement iterations per strategy
measurement_iterations = 4
# Wall-clock duration of one iteration
iteration_time = "5s"
# Worker threads per iteration
threads = 2
# Grace period for workers to report after the stop signal
grace_period = "5s"

[payload]
# Text written by every operation
text = "Hello World!"
# Integer written by every operation
number = 10000

[output]
# Default output format: human, json, csv
format = "human"
# Time unit for scores: s, ms, us, ns
time_unit = "ms"
# JSON report destination, always written
result_file = "accessbench-result.json"
"#
        .to_string()
    }

    /// Parse duration string (e.g., "3s", "500ms", "2m") to nanoseconds
    pub fn parse_duration(s: &str) -> anyhow::Result<u64> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty duration string"));
        }

        // Find where the number ends and unit begins
        let (num_part, unit_part) = s
            .char_indices()
            .find(|(_, c)| c.is_alphabetic())
            .map(|(i, _)| s.split_at(i))
            .unwrap_or((s, "s"));

        let value: f64 = num_part
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid duration number: {}", num_part))?;

        let multiplier: u64 = match unit_part.to_lowercase().as_str() {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" | "" => 1_000_000_000,
            "m" | "min" => 60_000_000_000,
            _ => return Err(anyhow::anyhow!("Unknown duration unit: {}", unit_part)),
        };

        Ok((value * multiplier as f64) as u64)
    }

    /// Lower the file configuration into engine run parameters.
    pub fn to_run_config(&self) -> anyhow::Result<RunConfig> {
        let iteration_ns = Self::parse_duration(&self.runner.iteration_time)?;
        let grace_ns = Self::parse_duration(&self.runner.grace_period)?;
        Ok(RunConfig {
            warmup_iterations: self.runner.warmup_iterations,
            measurement_iterations: self.runner.measurement_iterations,
            iteration_duration: Duration::from_nanos(iteration_ns),
            threads: self.runner.threads,
            grace_period: Duration::from_nanos(grace_ns),
            payload_text: self.payload.text.clone(),
            payload_number: self.payload.number,
            names: self.payload.names.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.runner.warmup_iterations, 4);
        assert_eq!(config.runner.measurement_iterations, 4);
        assert_eq!(config.runner.iteration_time, "5s");
        assert_eq!(config.runner.threads, 2);
        assert_eq!(config.payload.text, "Hello World!");
        assert_eq!(config.payload.number, 10_000);
        assert_eq!(config.output.result_file, "accessbench-result.json");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(BenchConfig::parse_duration("3s").unwrap(), 3_000_000_000);
        assert_eq!(BenchConfig::parse_duration("500ms").unwrap(), 500_000_000);
        assert_eq!(BenchConfig::parse_duration("100us").unwrap(), 100_000);
        assert_eq!(BenchConfig::parse_duration("1000ns").unwrap(), 1000);
        assert_eq!(BenchConfig::parse_duration("2m").unwrap(), 120_000_000_000);
        assert_eq!(BenchConfig::parse_duration("1.5s").unwrap(), 1_500_000_000);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            iteration_time = "250ms"
            threads = 8

            [payload]
            text = "payload"
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iteration_time, "250ms");
        assert_eq!(config.runner.threads, 8);
        assert_eq!(config.payload.text, "payload");
        // Defaults should still apply
        assert_eq!(config.runner.warmup_iterations, 4);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = BenchConfig::default_toml();
        let config: BenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.iteration_time, "5s");
        assert_eq!(config.payload.number, 10_000);
    }

    #[test]
    fn test_member_names_in_toml() {
        let toml_str = r#"
            [payload.names]
            text_field = "strValue"
        "#;
        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.payload.names.text_field, "strValue");
        assert_eq!(config.payload.names.number_field, "number");
    }

    #[test]
    fn test_to_run_config() {
        let mut config = BenchConfig::default();
        config.runner.iteration_time = "250ms".to_string();
        config.runner.threads = 4;
        let run = config.to_run_config().unwrap();
        assert_eq!(run.iteration_duration, Duration::from_millis(250));
        assert_eq!(run.threads, 4);
        assert_eq!(run.payload_text, "Hello World!");
    }
}
