#![warn(missing_docs)]
//! Accessbench CLI Library
//!
//! Provides the command-line driver for the accessor benchmark harness. Use
//! `accessbench_cli::run()` in a binary's main function to get the full CLI:
//! strategy filtering, configuration discovery, execution, and reporting.

mod config;
mod executor;

pub use config::{BenchConfig, OutputConfig, PayloadConfig, RunnerConfig};
pub use executor::Executor;

use accessbench_core::{RunConfig, StrategyKind};
use accessbench_report::{
    OutputFormat, Report, TimeUnit, build_report, generate_csv_report, generate_human_report,
    generate_json_report,
};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Accessbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "accessbench")]
#[command(author, version, about = "Accessbench - field accessor throughput harness")]
pub struct Cli {
    /// Optional subcommand (List, Run, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter strategies by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Output format: json, csv, human
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Warm-up iterations per strategy
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Measurement iterations per strategy
    #[arg(long)]
    pub measurement: Option<u32>,

    /// Wall-clock duration of one iteration (e.g., "5s", "500ms")
    #[arg(long)]
    pub iteration_time: Option<String>,

    /// Worker threads per iteration
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Time unit for scores: s, ms, us, ns
    #[arg(long)]
    pub unit: Option<String>,

    /// JSON result file (always written in addition to the chosen format)
    #[arg(long)]
    pub result_file: Option<PathBuf>,

    /// Dry run - list strategies without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all strategies
    List,
    /// Run the benchmark (default)
    Run,
    /// Write a default accessbench.toml to the current directory
    Init,
}

/// Run the accessbench CLI with the given arguments.
/// This is the main entry point for the benchmark binary.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the accessbench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("accessbench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("accessbench=info")
            .init();
    }

    // Discover accessbench.toml configuration (CLI flags override)
    let config = BenchConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::Init) => init_config(),
        _ if lists_only(&cli) => list_strategies(&cli),
        _ => run_benchmark(&cli, &config),
    }
}

/// Whether this invocation only lists strategies: the list subcommand, or
/// --dry-run with a run (explicit or defaulted).
fn lists_only(cli: &Cli) -> bool {
    matches!(cli.command, Some(Commands::List))
        || (cli.dry_run && matches!(cli.command, Some(Commands::Run) | None))
}

/// Filter strategies by the CLI regex, preserving report order.
fn filter_strategies(cli: &Cli) -> anyhow::Result<Vec<StrategyKind>> {
    let filter = Regex::new(&cli.filter)
        .map_err(|e| anyhow::anyhow!("Invalid filter pattern '{}': {}", cli.filter, e))?;
    Ok(StrategyKind::ALL
        .into_iter()
        .filter(|kind| filter.is_match(kind.id()))
        .collect())
}

fn list_strategies(cli: &Cli) -> anyhow::Result<()> {
    let strategies = filter_strategies(cli)?;
    println!("Accessbench strategies:");
    for kind in &strategies {
        let note = if kind.resolves_per_call() {
            " (resolves per call)"
        } else {
            ""
        };
        println!("├── {}{}", kind, note);
    }
    println!("{} strategies selected.", strategies.len());
    Ok(())
}

fn init_config() -> anyhow::Result<()> {
    let path = std::path::Path::new("accessbench.toml");
    if path.exists() {
        return Err(anyhow::anyhow!("accessbench.toml already exists"));
    }
    std::fs::write(path, BenchConfig::default_toml())?;
    println!("Wrote accessbench.toml");
    Ok(())
}

/// Resolve the output format by layering: accessbench.toml default → CLI
/// override.
fn resolve_format(cli: &Cli, config: &BenchConfig) -> anyhow::Result<OutputFormat> {
    cli.format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
}

/// Build a RunConfig by layering: accessbench.toml defaults → CLI overrides.
fn build_run_config(cli: &Cli, config: &BenchConfig) -> anyhow::Result<RunConfig> {
    let mut run = config.to_run_config()?;
    if let Some(warmup) = cli.warmup {
        run.warmup_iterations = warmup;
    }
    if let Some(measurement) = cli.measurement {
        run.measurement_iterations = measurement;
    }
    if let Some(ref iteration_time) = cli.iteration_time {
        run.iteration_duration =
            Duration::from_nanos(BenchConfig::parse_duration(iteration_time)?);
    }
    if let Some(threads) = cli.threads {
        run.threads = threads;
    }
    Ok(run)
}

fn run_benchmark(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let strategies = filter_strategies(cli)?;
    if strategies.is_empty() {
        println!("No strategies match filter '{}'.", cli.filter);
        return Ok(());
    }

    let format = resolve_format(cli, config)?;
    let unit: TimeUnit = cli
        .unit
        .as_deref()
        .unwrap_or(&config.output.time_unit)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let run_config = build_run_config(cli, config)?;
    println!(
        "Running {} strategies, {} threads, {} x {:?} iterations...\n",
        strategies.len(),
        run_config.threads,
        run_config.measurement_iterations,
        run_config.iteration_duration
    );

    let mut executor = Executor::new(run_config.clone())?;
    let measurements = executor.execute(&strategies)?;

    let report = build_report(
        &measurements,
        &run_config,
        unit,
        env!("CARGO_PKG_VERSION"),
    );

    // The JSON result file is always written, whatever format goes to stdout.
    let result_file = cli
        .result_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.result_file));
    std::fs::write(&result_file, generate_json_report(&report)?)?;
    tracing::info!(path = %result_file.display(), "result file written");

    let output = render(&report, format)?;
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    Ok(())
}

/// Render the report in the requested format.
fn render(report: &Report, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => generate_csv_report(report),
        OutputFormat::Human => generate_human_report(report),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with_filter(filter: &str) -> Cli {
        Cli::parse_from(["accessbench", filter])
    }

    #[test]
    fn default_filter_selects_every_strategy() {
        let strategies = filter_strategies(&cli_with_filter(".*")).unwrap();
        assert_eq!(strategies.len(), StrategyKind::ALL.len());
    }

    #[test]
    fn filter_narrows_by_regex() {
        let strategies = filter_strategies(&cli_with_filter("reflective-field.*")).unwrap();
        assert_eq!(
            strategies,
            vec![
                StrategyKind::ReflectiveFieldUncached,
                StrategyKind::ReflectiveFieldCached,
            ]
        );
    }

    #[test]
    fn invalid_filter_is_rejected() {
        assert!(filter_strategies(&cli_with_filter("([")).is_err());
    }

    #[test]
    fn cli_overrides_config_values() {
        let cli = Cli::parse_from([
            "accessbench",
            "--warmup",
            "1",
            "--measurement",
            "2",
            "--iteration-time",
            "250ms",
            "--threads",
            "8",
        ]);
        let run = build_run_config(&cli, &BenchConfig::default()).unwrap();
        assert_eq!(run.warmup_iterations, 1);
        assert_eq!(run.measurement_iterations, 2);
        assert_eq!(run.iteration_duration, Duration::from_millis(250));
        assert_eq!(run.threads, 8);
    }

    #[test]
    fn format_from_config_applies_when_cli_is_silent() {
        let cli = Cli::parse_from(["accessbench"]);
        let mut config = BenchConfig::default();
        config.output.format = "csv".to_string();
        assert_eq!(resolve_format(&cli, &config).unwrap(), OutputFormat::Csv);

        let cli = Cli::parse_from(["accessbench", "--format", "json"]);
        assert_eq!(resolve_format(&cli, &config).unwrap(), OutputFormat::Json);
    }

    #[test]
    fn dry_run_lists_with_and_without_the_run_subcommand() {
        assert!(lists_only(&Cli::parse_from(["accessbench", "--dry-run"])));
        assert!(lists_only(&Cli::parse_from(["accessbench", "run", "--dry-run"])));
        assert!(lists_only(&Cli::parse_from(["accessbench", "list"])));
        assert!(!lists_only(&Cli::parse_from(["accessbench", "run"])));
        assert!(!lists_only(&Cli::parse_from(["accessbench"])));
    }

    #[test]
    fn config_values_apply_when_cli_is_silent() {
        let cli = Cli::parse_from(["accessbench"]);
        let mut config = BenchConfig::default();
        config.runner.threads = 6;
        config.runner.iteration_time = "1s".to_string();
        let run = build_run_config(&cli, &config).unwrap();
        assert_eq!(run.threads, 6);
        assert_eq!(run.iteration_duration, Duration::from_secs(1));
        assert_eq!(run.warmup_iterations, 4);
    }
}
