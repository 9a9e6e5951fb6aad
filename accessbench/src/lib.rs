#![warn(missing_docs)]
//! # Accessbench
//!
//! Multi-threaded throughput harness comparing functionally equivalent field
//! accessor strategies on a mutable two-field record:
//! - **Closed strategy set**: direct calls, per-call and cached reflective
//!   field and setter lookups, generic field handles, typed setter handles
//!   (bound and unbound), and a once-synthesized specialized closure
//! - **Identical semantics**: every strategy performs the same two-field
//!   overwrite and leaves a fresh record in the same final state
//! - **Fair measurement**: barrier-released worker threads, fixed wall-clock
//!   iterations, warm-up discarded, per-operation result sinking
//! - **Throughput reporting**: mean score with standard-error bound, in a
//!   configurable time unit, as JSON, CSV, or a human-readable table
//!
//! ## Quick Start
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     accessbench::run()
//! }
//! ```
//!
//! Run a subset by regex and shorten the iterations:
//!
//! ```text
//! accessbench 'reflective-.*' --iteration-time 500ms --threads 4
//! ```

// Re-export core types
pub use accessbench_core::{
    AbortHandle, Accessor, Applier, BindingCache, ConfigError, ExecutionEngine, HarnessError,
    MeasurementSample, MemberNames, Phase, ResolutionError, RunConfig, Sink, StrategyKind,
    StrategyMeasurement, TargetRecord,
};

// Re-export stats
pub use accessbench_stats::{Summary, compute_summary, ops_per_second};

// Re-export report types
pub use accessbench_report::{
    IterationRecord, OutputFormat, Report, TimeUnit, build_report, generate_csv_report,
    generate_human_report, generate_json_report,
};

// Re-export the CLI entry points
pub use accessbench_cli::{BenchConfig, Cli, Executor, run, run_with_cli};
