//! Strategy execution with progress reporting.

use accessbench_core::{
    BindingCache, ExecutionEngine, RunConfig, StrategyKind, StrategyMeasurement,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Execute strategies and produce raw measurements.
pub struct Executor {
    engine: ExecutionEngine,
}

impl Executor {
    /// Build an executor; the run configuration is validated here.
    pub fn new(config: RunConfig) -> anyhow::Result<Self> {
        Ok(Self {
            engine: ExecutionEngine::new(config)?,
        })
    }

    /// Handle for aborting the current run between iterations.
    pub fn abort_handle(&self) -> accessbench_core::AbortHandle {
        self.engine.abort_handle()
    }

    /// Execute all selected strategies in order.
    ///
    /// Every binding is resolved up front, so a missing member fails the whole
    /// run before any strategy is measured.
    pub fn execute(
        &mut self,
        strategies: &[StrategyKind],
    ) -> anyhow::Result<Vec<StrategyMeasurement>> {
        let cache = BindingCache::resolve(&self.engine.config().names)?;

        let pb = ProgressBar::new(strategies.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut measurements = Vec::with_capacity(strategies.len());
        for &strategy in strategies {
            pb.set_message(strategy.id().to_string());
            let start = Instant::now();
            let measurement = self.engine.run(strategy, &cache)?;
            tracing::info!(
                strategy = strategy.id(),
                operations = measurement.total_operations(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "strategy measured"
            );
            measurements.push(measurement);
            pb.inc(1);
        }

        pb.finish_with_message("Complete");
        Ok(measurements)
    }
}
