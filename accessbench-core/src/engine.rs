//! The execution engine: warm-up/measurement iteration protocol over
//! concurrent worker threads.
//!
//! Each run walks `Idle → WarmingUp → Measuring → Done`. An iteration spawns
//! one scoped worker per configured thread slot, releases them together
//! through a barrier, lets them apply the strategy in a tight loop for the
//! configured wall-clock duration, then raises a stop flag and collects each
//! worker's operation count over a channel. A worker that fails to report
//! within the grace period is a fatal harness error.

use crate::cache::BindingCache;
use crate::error::{ConfigError, HarnessError, ResolutionError};
use crate::sink::Sink;
use crate::strategy::{Accessor, MemberNames, StrategyKind};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Barrier, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Run parameters, validated at engine construction.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Warm-up iterations, discarded.
    pub warmup_iterations: u32,
    /// Measurement iterations; each produces one sample.
    pub measurement_iterations: u32,
    /// Wall-clock duration of each iteration.
    pub iteration_duration: Duration,
    /// Concurrent worker threads per iteration.
    pub threads: usize,
    /// How long past the stop signal a worker may take to report before the
    /// run is declared dead.
    pub grace_period: Duration,
    /// Text payload written by every operation.
    pub payload_text: String,
    /// Integer payload written by every operation.
    pub payload_number: i64,
    /// Member names the strategies resolve against.
    pub names: MemberNames,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 4,
            measurement_iterations: 4,
            iteration_duration: Duration::from_secs(5),
            threads: 2,
            grace_period: Duration::from_secs(5),
            payload_text: "Hello World!".to_string(),
            payload_number: 10_000,
            names: MemberNames::default(),
        }
    }
}

impl RunConfig {
    /// Reject parameters a measurement cannot be run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.measurement_iterations == 0 {
            return Err(ConfigError::ZeroMeasurementIterations);
        }
        if self.iteration_duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.grace_period.is_zero() {
            return Err(ConfigError::ZeroGracePeriod);
        }
        Ok(())
    }
}

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run started yet.
    Idle,
    /// Discarded warm-up iterations in progress.
    WarmingUp,
    /// Measurement iterations in progress.
    Measuring,
    /// Last run completed.
    Done,
}

/// One measurement iteration's result: operations summed across workers and
/// the longest worker's elapsed wall-clock time. Immutable once produced.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementSample {
    /// Completed operations across all workers.
    pub operations: u64,
    /// Wall-clock time the iteration's slowest worker spent in its loop.
    pub elapsed: Duration,
}

/// All samples from one run of one strategy at one thread count.
#[derive(Debug, Clone)]
pub struct StrategyMeasurement {
    /// Strategy that was measured.
    pub strategy: StrategyKind,
    /// Worker threads per iteration.
    pub threads: usize,
    /// One sample per measurement iteration.
    pub samples: Vec<MeasurementSample>,
}

impl StrategyMeasurement {
    /// Total operations across all measurement iterations.
    pub fn total_operations(&self) -> u64 {
        self.samples.iter().map(|s| s.operations).sum()
    }
}

/// Signals a running engine to stop after its current iteration.
#[derive(Debug, Clone)]
pub struct AbortHandle(Arc<AtomicBool>);

impl AbortHandle {
    /// Request an abort. Takes effect at the next iteration boundary; the
    /// aborted run's samples are discarded.
    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether an abort has been requested.
    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Runs the warm-up/measurement protocol for one strategy at a time.
#[derive(Debug)]
pub struct ExecutionEngine {
    config: RunConfig,
    // The reflective argument paths downcast `&'static str`, so the payload
    // must outlive every borrow of it; interned once per distinct value.
    payload_text: &'static str,
    phase: Phase,
    cancel: Arc<AtomicBool>,
}

impl ExecutionEngine {
    /// Validate the configuration and build an engine.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let payload_text = intern_payload(&config.payload_text);
        Ok(Self {
            config,
            payload_text,
            phase: Phase::Idle,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Current lifecycle state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The validated run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Handle for aborting the run between iterations.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle(Arc::clone(&self.cancel))
    }

    /// Run one strategy: warm-up iterations (discarded), then measurement
    /// iterations, each yielding one sample.
    pub fn run(
        &mut self,
        kind: StrategyKind,
        cache: &BindingCache,
    ) -> Result<StrategyMeasurement, HarnessError> {
        let accessor = Accessor::bind(kind, cache, &self.config.names);

        self.phase = Phase::WarmingUp;
        for _ in 0..self.config.warmup_iterations {
            self.checkpoint()?;
            self.run_iteration(&accessor)?;
        }

        self.phase = Phase::Measuring;
        let mut samples = Vec::with_capacity(self.config.measurement_iterations as usize);
        for _ in 0..self.config.measurement_iterations {
            self.checkpoint()?;
            samples.push(self.run_iteration(&accessor)?);
        }

        self.phase = Phase::Done;
        Ok(StrategyMeasurement {
            strategy: kind,
            threads: self.config.threads,
            samples,
        })
    }

    /// Abort check, hit only at iteration boundaries.
    fn checkpoint(&self) -> Result<(), HarnessError> {
        if self.cancel.load(Ordering::Relaxed) {
            return Err(HarnessError::Aborted);
        }
        Ok(())
    }

    /// One fixed-duration iteration across all worker threads.
    fn run_iteration(&self, accessor: &Accessor) -> Result<MeasurementSample, HarnessError> {
        let threads = self.config.threads;
        let stop = AtomicBool::new(false);
        let barrier = Barrier::new(threads + 1);
        let (report_tx, report_rx) = mpsc::channel::<(usize, WorkerReport)>();
        let text = self.payload_text;
        let number = self.config.payload_number;

        thread::scope(|scope| {
            for worker in 0..threads {
                let report_tx = report_tx.clone();
                let stop = &stop;
                let barrier = &barrier;
                scope.spawn(move || {
                    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                        // One record per worker, reused across the operations
                        // of this iteration only.
                        let mut applier = accessor.begin_iteration();
                        let mut sink = Sink::new();
                        barrier.wait();
                        let started = Instant::now();
                        while !stop.load(Ordering::Relaxed) {
                            if let Err(err) = applier.apply(text, number) {
                                return WorkerReport::Failed(err);
                            }
                            sink.consume(applier.record());
                        }
                        WorkerReport::Finished {
                            operations: sink.consumed(),
                            elapsed: started.elapsed(),
                        }
                    }));
                    let report = outcome.unwrap_or_else(|panic| {
                        WorkerReport::Panicked(panic_message(panic))
                    });
                    let _ = report_tx.send((worker, report));
                });
            }
            drop(report_tx);

            // Timekeeping happens here, not in the workers: the engine sleeps
            // the iteration out and flips the stop flag, so the hot loop pays
            // one relaxed load per operation regardless of strategy.
            barrier.wait();
            thread::sleep(self.config.iteration_duration);
            stop.store(true, Ordering::Relaxed);

            let deadline = Instant::now() + self.config.grace_period;
            let mut operations = 0u64;
            let mut elapsed = Duration::ZERO;
            for reported in 0..threads {
                let wait = deadline.saturating_duration_since(Instant::now());
                match report_rx.recv_timeout(wait) {
                    Ok((_, WorkerReport::Finished { operations: ops, elapsed: worker_elapsed })) => {
                        operations += ops;
                        elapsed = elapsed.max(worker_elapsed);
                    }
                    Ok((_, WorkerReport::Failed(err))) => return Err(HarnessError::Resolution(err)),
                    Ok((worker, WorkerReport::Panicked(message))) => {
                        return Err(HarnessError::WorkerPanic { worker, message })
                    }
                    Err(_) => {
                        return Err(HarnessError::Timeout {
                            reported,
                            expected: threads,
                            waited: self.config.grace_period,
                        })
                    }
                }
            }
            Ok(MeasurementSample { operations, elapsed })
        })
    }
}

/// Leak a payload text, reusing an earlier leak for the same value. Leaked
/// memory stays bounded by the number of distinct payloads, not the number
/// of engines constructed.
fn intern_payload(text: &str) -> &'static str {
    static INTERNED: Mutex<Vec<&'static str>> = Mutex::new(Vec::new());
    let mut interned = INTERNED.lock().unwrap_or_else(PoisonError::into_inner);
    match interned.iter().find(|s| **s == text) {
        Some(existing) => existing,
        None => {
            let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
            interned.push(leaked);
            leaked
        }
    }
}

enum WorkerReport {
    Finished { operations: u64, elapsed: Duration },
    Failed(ResolutionError),
    Panicked(String),
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
