//! Error taxonomy for the harness.
//!
//! Everything here is fatal for the run it occurs in: retrying a benchmark
//! after an error would invalidate the statistical isolation between
//! iterations, so there is no retry path anywhere.

use std::time::Duration;
use thiserror::Error;

/// A member binding could not be resolved, or a resolved member rejected its
/// argument. Fatal: a missing strategy invalidates comparability, so the run
/// aborts with zero samples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The target record has no field with this name.
    #[error("target record has no field named `{0}`")]
    UnknownField(String),
    /// The target record has no setter with this name.
    #[error("target record has no setter named `{0}`")]
    UnknownMethod(String),
    /// A resolved member was handed a value of the wrong type.
    #[error("member `{member}` rejected its argument (expected {expected})")]
    ArgumentMismatch {
        /// Member that rejected the argument.
        member: &'static str,
        /// Type the member expected.
        expected: &'static str,
    },
    /// A setter was invoked with the wrong number of arguments.
    #[error("setter `{member}` called with {got} arguments (expected {expected})")]
    ArityMismatch {
        /// Setter that was invoked.
        member: &'static str,
        /// Expected argument count.
        expected: usize,
        /// Actual argument count.
        got: usize,
    },
}

/// Invalid run parameters, rejected at engine construction before any
/// strategy is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Thread count was zero.
    #[error("worker thread count must be at least 1")]
    ZeroThreads,
    /// Measurement iteration count was zero.
    #[error("measurement iteration count must be at least 1")]
    ZeroMeasurementIterations,
    /// Iteration duration was zero.
    #[error("iteration duration must be non-zero")]
    ZeroDuration,
    /// Worker grace period was zero.
    #[error("worker grace period must be non-zero")]
    ZeroGracePeriod,
}

/// Fatal harness failure during a run. The measurement state for the run is
/// discarded, never partially reported.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A binding failed to resolve (at setup for cached strategies, at the
    /// failing call for always-resolve strategies).
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// The run configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A worker thread failed to report at an iteration boundary.
    #[error("{reported} of {expected} workers reported within the {waited:?} grace period")]
    Timeout {
        /// Workers that reported before the deadline.
        reported: usize,
        /// Workers that were expected to report.
        expected: usize,
        /// Grace period that elapsed.
        waited: Duration,
    },
    /// A worker thread panicked mid-iteration.
    #[error("worker thread {worker} panicked: {message}")]
    WorkerPanic {
        /// Index of the panicking worker.
        worker: usize,
        /// Panic payload, if it carried one.
        message: String,
    },
    /// The run was aborted between iterations via its [`AbortHandle`].
    ///
    /// [`AbortHandle`]: crate::AbortHandle
    #[error("run aborted before completion")]
    Aborted,
}
