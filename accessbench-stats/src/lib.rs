#![warn(missing_docs)]
//! Accessbench Statistics
//!
//! Turns per-iteration measurement samples into throughput scores:
//! - Per-sample throughput (operations per second of wall-clock time)
//! - Summary statistics (mean, sample standard deviation, standard error)
//!
//! With the typical handful of iterations per run, the standard error of the
//! mean is the reported error bound.

mod summary;
mod throughput;

pub use summary::{Summary, compute_summary};
pub use throughput::ops_per_second;
