#![warn(missing_docs)]
//! AccessBench Core - Measurement Engine
//!
//! This crate provides the heart of the harness:
//! - `TargetRecord`, the mutable record every strategy writes to
//! - The reflection registry (`reflect`) for name-based member lookup
//! - `Accessor` strategies, one per member-access mechanism
//! - `BindingCache`, the one-shot resolution of every cached binding
//! - `Sink`, the dead-code-elimination guard
//! - `ExecutionEngine`, the warm-up/measurement iteration protocol

mod cache;
mod engine;
mod error;
mod record;
pub mod reflect;
mod sink;
mod strategy;

pub use cache::BindingCache;
pub use engine::{
    AbortHandle, ExecutionEngine, MeasurementSample, Phase, RunConfig, StrategyMeasurement,
};
pub use error::{ConfigError, HarnessError, ResolutionError};
pub use record::TargetRecord;
pub use sink::Sink;
pub use strategy::{Accessor, Applier, GeneratedApply, MemberNames, StrategyKind};
