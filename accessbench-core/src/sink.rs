//! Dead-code-elimination guard.

use crate::record::TargetRecord;

/// Consumes each mutated record so the optimizer cannot prove an operation
/// side-effect-free and elide it.
///
/// The counter doubles as the per-worker operation count: a worker reports
/// `consumed()` as its operations, so "sunk exactly once per operation" holds
/// by construction. No I/O, no synchronization, identical cost for every
/// strategy.
#[derive(Debug, Default)]
pub struct Sink {
    consumed: u64,
}

impl Sink {
    /// Create a sink with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one operation's result.
    #[inline(always)]
    pub fn consume(&mut self, record: &TargetRecord) {
        std::hint::black_box(record);
        self.consumed += 1;
    }

    /// Number of operations consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}
