//! Per-tick performance and diagnostic metrics.

/// Timing and bookkeeping data for a single tick.
///
/// Durations are in microseconds. The tick executor fills these after
/// each tick; the most recent copy is queryable from the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick.
    pub total_us: u64,
    /// Time spent deriving the evaluation order.
    pub sort_us: u64,
    /// Time spent resolving inputs and running evaluators.
    pub eval_us: u64,
    /// Number of blocks evaluated this tick.
    pub blocks_evaluated: u32,
    /// Number of host-visible updates emitted this tick.
    pub updates_emitted: u32,
    /// Commands applied at the tick boundary.
    pub commands_applied: u32,
    /// Commands dropped (unknown target, wrong block kind).
    pub commands_rejected: u32,
    /// Connections skipped because an endpoint was missing.
    pub dangling_connections: u32,
    /// Whether this tick ran in authored order due to a cycle.
    pub cycle_fallback: bool,
}
