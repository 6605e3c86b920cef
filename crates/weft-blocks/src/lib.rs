//! Block evaluators for the Weft simulation kernel.
//!
//! One pure transition function per block type, of the form
//! `(params, inputs, &mut state, context) -> outcome`. Dispatch is an
//! exhaustive match over [`BlockKind`], so every type is handled at
//! compile time — there is no "unknown type" fallback to fall into.
//!
//! Evaluators are total: divide-by-zero is guarded, missing inputs read
//! as 0.0, and a state record of the wrong shape (the host retyped a
//! block between ticks) is replaced with a fresh one. Nothing here
//! returns an error or panics on host data.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arith;
pub mod port;
pub mod sink;
pub mod source;
pub mod state;
pub mod transfer;

pub use state::{BlockState, BoundedBuffer, DisplayRecord, TransferState};

use smallvec::SmallVec;
use weft_core::{Block, BlockKind, BlockUpdate, ResolvedInputs, TickId};

/// Per-tick evaluation context shared by all evaluators.
#[derive(Clone, Copy, Debug)]
pub struct EvalContext {
    /// Simulation time for this tick (the clock has already advanced).
    pub time: f64,
    /// The fixed time-step in seconds.
    pub dt: f64,
    /// The tick being executed.
    pub tick: TickId,
}

/// What one evaluation produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// The value published on `out`, if this block type has an output.
    pub output: Option<f64>,
    /// Host-visible field changes.
    pub updates: SmallVec<[BlockUpdate; 2]>,
}

impl Outcome {
    /// No output, no updates (sinks while disabled, subsystems).
    pub fn none() -> Self {
        Self::default()
    }

    /// An output with no updates.
    pub fn with_output(value: f64) -> Self {
        Self {
            output: Some(value),
            updates: SmallVec::new(),
        }
    }
}

/// Evaluate one block for the current tick.
///
/// `state` is the block's slot in the state arena; evaluators that keep
/// memory mutate it in place. The match is exhaustive over [`BlockKind`].
pub fn evaluate(
    block: &Block,
    inputs: &ResolvedInputs,
    state: &mut BlockState,
    ctx: &EvalContext,
) -> Outcome {
    match &block.kind {
        BlockKind::Sum(params) => arith::eval_sum(params, inputs),
        BlockKind::Multiply(params) => arith::eval_multiply(params, inputs),
        BlockKind::Source(params) => source::eval_source(params, state, ctx),
        BlockKind::TransferFn(params) => transfer::eval_transfer(&block.id, params, inputs, state),
        BlockKind::Display => sink::eval_display(&block.id, inputs, state),
        BlockKind::Logger(params) => sink::eval_logger(&block.id, params, inputs, state, ctx),
        BlockKind::OutputPort(params) => port::eval_output_port(&block.id, params, inputs, state, ctx),
        // Hierarchical execution is deliberately not implemented: a
        // subsystem evaluates to a defined no-op, never a guess.
        BlockKind::Subsystem(_) => Outcome::none(),
    }
}
