//! Sink blocks: display and logger. No outputs, only recorded state.

use crate::state::BlockState;
use crate::{EvalContext, Outcome};
use smallvec::smallvec;
use weft_core::{BlockId, BlockUpdate, LoggerParams, ResolvedInputs, Sample};

/// Evaluate a display sink: record the resolved input and whether a
/// producer feeds it, and emit the pair for the host.
pub fn eval_display(id: &BlockId, inputs: &ResolvedInputs, state: &mut BlockState) -> Outcome {
    let value = inputs.first();
    let connected = inputs.any_connected();

    let record = state.display_mut();
    record.value = Some(value);
    record.connected = connected;

    Outcome {
        output: None,
        updates: smallvec![BlockUpdate::Display {
            id: id.clone(),
            value,
            connected,
        }],
    }
}

/// Evaluate a logger sink: when recording, append a `{time, value}`
/// sample to the bounded buffer and emit it.
///
/// The cap is read from the parameters every tick; samples beyond it
/// evict the oldest entries. A cap of 0 retains (and emits) nothing.
pub fn eval_logger(
    id: &BlockId,
    params: &LoggerParams,
    inputs: &ResolvedInputs,
    state: &mut BlockState,
    ctx: &EvalContext,
) -> Outcome {
    if !params.recording || params.max_entries == 0 {
        return Outcome::none();
    }

    let sample = Sample {
        time: ctx.time,
        value: inputs.first(),
    };
    state.log_mut().push(sample, params.max_entries);

    Outcome {
        output: None,
        updates: smallvec![BlockUpdate::LogSample {
            id: id.clone(),
            sample,
        }],
    }
}
