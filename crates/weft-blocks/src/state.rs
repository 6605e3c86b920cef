//! Per-block internal state records.
//!
//! Everything a block remembers between ticks lives here as plain data:
//! filter memory, bounded sample buffers, external-input latches, display
//! records. The engine stores one [`BlockState`] per interned block slot,
//! so state is snapshot-able and resettable like any other value — none
//! of it hides in closures or control flow.

use weft_core::{BlockKind, Sample, SourceMode};
use std::collections::VecDeque;

/// Internal state for one block slot.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockState {
    /// The block keeps no memory (arithmetic, constant/signal sources,
    /// subsystems).
    Stateless,
    /// Shift-register memory of a linear dynamic element.
    Transfer(TransferState),
    /// A logger's bounded sample buffer.
    Log(BoundedBuffer),
    /// An output port's bounded export history.
    History(BoundedBuffer),
    /// The latch of an external-variable source.
    External {
        /// Last host-supplied value, if any.
        value: Option<f64>,
    },
    /// A display sink's recorded value.
    Display(DisplayRecord),
}

impl BlockState {
    /// The initial state for a block of the given kind.
    pub fn initial_for(kind: &BlockKind) -> Self {
        match kind {
            BlockKind::TransferFn(params) => Self::Transfer(TransferState::new(params.order())),
            BlockKind::Logger(_) => Self::Log(BoundedBuffer::new()),
            BlockKind::OutputPort(_) => Self::History(BoundedBuffer::new()),
            BlockKind::Source(params) => match params.mode {
                SourceMode::External { .. } => Self::External { value: None },
                _ => Self::Stateless,
            },
            BlockKind::Display => Self::Display(DisplayRecord::default()),
            BlockKind::Sum(_) | BlockKind::Multiply(_) | BlockKind::Subsystem(_) => Self::Stateless,
        }
    }

    /// The transfer rings, coercing shape and order as needed.
    ///
    /// Replaces a mismatched variant (the host retyped the block) and
    /// re-zeros the rings when the configured order changed.
    pub fn transfer_mut(&mut self, order: usize) -> &mut TransferState {
        if !matches!(self, Self::Transfer(_)) {
            *self = Self::Transfer(TransferState::new(order));
        }
        let Self::Transfer(state) = self else {
            unreachable!()
        };
        state.ensure_order(order);
        state
    }

    /// The logger buffer, coercing shape as needed.
    pub fn log_mut(&mut self) -> &mut BoundedBuffer {
        if !matches!(self, Self::Log(_)) {
            *self = Self::Log(BoundedBuffer::new());
        }
        let Self::Log(buffer) = self else {
            unreachable!()
        };
        buffer
    }

    /// The export history, coercing shape as needed.
    pub fn history_mut(&mut self) -> &mut BoundedBuffer {
        if !matches!(self, Self::History(_)) {
            *self = Self::History(BoundedBuffer::new());
        }
        let Self::History(buffer) = self else {
            unreachable!()
        };
        buffer
    }

    /// The external latch, coercing shape as needed.
    pub fn external_mut(&mut self) -> &mut Option<f64> {
        if !matches!(self, Self::External { .. }) {
            *self = Self::External { value: None };
        }
        let Self::External { value } = self else {
            unreachable!()
        };
        value
    }

    /// The display record, coercing shape as needed.
    pub fn display_mut(&mut self) -> &mut DisplayRecord {
        if !matches!(self, Self::Display(_)) {
            *self = Self::Display(DisplayRecord::default());
        }
        let Self::Display(record) = self else {
            unreachable!()
        };
        record
    }

    /// The logger buffer, if this is logger state.
    pub fn log(&self) -> Option<&BoundedBuffer> {
        match self {
            Self::Log(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// The export history, if this is output-port state.
    pub fn history(&self) -> Option<&BoundedBuffer> {
        match self {
            Self::History(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// The display record, if this is display state.
    pub fn display(&self) -> Option<&DisplayRecord> {
        match self {
            Self::Display(record) => Some(record),
            _ => None,
        }
    }
}

// ── TransferState ────────────────────────────────────────────────

/// Shift registers for a linear dynamic element: the previous `order`
/// inputs and outputs, most-recent-first.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferState {
    /// Previous inputs: `inputs[0]` is x[t−1].
    pub inputs: Vec<f64>,
    /// Previous outputs: `outputs[0]` is y[t−1].
    pub outputs: Vec<f64>,
}

impl TransferState {
    /// Zeroed rings for a system of the given order.
    pub fn new(order: usize) -> Self {
        Self {
            inputs: vec![0.0; order],
            outputs: vec![0.0; order],
        }
    }

    /// Re-zero the rings if the configured order changed between ticks.
    pub fn ensure_order(&mut self, order: usize) {
        if self.inputs.len() != order {
            self.inputs = vec![0.0; order];
            self.outputs = vec![0.0; order];
        }
    }

    /// Shift the rings after a tick: the new input/output become
    /// most-recent, the oldest entries fall off.
    pub fn shift(&mut self, input: f64, output: f64) {
        if self.inputs.is_empty() {
            return;
        }
        self.inputs.rotate_right(1);
        self.inputs[0] = input;
        self.outputs.rotate_right(1);
        self.outputs[0] = output;
    }
}

// ── BoundedBuffer ────────────────────────────────────────────────

/// A FIFO of `{time, value}` samples with an eviction cap applied at
/// append time (the cap is a block parameter and may change per tick).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundedBuffer {
    samples: VecDeque<Sample>,
}

impl BoundedBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample, evicting oldest entries beyond `cap`.
    ///
    /// A cap of 0 empties the buffer and retains nothing.
    pub fn push(&mut self, sample: Sample, cap: usize) {
        if cap == 0 {
            self.samples.clear();
            return;
        }
        self.samples.push_back(sample);
        while self.samples.len() > cap {
            self.samples.pop_front();
        }
    }

    /// The retained samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// The retained samples as a vector, oldest first.
    pub fn to_vec(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Number of retained samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drop all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

// ── DisplayRecord ────────────────────────────────────────────────

/// What a display sink recorded this tick, for host queries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayRecord {
    /// The resolved input value, once something has been displayed.
    pub value: Option<f64>,
    /// Whether an upstream producer is wired in.
    pub connected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::{LoggerParams, SourceParams, TransferFnParams};

    #[test]
    fn initial_state_matches_kind() {
        let tf = BlockKind::TransferFn(TransferFnParams::parse("1", "1,1").unwrap());
        assert_eq!(
            BlockState::initial_for(&tf),
            BlockState::Transfer(TransferState::new(1))
        );
        assert_eq!(
            BlockState::initial_for(&BlockKind::Logger(LoggerParams::default())),
            BlockState::Log(BoundedBuffer::new())
        );
        assert_eq!(
            BlockState::initial_for(&BlockKind::Source(SourceParams::external(2.0))),
            BlockState::External { value: None }
        );
        assert_eq!(
            BlockState::initial_for(&BlockKind::Source(SourceParams::constant(2.0))),
            BlockState::Stateless
        );
    }

    #[test]
    fn transfer_shift_is_most_recent_first() {
        let mut state = TransferState::new(2);
        state.shift(1.0, 10.0);
        state.shift(2.0, 20.0);
        assert_eq!(state.inputs, vec![2.0, 1.0]);
        assert_eq!(state.outputs, vec![20.0, 10.0]);
        state.shift(3.0, 30.0);
        assert_eq!(state.inputs, vec![3.0, 2.0]);
        assert_eq!(state.outputs, vec![30.0, 20.0]);
    }

    #[test]
    fn transfer_order_change_rezeros() {
        let mut state = BlockState::Transfer(TransferState::new(1));
        state.transfer_mut(1).shift(5.0, 6.0);
        let rings = state.transfer_mut(3);
        assert_eq!(rings.inputs, vec![0.0; 3]);
        assert_eq!(rings.outputs, vec![0.0; 3]);
    }

    #[test]
    fn coercion_replaces_mismatched_variant() {
        let mut state = BlockState::Stateless;
        state.log_mut().push(
            Sample {
                time: 0.1,
                value: 1.0,
            },
            10,
        );
        assert_eq!(state.log().unwrap().len(), 1);
    }

    #[test]
    fn bounded_buffer_evicts_oldest() {
        let mut buffer = BoundedBuffer::new();
        for i in 0..5 {
            buffer.push(
                Sample {
                    time: i as f64,
                    value: i as f64 * 10.0,
                },
                3,
            );
        }
        assert_eq!(buffer.len(), 3);
        let times: Vec<f64> = buffer.samples().map(|s| s.time).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_cap_retains_nothing() {
        let mut buffer = BoundedBuffer::new();
        buffer.push(
            Sample {
                time: 0.0,
                value: 1.0,
            },
            0,
        );
        assert!(buffer.is_empty());
    }
}
