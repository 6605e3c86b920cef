//! Resolved per-handle input values, as handed to block evaluators.

use smallvec::SmallVec;

/// Input values for one block, one entry per input handle.
///
/// Produced by the signal resolver each tick and consumed by the block
/// evaluators. `SmallVec<[_; 4]>` keeps the common arities (1–4 handles)
/// off the heap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedInputs {
    /// Input values, slot 0 first. Unconnected handles hold 0.0.
    pub values: SmallVec<[f64; 4]>,
    /// Whether each handle has a producer wired to it.
    pub connected: SmallVec<[bool; 4]>,
}

impl ResolvedInputs {
    /// Inputs for a block with `arity` handles, all unconnected.
    pub fn unconnected(arity: usize) -> Self {
        Self {
            values: SmallVec::from_elem(0.0, arity),
            connected: SmallVec::from_elem(false, arity),
        }
    }

    /// Test helper: all handles connected with the given values.
    pub fn from_values(values: &[f64]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
            connected: SmallVec::from_elem(true, values.len()),
        }
    }

    /// Value at `slot`, or 0.0 beyond the block's arity.
    pub fn value(&self, slot: usize) -> f64 {
        self.values.get(slot).copied().unwrap_or(0.0)
    }

    /// The first input value (slot 0).
    pub fn first(&self) -> f64 {
        self.value(0)
    }

    /// Whether any handle has a producer.
    pub fn any_connected(&self) -> bool {
        self.connected.iter().any(|&c| c)
    }
}
