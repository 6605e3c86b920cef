//! The simulation state store: a dense slot arena keyed by block id.
//!
//! External ids are interned into [`BlockSlot`]s through an `IndexMap`
//! side table. A slot, once assigned, is stable for the rest of the
//! session: host edits to the topology between ticks add slots but never
//! move them, so filter memory and sample buffers survive re-wiring.
//! Per-tick lookups are then plain bounds-checked vector indexing instead
//! of repeated string hashing.

use indexmap::IndexMap;
use weft_blocks::BlockState;
use weft_core::{BlockId, BlockKind, BlockSlot};

/// Dense per-block storage for internal state and last published outputs.
#[derive(Debug, Default)]
pub struct StateArena {
    index: IndexMap<BlockId, BlockSlot>,
    states: Vec<BlockState>,
    outputs: Vec<Option<f64>>,
}

impl StateArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the slot for `id`, interning it with an initial state for
    /// `kind` on first sight.
    pub fn intern(&mut self, id: &BlockId, kind: &BlockKind) -> BlockSlot {
        if let Some(&slot) = self.index.get(id) {
            return slot;
        }
        let slot = BlockSlot(self.states.len() as u32);
        self.index.insert(id.clone(), slot);
        self.states.push(BlockState::initial_for(kind));
        self.outputs.push(None);
        slot
    }

    /// The slot for `id`, if it has been interned.
    pub fn slot(&self, id: &BlockId) -> Option<BlockSlot> {
        self.index.get(id).copied()
    }

    /// Immutable state access.
    pub fn state(&self, slot: BlockSlot) -> &BlockState {
        &self.states[slot.index()]
    }

    /// Mutable state access for the tick executor.
    pub fn state_mut(&mut self, slot: BlockSlot) -> &mut BlockState {
        &mut self.states[slot.index()]
    }

    /// Record the output a block published this tick (`None` for sinks).
    pub fn set_output(&mut self, slot: BlockSlot, value: Option<f64>) {
        self.outputs[slot.index()] = value;
    }

    /// The output most recently published for `slot`.
    pub fn output(&self, slot: BlockSlot) -> Option<f64> {
        self.outputs[slot.index()]
    }

    /// Number of interned blocks.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena has no interned blocks.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every slot, state, and output. Ids interned afterwards start
    /// from slot 0 again.
    pub fn clear(&mut self) {
        self.index.clear();
        self.states.clear();
        self.outputs.clear();
    }
}
