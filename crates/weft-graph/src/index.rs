//! Per-tick id lookup table.

use indexmap::IndexMap;
use weft_core::Block;

/// Build an id → position table for a tick's block slice.
///
/// Positions are indices into the authored `blocks` slice. When the host
/// supplies duplicate ids (a structural error the tick executor tolerates)
/// the first occurrence wins, matching `IndexMap` insertion semantics.
pub fn index_by_id(blocks: &[Block]) -> IndexMap<&str, usize> {
    let mut map = IndexMap::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        map.entry(block.id.as_str()).or_insert(i);
    }
    map
}
