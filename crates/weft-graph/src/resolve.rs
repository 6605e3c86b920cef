//! Signal resolution: wiring → per-block input values.
//!
//! For each input handle of a target block, find the connections that
//! terminate there and read the source block's already-published output
//! for the current tick. Unconnected handles — and handles whose source
//! has not produced a value yet, which can only happen under a cycle
//! fallback — default to 0.0.
//!
//! Tie-break: when several connections target the same handle, the
//! **last-registered connection wins**. Connections are scanned in
//! authored order and later matches overwrite earlier ones.

use indexmap::IndexMap;
use weft_core::connection::input_slot;
use weft_core::{Block, Connection, ResolvedInputs};

/// Gather the input values for the block at `target` from this tick's
/// published outputs.
///
/// `outputs` is indexed by authored block position and holds `Some` only
/// for blocks that have already been evaluated this tick. `index` is the
/// id table from [`index_by_id`](crate::index_by_id), shared across the
/// tick. Connections whose endpoints do not resolve, whose source handle
/// is not `out`, or whose target handle does not parse are skipped.
pub fn resolve_inputs(
    target: usize,
    blocks: &[Block],
    connections: &[Connection],
    index: &IndexMap<&str, usize>,
    outputs: &[Option<f64>],
) -> ResolvedInputs {
    let arity = blocks[target].kind.input_arity();
    let target_id = blocks[target].id.as_str();

    let mut resolved = ResolvedInputs::unconnected(arity);

    for conn in connections {
        if conn.target.as_str() != target_id || conn.source_handle != "out" {
            continue;
        }
        let Some(&source) = index.get(conn.source.as_str()) else {
            continue;
        };
        let Some(slot) = input_slot(&conn.target_handle) else {
            continue;
        };
        if slot >= arity {
            continue;
        }
        resolved.connected[slot] = true;
        resolved.values[slot] = outputs.get(source).copied().flatten().unwrap_or(0.0);
    }

    resolved
}

/// Count connections whose endpoints do not both resolve to blocks in the
/// sheet. Reported per tick in the step metrics.
pub fn dangling_connections(connections: &[Connection], index: &IndexMap<&str, usize>) -> usize {
    connections
        .iter()
        .filter(|c| !index.contains_key(c.source.as_str()) || !index.contains_key(c.target.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::index_by_id;
    use weft_core::{ArithOp, BlockKind, SourceParams, SumParams};

    fn sheet_blocks() -> Vec<Block> {
        vec![
            Block::new("s1", BlockKind::Source(SourceParams::constant(3.0))),
            Block::new("s2", BlockKind::Source(SourceParams::constant(4.0))),
            Block::new(
                "sum",
                BlockKind::Sum(SumParams {
                    op: ArithOp::Sum,
                    inputs: 2,
                }),
            ),
            Block::new("disp", BlockKind::Display),
        ]
    }

    fn published(blocks: &[Block]) -> Vec<Option<f64>> {
        // Pretend the sources already ran this tick.
        let mut outputs = vec![None; blocks.len()];
        outputs[0] = Some(3.0);
        outputs[1] = Some(4.0);
        outputs
    }

    #[test]
    fn gathers_per_handle_values() {
        let blocks = sheet_blocks();
        let conns = vec![
            Connection::new("s1", "sum", "in1"),
            Connection::new("s2", "sum", "in2"),
        ];
        let index = index_by_id(&blocks);
        let inputs = resolve_inputs(2, &blocks, &conns, &index, &published(&blocks));
        assert_eq!(inputs.values.as_slice(), &[3.0, 4.0]);
        assert_eq!(inputs.connected.as_slice(), &[true, true]);
    }

    #[test]
    fn unconnected_handles_default_to_zero() {
        let blocks = sheet_blocks();
        let conns = vec![Connection::new("s1", "sum", "in2")];
        let index = index_by_id(&blocks);
        let inputs = resolve_inputs(2, &blocks, &conns, &index, &published(&blocks));
        assert_eq!(inputs.values.as_slice(), &[0.0, 3.0]);
        assert_eq!(inputs.connected.as_slice(), &[false, true]);
    }

    #[test]
    fn unpublished_source_reads_zero_but_counts_as_connected() {
        // Happens only under a cycle fallback: the wire exists but the
        // source has not produced a value yet this tick.
        let blocks = sheet_blocks();
        let conns = vec![Connection::new("sum", "disp", "in")];
        let index = index_by_id(&blocks);
        let inputs = resolve_inputs(3, &blocks, &conns, &index, &published(&blocks));
        assert_eq!(inputs.values.as_slice(), &[0.0]);
        assert_eq!(inputs.connected.as_slice(), &[true]);
    }

    #[test]
    fn last_registered_connection_wins() {
        let blocks = sheet_blocks();
        let conns = vec![
            Connection::new("s1", "disp", "in"),
            Connection::new("s2", "disp", "in"),
        ];
        let index = index_by_id(&blocks);
        let inputs = resolve_inputs(3, &blocks, &conns, &index, &published(&blocks));
        assert_eq!(inputs.values.as_slice(), &[4.0]);
    }

    #[test]
    fn out_of_range_and_unparsable_handles_skipped() {
        let blocks = sheet_blocks();
        let conns = vec![
            Connection::new("s1", "sum", "in9"),
            Connection::new("s2", "sum", "sideport"),
        ];
        let index = index_by_id(&blocks);
        let inputs = resolve_inputs(2, &blocks, &conns, &index, &published(&blocks));
        assert_eq!(inputs.values.as_slice(), &[0.0, 0.0]);
        assert!(!inputs.any_connected());
    }

    #[test]
    fn dangling_count() {
        let blocks = sheet_blocks();
        let conns = vec![
            Connection::new("s1", "sum", "in1"),
            Connection::new("ghost", "sum", "in2"),
            Connection::new("s2", "phantom", "in"),
        ];
        let index = index_by_id(&blocks);
        assert_eq!(dangling_connections(&conns, &index), 2);
    }

    #[test]
    fn single_input_accepts_in_and_in1() {
        let blocks = sheet_blocks();
        let index = index_by_id(&blocks);
        for handle in ["in", "in1"] {
            let conns = vec![Connection::new("s1", "disp", handle)];
            let inputs = resolve_inputs(3, &blocks, &conns, &index, &published(&blocks));
            assert_eq!(inputs.values.as_slice(), &[3.0], "handle {handle}");
        }
    }
}
