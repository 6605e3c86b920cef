//! Dependency ordering: topological sort with explicit cycle reporting.
//!
//! The contract: every block appears exactly once in the returned order,
//! and for every connection the source precedes the target. When a cycle
//! makes that impossible, [`sort`] says so with a [`CycleError`] naming
//! the cycle path; [`sorted_or_authored`] is the documented fallback that
//! degrades to authored order instead of failing, for callers that must
//! evaluate something every tick.

use crate::index::index_by_id;
use weft_core::{Block, Connection, CycleError};

const WHITE: u8 = 0;
const GREY: u8 = 1;
const BLACK: u8 = 2;

/// Topologically sort a tick's blocks.
///
/// Returns positions into `blocks` such that for every connection whose
/// endpoints both resolve, the source position precedes the target
/// position. Traversal is depth-first in authored order, so the result is
/// deterministic for a given sheet. Connections referencing missing
/// blocks are ignored here (the tick executor counts them separately).
///
/// # Errors
///
/// [`CycleError`] when the graph contains a dependency cycle; the error
/// carries the blocks on the cycle path in traversal order.
pub fn sort(blocks: &[Block], connections: &[Connection]) -> Result<Vec<usize>, CycleError> {
    let index = index_by_id(blocks);
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); blocks.len()];
    for conn in connections {
        if let (Some(&s), Some(&t)) = (
            index.get(conn.source.as_str()),
            index.get(conn.target.as_str()),
        ) {
            adjacency[s].push(t);
        }
    }

    let mut color = vec![WHITE; blocks.len()];
    let mut postorder = Vec::with_capacity(blocks.len());

    for root in 0..blocks.len() {
        if color[root] != WHITE {
            continue;
        }
        color[root] = GREY;
        // Explicit stack of (node, next-child cursor): authored sheets can
        // chain hundreds of blocks and recursion depth tracks chain length.
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        loop {
            let Some(frame) = stack.last_mut() else { break };
            let node = frame.0;
            if frame.1 < adjacency[node].len() {
                let child = adjacency[node][frame.1];
                frame.1 += 1;
                match color[child] {
                    WHITE => {
                        color[child] = GREY;
                        stack.push((child, 0));
                    }
                    GREY => {
                        // Grey child is on the current stack: the slice
                        // from its frame to the top is the cycle.
                        let pos = stack
                            .iter()
                            .position(|&(n, _)| n == child)
                            .expect("grey node is on the traversal stack");
                        let cycle = stack[pos..]
                            .iter()
                            .map(|&(n, _)| blocks[n].id.clone())
                            .collect();
                        return Err(CycleError { cycle });
                    }
                    _ => {}
                }
            } else {
                color[node] = BLACK;
                postorder.push(node);
                stack.pop();
            }
        }
    }

    postorder.reverse();
    Ok(postorder)
}

/// Sort, or fall back to authored order when the graph has a cycle.
///
/// The fallback order is best-effort: downstream blocks may read
/// last-tick (or default) values of upstream blocks that happen to be
/// authored later. The diagnostic is returned alongside so callers can
/// surface it rather than silently degrading.
pub fn sorted_or_authored(
    blocks: &[Block],
    connections: &[Connection],
) -> (Vec<usize>, Option<CycleError>) {
    match sort(blocks, connections) {
        Ok(order) => (order, None),
        Err(cycle) => ((0..blocks.len()).collect(), Some(cycle)),
    }
}
