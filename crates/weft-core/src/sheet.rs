//! Sheets: the unit of evaluation.

use crate::block::Block;
use crate::connection::Connection;
use crate::error::SheetError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One self-contained graph of blocks and connections, evaluated together
/// in a single pass.
///
/// The host owns sheets and may edit them between ticks; the engine treats
/// each tick's sheet as a read-only snapshot and re-derives ordering and
/// routing from it every time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// The blocks, in authored order.
    pub blocks: Vec<Block>,
    /// The wires, in authored order. Where several wires target the same
    /// handle, the last-authored one wins at resolution time.
    pub connections: Vec<Connection>,
}

impl Sheet {
    /// A sheet from parts.
    pub fn new(blocks: Vec<Block>, connections: Vec<Connection>) -> Self {
        Self {
            blocks,
            connections,
        }
    }

    /// Check structural invariants: block ids are unique and every
    /// connection endpoint references a block in this sheet.
    ///
    /// The tick executor itself tolerates violations (dangling wires are
    /// skipped and counted); this is the strict, host-facing check.
    ///
    /// # Errors
    ///
    /// The first violation found, as a [`SheetError`].
    pub fn validate(&self) -> Result<(), SheetError> {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            if !seen.insert(block.id.as_str()) {
                return Err(SheetError::DuplicateBlockId {
                    id: block.id.clone(),
                });
            }
        }
        for (index, conn) in self.connections.iter().enumerate() {
            if !seen.contains(conn.source.as_str()) {
                return Err(SheetError::DanglingConnection {
                    index,
                    endpoint: conn.source.clone(),
                });
            }
            if !seen.contains(conn.target.as_str()) {
                return Err(SheetError::DanglingConnection {
                    index,
                    endpoint: conn.target.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, SourceParams};

    fn source(id: &str) -> Block {
        Block::new(id, BlockKind::Source(SourceParams::constant(1.0)))
    }

    #[test]
    fn valid_sheet_passes() {
        let sheet = Sheet::new(
            vec![source("a"), Block::new("d", BlockKind::Display)],
            vec![Connection::new("a", "d", "in")],
        );
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn duplicate_id_rejected() {
        let sheet = Sheet::new(vec![source("a"), source("a")], vec![]);
        assert!(matches!(
            sheet.validate(),
            Err(SheetError::DuplicateBlockId { .. })
        ));
    }

    #[test]
    fn dangling_target_rejected() {
        let sheet = Sheet::new(vec![source("a")], vec![Connection::new("a", "ghost", "in")]);
        match sheet.validate() {
            Err(SheetError::DanglingConnection { index, endpoint }) => {
                assert_eq!(index, 0);
                assert_eq!(endpoint.as_str(), "ghost");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn sheet_round_trips_as_json() {
        let sheet = Sheet::new(
            vec![source("a"), Block::new("d", BlockKind::Display)],
            vec![Connection::new("a", "d", "in")],
        );
        let json = serde_json::to_string(&sheet).unwrap();
        let back: Sheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }
}
