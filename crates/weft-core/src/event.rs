//! Host-visible field changes, returned from each tick.
//!
//! The engine never calls back into the host: every tick returns a
//! `Vec<BlockUpdate>` describing the fields that changed, and the host
//! applies them however (and whenever) it likes. One update is emitted
//! per changed field per tick.

use crate::id::BlockId;
use serde::{Deserialize, Serialize};

/// A `{time, value}` pair recorded by loggers and output-port histories.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Simulation time at which the value was recorded.
    pub time: f64,
    /// The recorded value.
    pub value: f64,
}

/// One host-visible field change produced by a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockUpdate {
    /// A display sink's value and whether anything feeds it.
    Display {
        /// The display block.
        id: BlockId,
        /// The resolved input value.
        value: f64,
        /// Whether an upstream producer is wired to the display.
        connected: bool,
    },
    /// An output port's pass-through value.
    PortValue {
        /// The port block.
        id: BlockId,
        /// The value published this tick.
        value: f64,
    },
    /// A sample appended to an output port's export history.
    PortSample {
        /// The port block.
        id: BlockId,
        /// The appended sample.
        sample: Sample,
    },
    /// A sample appended to a logger's buffer.
    LogSample {
        /// The logger block.
        id: BlockId,
        /// The appended sample.
        sample: Sample,
    },
    /// A linear dynamic element's computed output, for host display.
    TransferOutput {
        /// The transfer-function block.
        id: BlockId,
        /// The output computed this tick.
        value: f64,
    },
    /// The block's derived fields were cleared (reset, or an explicit
    /// `ClearLog`). The host should blank display values, histories,
    /// and logs for this block.
    Cleared {
        /// The cleared block.
        id: BlockId,
    },
}

impl BlockUpdate {
    /// The block this update concerns.
    pub fn block(&self) -> &BlockId {
        match self {
            Self::Display { id, .. }
            | Self::PortValue { id, .. }
            | Self::PortSample { id, .. }
            | Self::LogSample { id, .. }
            | Self::TransferOutput { id, .. }
            | Self::Cleared { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_accessor_covers_variants() {
        let id = BlockId::from("x");
        let updates = [
            BlockUpdate::Display {
                id: id.clone(),
                value: 1.0,
                connected: true,
            },
            BlockUpdate::PortValue {
                id: id.clone(),
                value: 1.0,
            },
            BlockUpdate::Cleared { id: id.clone() },
        ];
        for u in &updates {
            assert_eq!(u.block(), &id);
        }
    }

    #[test]
    fn sample_serde() {
        let s = Sample {
            time: 0.5,
            value: -2.0,
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
