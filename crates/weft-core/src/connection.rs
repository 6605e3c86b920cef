//! Connections: directed wires between block handles.

use crate::id::BlockId;
use serde::{Deserialize, Serialize};

/// A directed wire from one block's output handle to another block's
/// input handle.
///
/// Handle ids are block-type-specific: variadic arithmetic blocks expose
/// `in1..inN`, single-port blocks expose `in`, and every producing block
/// publishes on `out`. Handle text is resolved per tick by the signal
/// resolver; unrecognized handles simply never match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The producing block.
    pub source: BlockId,
    /// Output handle on the source; `out` for every current block type.
    #[serde(default = "default_out")]
    pub source_handle: String,
    /// The consuming block.
    pub target: BlockId,
    /// Input handle on the target (`in`, or `in1..inN`).
    #[serde(default = "default_in")]
    pub target_handle: String,
}

impl Connection {
    /// Convenience constructor for `out → handle` wires.
    pub fn new(source: impl Into<BlockId>, target: impl Into<BlockId>, target_handle: &str) -> Self {
        Self {
            source: source.into(),
            source_handle: default_out(),
            target: target.into(),
            target_handle: target_handle.to_string(),
        }
    }
}

fn default_out() -> String {
    "out".to_string()
}

fn default_in() -> String {
    "in".to_string()
}

/// Parse an input-handle id into a zero-based input slot.
///
/// `in` and `in1` both address slot 0 (single-port blocks author `in`,
/// variadic blocks author `in1`); `inN` addresses slot N−1. Anything else
/// is `None`.
///
/// # Examples
///
/// ```
/// use weft_core::connection::input_slot;
///
/// assert_eq!(input_slot("in"), Some(0));
/// assert_eq!(input_slot("in1"), Some(0));
/// assert_eq!(input_slot("in3"), Some(2));
/// assert_eq!(input_slot("out"), None);
/// ```
pub fn input_slot(handle: &str) -> Option<usize> {
    let rest = handle.strip_prefix("in")?;
    if rest.is_empty() {
        return Some(0);
    }
    let n: usize = rest.parse().ok()?;
    n.checked_sub(1)
}
