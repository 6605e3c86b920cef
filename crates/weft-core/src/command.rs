//! Commands: host requests applied at tick boundaries.

use crate::id::BlockId;
use serde::{Deserialize, Serialize};

/// A host request queued on the controller and applied at the start of
/// the next tick.
///
/// Commands referencing unknown blocks (or blocks of the wrong kind) are
/// counted as rejected in that tick's metrics and otherwise ignored —
/// a stale command is never fatal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    /// Latch a value into an external-variable source. The source
    /// outputs this value until the next `SetExternalInput` or `reset`.
    SetExternalInput {
        /// The source block.
        block: BlockId,
        /// The value to latch.
        value: f64,
    },
    /// Clear a logger block's sample buffer.
    ClearLog {
        /// The logger block.
        block: BlockId,
    },
}

impl Command {
    /// The block this command targets.
    pub fn target(&self) -> &BlockId {
        match self {
            Self::SetExternalInput { block, .. } | Self::ClearLog { block } => block,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_accessor() {
        let cmd = Command::SetExternalInput {
            block: BlockId::from("v1"),
            value: 2.5,
        };
        assert_eq!(cmd.target().as_str(), "v1");
    }

    #[test]
    fn serde_tagged_form() {
        let cmd = Command::ClearLog {
            block: BlockId::from("log1"),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["command"], "clearLog");
        let back: Command = serde_json::from_value(json).unwrap();
        assert_eq!(back, cmd);
    }
}
