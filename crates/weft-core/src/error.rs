//! Error types for the Weft simulation kernel.
//!
//! One enum per subsystem. Everything here is local-recoverable: a cycle
//! falls back to authored order, a malformed coefficient list is rejected
//! before it can reach a tick, and a stale command is dropped. Nothing in
//! the kernel aborts the process.

use crate::id::BlockId;
use std::error::Error;
use std::fmt;

/// A cycle in the dependency graph, detected by the sorter.
///
/// Carries the blocks on the cycle path in traversal order, first
/// repeated block first. Evaluation can still proceed in authored order
/// (see `weft-graph`'s fallback operation), but the result is best-effort
/// rather than guaranteed-consistent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleError {
    /// Blocks forming the cycle, in traversal order.
    pub cycle: Vec<BlockId>,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dependency cycle: ")?;
        for (i, id) in self.cycle.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{id}")?;
        }
        if let Some(first) = self.cycle.first() {
            write!(f, " -> {first}")?;
        }
        Ok(())
    }
}

impl Error for CycleError {}

/// Malformed coefficient text or values, rejected at configuration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoefficientError {
    /// The list contains no coefficients.
    Empty,
    /// A token failed to parse as a float.
    Invalid {
        /// Zero-based position of the bad token.
        index: usize,
        /// The token text as authored.
        token: String,
    },
    /// A coefficient parsed to an infinity or NaN.
    NonFinite {
        /// Zero-based position of the non-finite value.
        index: usize,
    },
    /// The leading denominator coefficient a₀ is zero, so normalization
    /// is undefined.
    ZeroLeading,
}

impl fmt::Display for CoefficientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "coefficient list is empty"),
            Self::Invalid { index, token } => {
                write!(f, "coefficient {index} ('{token}') is not a number")
            }
            Self::NonFinite { index } => write!(f, "coefficient {index} is not finite"),
            Self::ZeroLeading => write!(f, "leading denominator coefficient is zero"),
        }
    }
}

impl Error for CoefficientError {}

/// Structural problems found by [`Sheet::validate`](crate::Sheet::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetError {
    /// Two blocks share an id.
    DuplicateBlockId {
        /// The duplicated id.
        id: BlockId,
    },
    /// A connection endpoint references a block not present in the sheet.
    DanglingConnection {
        /// Index of the offending connection in authored order.
        index: usize,
        /// The missing endpoint id.
        endpoint: BlockId,
    },
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBlockId { id } => write!(f, "duplicate block id '{id}'"),
            Self::DanglingConnection { index, endpoint } => {
                write!(f, "connection {index} references missing block '{endpoint}'")
            }
        }
    }
}

impl Error for SheetError {}

/// Rejection of a controller operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// `step()` was called while the controller is Running; single
    /// stepping is only valid while Idle.
    NotIdle,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdle => write!(f, "step is only valid while idle"),
        }
    }
}

impl Error for StepError {}

/// Rejection of a command submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The pending-command queue is at capacity.
    QueueFull,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "command queue full"),
        }
    }
}

impl Error for SubmitError {}
