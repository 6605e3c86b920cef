//! Core types for the Weft block-diagram simulation kernel.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! shared vocabulary used throughout the Weft workspace: block and
//! connection types, the closed [`BlockKind`] sum type with its per-type
//! parameter records, coefficient parsing for linear dynamic elements,
//! commands, host-visible update events, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod coeff;
pub mod command;
pub mod connection;
pub mod error;
pub mod event;
pub mod id;
pub mod inputs;
pub mod sheet;

pub use block::{
    ArithOp, Block, BlockKind, LoggerParams, MultiplyParams, OutputPortParams, ScaleOp,
    SignalParams, SourceMode, SourceParams, SubsystemParams, SumParams, TransferFnParams,
    WaveShape,
};
pub use coeff::Coefficients;
pub use command::Command;
pub use connection::Connection;
pub use error::{CoefficientError, CycleError, SheetError, StepError, SubmitError};
pub use event::{BlockUpdate, Sample};
pub use id::{BlockId, BlockSlot, TickId};
pub use inputs::ResolvedInputs;
pub use sheet::Sheet;
