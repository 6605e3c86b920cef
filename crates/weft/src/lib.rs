//! Weft: a discrete-time block-diagram simulation kernel.
//!
//! Given a directed graph of typed blocks (arithmetic, signal sources,
//! linear dynamic elements, sinks) wired together by connections, Weft
//! computes every block's output once per fixed time-step, propagating
//! values along the wiring and persisting per-block state (filter
//! memory, sample buffers) across steps.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Weft sub-crates. For most users, depending on `weft` alone is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // source(3) ─┐
//! //            ├─ sum ── display
//! // source(4) ─┘
//! let sheet = Sheet::new(
//!     vec![
//!         Block::new("a", BlockKind::Source(SourceParams::constant(3.0))),
//!         Block::new("b", BlockKind::Source(SourceParams::constant(4.0))),
//!         Block::new("sum", BlockKind::Sum(SumParams::default())),
//!         Block::new("disp", BlockKind::Display),
//!     ],
//!     vec![
//!         Connection::new("a", "sum", "in1"),
//!         Connection::new("b", "sum", "in2"),
//!         Connection::new("sum", "disp", "in"),
//!     ],
//! );
//!
//! let mut sim = Simulation::new(SimConfig::default()).unwrap();
//! let report = sim.step(&sheet).unwrap();
//! assert_eq!(sim.output(&BlockId::from("sum")), Some(7.0));
//! assert_eq!(report.tick, TickId(1));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | Blocks, connections, sheets, commands, updates, errors |
//! | [`graph`] | `weft-graph` | Topological ordering and signal resolution |
//! | [`blocks`] | `weft-blocks` | Block evaluators and state records |
//! | [`engine`] | `weft-engine` | State arena, tick executor, controller, runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model: blocks, connections, sheets, commands, updates, and
/// error types (`weft-core`).
pub use weft_core as types;

/// Dependency ordering and signal resolution (`weft-graph`).
///
/// [`graph::sort`] and [`graph::sorted_or_authored`] derive evaluation
/// order; [`graph::resolve_inputs`] gathers per-handle input values.
pub use weft_graph as graph;

/// Block evaluators and per-block state records (`weft-blocks`).
///
/// [`blocks::evaluate`] dispatches exhaustively over
/// [`types::BlockKind`].
pub use weft_blocks as blocks;

/// Simulation engine: state arena, tick executor, step controller, and
/// timer-paced runner (`weft-engine`).
pub use weft_engine as engine;

/// Common imports for typical Weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Data model
    pub use weft_core::{
        ArithOp, Block, BlockId, BlockKind, BlockUpdate, Command, Connection, LoggerParams,
        MultiplyParams, OutputPortParams, Sample, ScaleOp, Sheet, SignalParams, SourceMode,
        SourceParams, SubsystemParams, SumParams, TickId, TransferFnParams, WaveShape,
    };

    // Errors
    pub use weft_core::{CoefficientError, CycleError, SheetError, StepError, SubmitError};

    // Engine
    pub use weft_engine::{
        ConfigError, RunnerError, SimConfig, Simulation, StepMetrics, TickReport, TimedRunner,
    };
}
