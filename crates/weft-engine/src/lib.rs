//! Simulation engine for Weft: state store, tick executor, and the
//! run/step/reset controller.
//!
//! The layering, bottom up:
//!
//! - [`StateArena`]: dense per-block slots for internal state and
//!   published outputs, interned by external id.
//! - [`StepEngine`]: the synchronous tick executor — advance the clock,
//!   apply commands, sort, resolve, evaluate, publish.
//! - [`Simulation`]: the Idle/Running state machine the host talks to,
//!   with `start`/`stop`/`step`/`poll`/`reset` and status queries.
//! - [`TimedRunner`]: an optional timer thread that drives `poll()` at
//!   the configured tick rate for hosts without their own loop.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod runner;
pub mod tick;

pub use arena::StateArena;
pub use config::{ConfigError, SimConfig};
pub use controller::Simulation;
pub use metrics::StepMetrics;
pub use runner::{RunnerError, TimedRunner};
pub use tick::{StepEngine, TickReport};
