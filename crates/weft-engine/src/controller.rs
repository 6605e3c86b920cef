//! The step controller: a run/step/reset state machine over the tick
//! executor.
//!
//! [`Simulation`] has two states, **Idle** and **Running**, and a
//! cooperative cadence hook: the host calls [`poll()`](Simulation::poll)
//! from its own timer or frame loop, and a tick executes only while
//! Running. Single-stepping is a transient synchronous tick, valid only
//! while Idle. `stop()` and `reset()` take effect at tick boundaries —
//! an in-flight tick always runs to completion because ticks are
//! synchronous here.
//!
//! Hosts without their own scheduler can hand the controller to
//! [`TimedRunner`](crate::TimedRunner), which drives `poll()` from a
//! dedicated timer thread at the configured tick rate.

use weft_blocks::DisplayRecord;
use weft_core::{BlockId, BlockUpdate, Command, Sample, Sheet, StepError, SubmitError, TickId};

use crate::config::{validate_time_step, ConfigError, SimConfig};
use crate::metrics::StepMetrics;
use crate::tick::{StepEngine, TickReport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Idle,
    Running,
}

/// The user-facing simulation controller.
///
/// # Example
///
/// ```ignore
/// let mut sim = Simulation::new(SimConfig::default())?;
/// let report = sim.step(&sheet)?;        // single tick while idle
/// sim.start();
/// loop {
///     if let Some(report) = sim.poll(&sheet) {
///         apply(report.updates);
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Simulation {
    engine: StepEngine,
    run_state: RunState,
    config: SimConfig,
}

impl Simulation {
    /// Build an idle simulation from a configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when the configuration fails validation.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine: StepEngine::new(&config),
            run_state: RunState::Idle,
            config,
        })
    }

    // ── State machine ────────────────────────────────────────────

    /// Idle → Running. No-op when already Running.
    pub fn start(&mut self) {
        self.run_state = RunState::Running;
    }

    /// Running → Idle. The next `poll()` does nothing; pending commands
    /// stay queued for the next tick, whenever that is.
    pub fn stop(&mut self) {
        self.run_state = RunState::Idle;
    }

    /// Whether the controller is Running.
    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Execute exactly one synchronous tick while Idle.
    ///
    /// # Errors
    ///
    /// [`StepError::NotIdle`] while Running — stepping under a running
    /// cadence would interleave two tick drivers.
    pub fn step(&mut self, sheet: &Sheet) -> Result<TickReport, StepError> {
        if self.is_running() {
            return Err(StepError::NotIdle);
        }
        Ok(self.engine.execute_tick(sheet))
    }

    /// The cooperative cadence hook: executes one tick iff Running.
    ///
    /// Hosts call this from their timer/frame callback. Returns `None`
    /// while Idle, so a host can leave its loop wired up permanently.
    pub fn poll(&mut self, sheet: &Sheet) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        Some(self.engine.execute_tick(sheet))
    }

    /// Force Idle and reinitialize the simulation state: clock to 0,
    /// output/state tables and command queue emptied. The time-step is
    /// kept.
    ///
    /// Returns one [`BlockUpdate::Cleared`] per sink block so the host
    /// can blank derived fields (display values, histories, logs).
    pub fn reset(&mut self, sheet: &Sheet) -> Vec<BlockUpdate> {
        self.run_state = RunState::Idle;
        self.engine.reset(sheet)
    }

    // ── Configuration ────────────────────────────────────────────

    /// Replace the fixed time-step, effective from the next tick.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTimeStep`] for non-finite or non-positive
    /// values.
    pub fn set_time_step(&mut self, seconds: f64) -> Result<(), ConfigError> {
        validate_time_step(seconds)?;
        self.config.time_step = seconds;
        self.engine.set_time_step(seconds);
        Ok(())
    }

    /// The active configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Queue a command for the next tick boundary.
    ///
    /// # Errors
    ///
    /// [`SubmitError::QueueFull`] when the queue is at capacity.
    pub fn submit(&mut self, command: Command) -> Result<(), SubmitError> {
        self.engine.submit(command)
    }

    // ── Status and state queries ─────────────────────────────────

    /// Current simulation time in seconds.
    pub fn current_time(&self) -> f64 {
        self.engine.time()
    }

    /// Ticks executed since construction or reset.
    pub fn current_tick(&self) -> TickId {
        self.engine.current_tick()
    }

    /// The fixed time-step in seconds.
    pub fn time_step(&self) -> f64 {
        self.engine.time_step()
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        self.engine.last_metrics()
    }

    /// Cumulative count of ticks that fell back to authored order.
    pub fn cycle_fallbacks(&self) -> u64 {
        self.engine.cycle_fallbacks()
    }

    /// The output last published by `id`, if any.
    pub fn output(&self, id: &BlockId) -> Option<f64> {
        self.engine.output(id)
    }

    /// What a display block currently shows.
    pub fn display_value(&self, id: &BlockId) -> Option<DisplayRecord> {
        self.engine.display_value(id)
    }

    /// A logger's retained samples, oldest first.
    pub fn log_samples(&self, id: &BlockId) -> Vec<Sample> {
        self.engine.log_samples(id)
    }

    /// An output port's export history, oldest first.
    pub fn port_history(&self, id: &BlockId) -> Vec<Sample> {
        self.engine.port_history(id)
    }
}
