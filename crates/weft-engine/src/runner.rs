//! Timer-paced background runner.
//!
//! Hosts with their own frame loop drive [`Simulation::poll`] directly.
//! For everyone else, [`TimedRunner`] moves the controller onto a
//! dedicated thread that polls at the configured tick rate, streams
//! [`TickReport`]s back over a channel, and hands the controller back —
//! state intact — when stopped.
//!
//! # Architecture
//!
//! ```text
//! Host Thread                   Runner Thread
//!     |                             |
//!     |--spawn(sim, sheet)--------->| sim.start()
//!     |                             | loop: select! {
//!     |<--reports via channel ------|   ticker -> sim.poll(&sheet)
//!     |--submit()/replace_sheet()-->|   ctrl   -> apply message
//!     |                             | }
//!     |--stop()-------------------->| sim.stop(); return sim
//!     |<--Simulation (joined)-------|
//! ```
//!
//! Control messages are handled between ticks, so `stop()` takes effect
//! at a tick boundary and an in-flight tick always completes.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use tracing::{debug, warn};
use weft_core::{Command, Sheet};

use crate::controller::Simulation;
use crate::tick::TickReport;

// ── Errors ───────────────────────────────────────────────────────

/// Error talking to the runner thread.
#[derive(Debug, PartialEq, Eq)]
pub enum RunnerError {
    /// The runner thread has already shut down.
    Shutdown,
    /// The control channel is full (back-pressure).
    ChannelFull,
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "runner thread has shut down"),
            Self::ChannelFull => write!(f, "runner control channel full"),
        }
    }
}

impl std::error::Error for RunnerError {}

// ── Control messages ─────────────────────────────────────────────

enum RunnerCtrl {
    Stop,
    ReplaceSheet(Sheet),
    SetTimeStep(f64),
    Submit(Command),
}

// ── TimedRunner ──────────────────────────────────────────────────

/// Drives a [`Simulation`] on a dedicated thread at its configured
/// `tick_rate_hz`.
///
/// The runner owns the controller and the sheet outright while running;
/// the host talks to it only through channels. Dropping the runner
/// without calling [`stop()`](TimedRunner::stop) detaches the thread and
/// loses the controller, so `stop()` is the intended shutdown path.
#[derive(Debug)]
pub struct TimedRunner {
    ctrl_tx: Sender<RunnerCtrl>,
    reports: Receiver<TickReport>,
    handle: JoinHandle<Simulation>,
}

impl TimedRunner {
    /// Start the controller and spawn the runner thread.
    ///
    /// The cadence comes from `sim.config().tick_rate_hz`. The sheet is
    /// owned by the thread; use [`replace_sheet`](Self::replace_sheet)
    /// to swap in host edits.
    pub fn spawn(mut sim: Simulation, sheet: Sheet) -> Self {
        let period = Duration::from_secs_f64(1.0 / sim.config().tick_rate_hz);
        let (ctrl_tx, ctrl_rx) = bounded::<RunnerCtrl>(64);
        let (report_tx, report_rx) = unbounded::<TickReport>();

        let handle = thread::Builder::new()
            .name("weft-tick".into())
            .spawn(move || {
                sim.start();
                debug!(period_us = period.as_micros() as u64, "runner started");
                let mut sheet = sheet;
                let ticker = crossbeam_channel::tick(period);
                loop {
                    select! {
                        recv(ticker) -> _ => {
                            if let Some(report) = sim.poll(&sheet) {
                                // Fire-and-forget: a host that dropped
                                // its receiver still gets ticks.
                                let _ = report_tx.send(report);
                            }
                        }
                        recv(ctrl_rx) -> msg => match msg {
                            Ok(RunnerCtrl::Stop) | Err(_) => break,
                            Ok(RunnerCtrl::ReplaceSheet(next)) => sheet = next,
                            Ok(RunnerCtrl::SetTimeStep(dt)) => {
                                if let Err(err) = sim.set_time_step(dt) {
                                    warn!(%err, "runner ignored time-step change");
                                }
                            }
                            Ok(RunnerCtrl::Submit(command)) => {
                                if let Err(err) = sim.submit(command) {
                                    warn!(%err, "runner dropped command");
                                }
                            }
                        }
                    }
                }
                sim.stop();
                debug!("runner stopped");
                sim
            })
            .expect("failed to spawn runner thread");

        Self {
            ctrl_tx,
            reports: report_rx,
            handle,
        }
    }

    /// The stream of tick reports, in execution order.
    pub fn reports(&self) -> &Receiver<TickReport> {
        &self.reports
    }

    /// Queue a command on the running simulation.
    ///
    /// # Errors
    ///
    /// [`RunnerError`] when the control channel is full or the thread is
    /// gone.
    pub fn submit(&self, command: Command) -> Result<(), RunnerError> {
        self.send(RunnerCtrl::Submit(command))
    }

    /// Swap in an edited sheet; takes effect at the next tick boundary.
    ///
    /// # Errors
    ///
    /// [`RunnerError`] when the control channel is full or the thread is
    /// gone.
    pub fn replace_sheet(&self, sheet: Sheet) -> Result<(), RunnerError> {
        self.send(RunnerCtrl::ReplaceSheet(sheet))
    }

    /// Change the time-step; invalid values are logged and ignored by
    /// the runner thread.
    ///
    /// # Errors
    ///
    /// [`RunnerError`] when the control channel is full or the thread is
    /// gone.
    pub fn set_time_step(&self, seconds: f64) -> Result<(), RunnerError> {
        self.send(RunnerCtrl::SetTimeStep(seconds))
    }

    /// Stop at the next tick boundary, join the thread, and recover the
    /// controller (now Idle) with all simulation state intact.
    pub fn stop(self) -> Simulation {
        let _ = self.ctrl_tx.send(RunnerCtrl::Stop);
        self.handle.join().expect("runner thread panicked")
    }

    fn send(&self, msg: RunnerCtrl) -> Result<(), RunnerError> {
        self.ctrl_tx.try_send(msg).map_err(|err| match err {
            crossbeam_channel::TrySendError::Full(_) => RunnerError::ChannelFull,
            crossbeam_channel::TrySendError::Disconnected(_) => RunnerError::Shutdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use weft_core::{Block, BlockId, BlockKind, Connection, SourceParams};

    fn fast_sim() -> Simulation {
        Simulation::new(SimConfig {
            tick_rate_hz: 2000.0,
            ..SimConfig::default()
        })
        .unwrap()
    }

    fn sheet() -> Sheet {
        Sheet::new(
            vec![
                Block::new("u", BlockKind::Source(SourceParams::constant(2.0))),
                Block::new("disp", BlockKind::Display),
            ],
            vec![Connection::new("u", "disp", "in")],
        )
    }

    #[test]
    fn runner_ticks_and_returns_controller() {
        let runner = TimedRunner::spawn(fast_sim(), sheet());
        // Wait for at least one report to prove the cadence fired.
        let report = runner
            .reports()
            .recv_timeout(Duration::from_secs(5))
            .expect("runner produced no tick");
        assert!(report.tick.0 >= 1);

        let sim = runner.stop();
        assert!(!sim.is_running());
        let ticks = sim.current_tick().0;
        assert!(ticks >= 1);
        // Clock and tick counter stay consistent.
        assert!((sim.current_time() - ticks as f64 * 0.01).abs() < 1e-9);
    }

    #[test]
    fn runner_applies_submitted_commands() {
        let sheet = Sheet::new(
            vec![
                Block::new("v", BlockKind::Source(SourceParams::external(0.0))),
                Block::new("disp", BlockKind::Display),
            ],
            vec![Connection::new("v", "disp", "in")],
        );
        let runner = TimedRunner::spawn(fast_sim(), sheet);
        runner
            .submit(Command::SetExternalInput {
                block: BlockId::from("v"),
                value: 7.5,
            })
            .unwrap();

        // Let a comfortable number of ticks elapse after submission so
        // the control message is drained and a tick has latched it.
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let mut last_tick = 0u64;
        while last_tick < 50 && std::time::Instant::now() < deadline {
            match runner.reports().recv_timeout(Duration::from_secs(1)) {
                Ok(report) => last_tick = report.tick.0,
                Err(_) => break,
            }
        }
        let sim = runner.stop();
        assert!(last_tick >= 50, "runner stalled at tick {last_tick}");
        assert_eq!(sim.output(&BlockId::from("v")), Some(7.5));
    }

    #[test]
    fn stopped_runner_rejects_messages() {
        let runner = TimedRunner::spawn(fast_sim(), sheet());
        let ctrl = runner.ctrl_tx.clone();
        let _sim = runner.stop();
        // The thread is gone; the cloned sender sees a closed channel.
        assert!(ctrl.send(RunnerCtrl::Stop).is_err());
    }
}
