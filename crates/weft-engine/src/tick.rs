//! Tick executor: the single-threaded simulation step.
//!
//! [`StepEngine`] owns the simulation state — clock, tick counter, the
//! slot arena, and the pending-command queue — and executes ticks
//! synchronously. Each tick re-derives the evaluation order and the
//! wiring from the sheet snapshot it is handed, so host edits between
//! ticks take effect immediately and no topology is cached.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::warn;
use weft_blocks::{evaluate, DisplayRecord, EvalContext};
use weft_core::{
    BlockId, BlockKind, BlockSlot, BlockUpdate, Command, CycleError, Sample, Sheet, SourceMode,
    SourceParams, SubmitError, TickId,
};
use weft_graph::{dangling_connections, index_by_id, resolve_inputs, sorted_or_authored};

use crate::arena::StateArena;
use crate::config::SimConfig;
use crate::metrics::StepMetrics;

// ── TickReport ───────────────────────────────────────────────────

/// Everything one tick produced for the host.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// The tick that was executed.
    pub tick: TickId,
    /// Simulation time after the tick.
    pub time: f64,
    /// Host-visible field changes, in evaluation order.
    pub updates: Vec<BlockUpdate>,
    /// The cycle diagnostic, when this tick fell back to authored order.
    pub cycle: Option<CycleError>,
    /// Timing and bookkeeping for this tick.
    pub metrics: StepMetrics,
}

// ── StepEngine ───────────────────────────────────────────────────

/// Owns the simulation state and executes ticks.
///
/// This is the synchronous core below the
/// [`Simulation`](crate::Simulation) controller: it has no notion of
/// Idle/Running, it just runs a tick when asked. All state mutation in
/// the kernel happens here.
#[derive(Debug)]
pub struct StepEngine {
    time: f64,
    time_step: f64,
    tick: TickId,
    arena: StateArena,
    pending: VecDeque<Command>,
    max_pending: usize,
    cycle_fallbacks: u64,
    last_metrics: StepMetrics,
}

impl StepEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            time: 0.0,
            time_step: config.time_step,
            tick: TickId(0),
            arena: StateArena::new(),
            pending: VecDeque::new(),
            max_pending: config.max_pending_commands,
            cycle_fallbacks: 0,
            last_metrics: StepMetrics::default(),
        }
    }

    /// Queue a command for the next tick boundary.
    ///
    /// # Errors
    ///
    /// [`SubmitError::QueueFull`] when the queue is at capacity.
    pub fn submit(&mut self, command: Command) -> Result<(), SubmitError> {
        if self.pending.len() >= self.max_pending {
            return Err(SubmitError::QueueFull);
        }
        self.pending.push_back(command);
        Ok(())
    }

    /// Execute one tick against the supplied sheet snapshot.
    ///
    /// Advances the clock by the time-step, applies pending commands,
    /// derives the evaluation order, resolves and evaluates every block,
    /// publishes outputs into the arena, and returns the report.
    pub fn execute_tick(&mut self, sheet: &Sheet) -> TickReport {
        let tick_start = Instant::now();
        let mut metrics = StepMetrics::default();
        let mut updates = Vec::new();

        // 1. Advance the clock; blocks evaluate at the new time.
        self.time += self.time_step;
        self.tick = TickId(self.tick.0 + 1);

        let blocks = &sheet.blocks;
        let connections = &sheet.connections;
        let index = index_by_id(blocks);
        metrics.dangling_connections = dangling_connections(connections, &index) as u32;

        // 2. Intern every block into the arena. Slots are stable across
        // ticks, so state persists through topology edits.
        let slots: Vec<BlockSlot> = blocks
            .iter()
            .map(|b| self.arena.intern(&b.id, &b.kind))
            .collect();

        // 3. Apply pending commands at the tick boundary.
        let pending: Vec<Command> = self.pending.drain(..).collect();
        for command in pending {
            self.apply_command(command, sheet, &mut updates, &mut metrics);
        }

        // 4. Derive the evaluation order; degrade to authored order on a
        // cycle and surface the diagnostic.
        let sort_start = Instant::now();
        let (order, cycle) = sorted_or_authored(blocks, connections);
        metrics.sort_us = sort_start.elapsed().as_micros() as u64;
        if let Some(cycle) = &cycle {
            self.cycle_fallbacks += 1;
            metrics.cycle_fallback = true;
            warn!(%cycle, "dependency cycle; evaluating in authored order");
        }

        // 5. Resolve and evaluate every block in order, publishing into
        // the per-tick output table as we go.
        let eval_start = Instant::now();
        let ctx = EvalContext {
            time: self.time,
            dt: self.time_step,
            tick: self.tick,
        };
        let mut tick_outputs: Vec<Option<f64>> = vec![None; blocks.len()];
        for &pos in &order {
            let inputs = resolve_inputs(pos, blocks, connections, &index, &tick_outputs);
            let state = self.arena.state_mut(slots[pos]);
            let outcome = evaluate(&blocks[pos], &inputs, state, &ctx);
            tick_outputs[pos] = outcome.output;
            updates.extend(outcome.updates);
            metrics.blocks_evaluated += 1;
        }
        metrics.eval_us = eval_start.elapsed().as_micros() as u64;

        // 6. Persist this tick's outputs for host queries.
        for (pos, &slot) in slots.iter().enumerate() {
            self.arena.set_output(slot, tick_outputs[pos]);
        }

        metrics.updates_emitted = updates.len() as u32;
        metrics.total_us = tick_start.elapsed().as_micros() as u64;
        self.last_metrics = metrics.clone();

        TickReport {
            tick: self.tick,
            time: self.time,
            updates,
            cycle,
            metrics,
        }
    }

    fn apply_command(
        &mut self,
        command: Command,
        sheet: &Sheet,
        updates: &mut Vec<BlockUpdate>,
        metrics: &mut StepMetrics,
    ) {
        let target = command.target();
        let kind = sheet.blocks.iter().find(|b| &b.id == target).map(|b| &b.kind);
        let slot = self.arena.slot(target);

        let applied = match (&command, kind, slot) {
            (
                Command::SetExternalInput { value, .. },
                Some(BlockKind::Source(SourceParams {
                    mode: SourceMode::External { .. },
                })),
                Some(slot),
            ) => {
                *self.arena.state_mut(slot).external_mut() = Some(*value);
                true
            }
            (Command::ClearLog { .. }, Some(BlockKind::Logger(_)), Some(slot)) => {
                self.arena.state_mut(slot).log_mut().clear();
                updates.push(BlockUpdate::Cleared { id: target.clone() });
                true
            }
            _ => false,
        };

        if applied {
            metrics.commands_applied += 1;
        } else {
            metrics.commands_rejected += 1;
            warn!(block = %target, "command dropped: no matching block in sheet");
        }
    }

    /// Reinitialize the simulation state: clock to 0, arena and queue
    /// emptied. The time-step is a setting, not state, and is kept.
    ///
    /// Returns a [`BlockUpdate::Cleared`] per sink block in `sheet` so
    /// the host can blank display values, histories, and logs.
    pub fn reset(&mut self, sheet: &Sheet) -> Vec<BlockUpdate> {
        self.time = 0.0;
        self.tick = TickId(0);
        self.arena.clear();
        self.pending.clear();
        self.last_metrics = StepMetrics::default();

        sheet
            .blocks
            .iter()
            .filter(|b| b.kind.is_sink())
            .map(|b| BlockUpdate::Cleared { id: b.id.clone() })
            .collect()
    }

    // ── Status and state queries ─────────────────────────────────

    /// Current simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The fixed time-step in seconds.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Replace the time-step. The caller validates.
    pub(crate) fn set_time_step(&mut self, time_step: f64) {
        self.time_step = time_step;
    }

    /// Ticks executed since construction or reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Cumulative count of ticks that fell back to authored order.
    pub fn cycle_fallbacks(&self) -> u64 {
        self.cycle_fallbacks
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The output last published by `id`, if any.
    pub fn output(&self, id: &BlockId) -> Option<f64> {
        self.arena.slot(id).and_then(|slot| self.arena.output(slot))
    }

    /// What a display block currently shows.
    pub fn display_value(&self, id: &BlockId) -> Option<DisplayRecord> {
        let slot = self.arena.slot(id)?;
        self.arena.state(slot).display().copied()
    }

    /// A logger's retained samples, oldest first.
    pub fn log_samples(&self, id: &BlockId) -> Vec<Sample> {
        self.arena
            .slot(id)
            .and_then(|slot| self.arena.state(slot).log().map(|b| b.to_vec()))
            .unwrap_or_default()
    }

    /// An output port's export history, oldest first.
    pub fn port_history(&self, id: &BlockId) -> Vec<Sample> {
        self.arena
            .slot(id)
            .and_then(|slot| self.arena.state(slot).history().map(|b| b.to_vec()))
            .unwrap_or_default()
    }

}
