//! Source blocks: constants, generated waveforms, external variables.

use crate::state::BlockState;
use crate::{EvalContext, Outcome};
use std::f64::consts::TAU;
use weft_core::{SignalParams, SourceMode, SourceParams, WaveShape};

/// Evaluate a source block at the current simulation time.
///
/// External-variable sources read their latch (set via
/// `Command::SetExternalInput`), falling back to the configured initial
/// value until the host supplies one.
pub fn eval_source(params: &SourceParams, state: &mut BlockState, ctx: &EvalContext) -> Outcome {
    let value = match params.mode {
        SourceMode::Constant { value } => value,
        SourceMode::Signal(signal) => waveform(&signal, ctx.time),
        SourceMode::External { initial } => state.external_mut().unwrap_or(initial),
    };
    Outcome::with_output(value)
}

/// Sample a waveform at time `t`.
///
/// Non-finite or non-positive periods are treated as 1.0 rather than
/// producing NaN from a zero modulus.
pub fn waveform(signal: &SignalParams, t: f64) -> f64 {
    let period = if signal.period.is_finite() && signal.period > 0.0 {
        signal.period
    } else {
        1.0
    };
    let amplitude = signal.amplitude;
    let offset = signal.offset;
    match signal.shape {
        WaveShape::Constant => offset,
        WaveShape::Sine => amplitude * (TAU * t / period).sin() + offset,
        WaveShape::Square => {
            let phase = t.rem_euclid(period) / period;
            if phase < 0.5 {
                amplitude + offset
            } else {
                -amplitude + offset
            }
        }
        WaveShape::Ramp => amplitude * (t.rem_euclid(period) / period) + offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::TickId;

    fn ctx(time: f64) -> EvalContext {
        EvalContext {
            time,
            dt: 0.01,
            tick: TickId(1),
        }
    }

    fn eval(params: &SourceParams, state: &mut BlockState, time: f64) -> f64 {
        eval_source(params, state, &ctx(time)).output.unwrap()
    }

    #[test]
    fn constant_source_outputs_value() {
        let mut state = BlockState::Stateless;
        assert_eq!(eval(&SourceParams::constant(2.5), &mut state, 0.3), 2.5);
    }

    #[test]
    fn sine_wave_at_quarter_period() {
        let params = SourceParams::signal(SignalParams {
            shape: WaveShape::Sine,
            period: 1.0,
            amplitude: 2.0,
            offset: 0.5,
        });
        let mut state = BlockState::Stateless;
        let value = eval(&params, &mut state, 0.25);
        assert!((value - 2.5).abs() < 1e-12);
    }

    #[test]
    fn square_wave_halves() {
        let params = SourceParams::signal(SignalParams {
            shape: WaveShape::Square,
            period: 2.0,
            amplitude: 1.0,
            offset: 0.0,
        });
        let mut state = BlockState::Stateless;
        assert_eq!(eval(&params, &mut state, 0.5), 1.0);
        assert_eq!(eval(&params, &mut state, 1.5), -1.0);
        // Periodic: same phase one period later.
        assert_eq!(eval(&params, &mut state, 2.5), 1.0);
    }

    #[test]
    fn ramp_rises_over_period() {
        let params = SourceParams::signal(SignalParams {
            shape: WaveShape::Ramp,
            period: 4.0,
            amplitude: 8.0,
            offset: 1.0,
        });
        let mut state = BlockState::Stateless;
        assert_eq!(eval(&params, &mut state, 1.0), 3.0);
        assert_eq!(eval(&params, &mut state, 3.0), 7.0);
        // Wraps back at the period boundary.
        assert_eq!(eval(&params, &mut state, 4.0), 1.0);
    }

    #[test]
    fn constant_shape_is_offset_only() {
        let params = SourceParams::signal(SignalParams {
            shape: WaveShape::Constant,
            period: 1.0,
            amplitude: 5.0,
            offset: -2.0,
        });
        let mut state = BlockState::Stateless;
        assert_eq!(eval(&params, &mut state, 9.0), -2.0);
    }

    #[test]
    fn degenerate_period_treated_as_one() {
        for period in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let params = SourceParams::signal(SignalParams {
                shape: WaveShape::Ramp,
                period,
                amplitude: 1.0,
                offset: 0.0,
            });
            let mut state = BlockState::Stateless;
            let value = eval(&params, &mut state, 0.5);
            assert_eq!(value, 0.5, "period {period}");
        }
    }

    #[test]
    fn external_source_uses_initial_until_latched() {
        let params = SourceParams::external(3.0);
        let mut state = BlockState::initial_for(&weft_core::BlockKind::Source(params));
        assert_eq!(eval(&params, &mut state, 0.1), 3.0);

        *state.external_mut() = Some(-1.5);
        assert_eq!(eval(&params, &mut state, 0.2), -1.5);
    }
}
