//! Output ports: pass-through with an optional bounded export history.

use crate::state::BlockState;
use crate::{EvalContext, Outcome};
use smallvec::smallvec;
use weft_core::{BlockId, BlockUpdate, OutputPortParams, ResolvedInputs, Sample};

/// Evaluate an output port.
///
/// The input passes straight through as the published output, so ports
/// can be chained. With export enabled, a `{time, value}` sample is
/// appended to the bounded history and emitted for the host.
pub fn eval_output_port(
    id: &BlockId,
    params: &OutputPortParams,
    inputs: &ResolvedInputs,
    state: &mut BlockState,
    ctx: &EvalContext,
) -> Outcome {
    let value = inputs.first();
    let mut updates = smallvec![BlockUpdate::PortValue {
        id: id.clone(),
        value,
    }];

    if params.export_enabled && params.history_max > 0 {
        let sample = Sample {
            time: ctx.time,
            value,
        };
        state.history_mut().push(sample, params.history_max);
        updates.push(BlockUpdate::PortSample {
            id: id.clone(),
            sample,
        });
    }

    Outcome {
        output: Some(value),
        updates,
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

    #[test]
    fn passes_input_through() {
        let id = BlockId::from("port");
        let params = OutputPortParams::default();
        let mut state = BlockState::History(Default::default());
        let outcome = eval_output_port(
            &id,
            &params,
            &ResolvedInputs::from_values(&[3.5]),
            &mut state,
            &ctx(0.01),
        );
        assert_eq!(outcome.output, Some(3.5));
        assert_eq!(
            outcome.updates.as_slice(),
            &[BlockUpdate::PortValue { id, value: 3.5 }]
        );
        // Export disabled: nothing retained.
        assert!(state.history().unwrap().is_empty());
    }

    #[test]
    fn export_history_keeps_last_entries() {
        let id = BlockId::from("port");
        let params = OutputPortParams {
            export_enabled: true,
            history_max: 2,
        };
        let mut state = BlockState::History(Default::default());

        for n in 1..=4 {
            let inputs = ResolvedInputs::from_values(&[n as f64]);
            eval_output_port(&id, &params, &inputs, &mut state, &ctx(n as f64 * 0.01));
        }

        let history = state.history().unwrap().to_vec();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].value, 3.0);
        assert_eq!(history[1].value, 4.0);
    }

    #[test]
    fn export_emits_port_sample_updates() {
        let id = BlockId::from("port");
        let params = OutputPortParams {
            export_enabled: true,
            history_max: 10,
        };
        let mut state = BlockState::History(Default::default());
        let outcome = eval_output_port(
            &id,
            &params,
            &ResolvedInputs::from_values(&[1.0]),
            &mut state,
            &ctx(0.02),
        );
        assert_eq!(outcome.updates.len(), 2);
        assert!(matches!(
            outcome.updates[1],
            BlockUpdate::PortSample {
                sample: Sample { time, value },
                ..
            } if time == 0.02 && value == 1.0
        ));
    }

    #[test]
    fn unconnected_port_publishes_zero() {
        let id = BlockId::from("port");
        let params = OutputPortParams::default();
        let mut state = BlockState::History(Default::default());
        let outcome = eval_output_port(
            &id,
            &params,
            &ResolvedInputs::unconnected(1),
            &mut state,
            &ctx(0.01),
        );
        assert_eq!(outcome.output, Some(0.0));
    }
}
