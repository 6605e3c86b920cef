//! Linear dynamic elements: discrete-time IIR difference equations.
//!
//! Coefficients arrive already parsed and normalized by a₀ (see
//! `weft_core::TransferFnParams`), so the recurrence here is
//!
//! ```text
//! y[t] = b₀·x[t] + Σᵢ₌₁..order bᵢ·x[t−i] − Σᵢ₌₁..order aᵢ·y[t−i]
//! ```
//!
//! over order-sized most-recent-first shift registers. Numerator terms
//! beyond the system order are dropped. Order 0 degenerates to the static
//! gain b₀.

use crate::state::BlockState;
use crate::Outcome;
use smallvec::smallvec;
use weft_core::{BlockId, BlockUpdate, ResolvedInputs, TransferFnParams};

/// Evaluate a transfer-function block for one tick.
///
/// Computes the recurrence, shifts the input/output rings, and emits the
/// computed output as a host-display update. Rings re-zero if the host
/// changed the configured order since the last tick.
pub fn eval_transfer(
    id: &BlockId,
    params: &TransferFnParams,
    inputs: &ResolvedInputs,
    state: &mut BlockState,
) -> Outcome {
    let u = inputs.first();
    let b = params.numerator();
    let a = params.denominator();
    let order = params.order();

    let rings = state.transfer_mut(order);

    let mut y = b[0] * u;
    for i in 1..=order {
        if i < b.len() {
            y += b[i] * rings.inputs[i - 1];
        }
        y -= a[i] * rings.outputs[i - 1];
    }

    rings.shift(u, y);

    Outcome {
        output: Some(y),
        updates: smallvec![BlockUpdate::TransferOutput {
            id: id.clone(),
            value: y,
        }],
    }
}
