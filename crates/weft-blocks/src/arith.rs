//! Arithmetic blocks: sum/difference and multiply/divide.

use crate::Outcome;
use weft_core::{ArithOp, MultiplyParams, ResolvedInputs, ScaleOp, SumParams};

/// Evaluate a sum block.
///
/// `Sum`: Σ(inputs). `Difference`: in₁ − Σ(in₂..ₙ). Unconnected handles
/// read 0.0, so a difference with only its first input wired passes it
/// through unchanged.
pub fn eval_sum(params: &SumParams, inputs: &ResolvedInputs) -> Outcome {
    let values = &inputs.values;
    let output = match params.op {
        ArithOp::Sum => values.iter().sum(),
        ArithOp::Difference => inputs.first() - values.iter().skip(1).sum::<f64>(),
    };
    Outcome::with_output(output)
}

/// Evaluate a multiply block.
///
/// `Multiply`: Π(inputs). `Divide`: in₁ ÷ Π(in₂..ₙ), where a zero
/// divisor-product yields 0.0 — never an infinity or NaN.
pub fn eval_multiply(params: &MultiplyParams, inputs: &ResolvedInputs) -> Outcome {
    let values = &inputs.values;
    let output = match params.op {
        ScaleOp::Multiply => values.iter().product(),
        ScaleOp::Divide => {
            let divisor: f64 = values.iter().skip(1).product();
            if divisor == 0.0 {
                0.0
            } else {
                inputs.first() / divisor
            }
        }
    };
    Outcome::with_output(output)
}
