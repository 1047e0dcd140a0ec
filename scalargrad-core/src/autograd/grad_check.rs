use crate::autograd::graph::Graph;
use crate::error::ScalarGradError;
use crate::value::Value;
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad} != numerical grad {numerical_grad}. Difference: {difference}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ScalarGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(ScalarGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus}, Loss-: {loss_minus}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Finite difference step must be positive and finite, got {0}")]
    InvalidEpsilon(f64),
}

impl From<ScalarGradError> for GradCheckError {
    fn from(err: ScalarGradError) -> Self {
        GradCheckError::ForwardPassError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// Builds one leaf per entry of `inputs`, runs `func` and a backward pass, then
/// for each input re-runs `func` on fresh leaves shifted by `+epsilon` and
/// `-epsilon`. Every evaluation allocates new nodes in `graph`; nothing already
/// in the arena is modified apart from gradients.
///
/// Two gradients match when they are within `abs_tol` absolutely or `rel_tol`
/// relatively.
pub fn check_grad<'g, F>(
    graph: &'g Graph,
    func: F,
    inputs: &[f64],
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Value<'g>]) -> Result<Value<'g>, ScalarGradError>,
{
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(GradCheckError::InvalidEpsilon(epsilon));
    }

    // --- 1. Analytical gradients ---
    let leaves: Vec<Value<'g>> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&leaves).map_err(GradCheckError::ForwardPassError)?;
    output
        .backward()
        .map_err(GradCheckError::BackwardPassError)?;

    // --- 2. Numerical gradients, one input at a time ---
    for (input_index, leaf) in leaves.iter().enumerate() {
        let analytical_grad = leaf.grad();
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical_grad,
            });
        }

        let loss_plus = evaluate_shifted(graph, &func, inputs, input_index, epsilon)?;
        let loss_minus = evaluate_shifted(graph, &func, inputs, input_index, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }

        log::trace!(
            "[check_grad] input {}: analytical {} numerical {}",
            input_index,
            analytical_grad,
            numerical_grad
        );
        if !relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = abs_tol,
            max_relative = rel_tol
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

fn evaluate_shifted<'g, F>(
    graph: &'g Graph,
    func: &F,
    inputs: &[f64],
    shifted_index: usize,
    delta: f64,
) -> Result<f64, GradCheckError>
where
    F: Fn(&[Value<'g>]) -> Result<Value<'g>, ScalarGradError>,
{
    let leaves: Vec<Value<'g>> = inputs
        .iter()
        .enumerate()
        .map(|(i, &x)| graph.leaf(if i == shifted_index { x + delta } else { x }))
        .collect();
    let output = func(&leaves)?;
    Ok(output.value())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
