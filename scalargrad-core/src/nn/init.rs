use crate::autograd::graph::Graph;
use crate::error::ScalarGradError;
use crate::value::Value;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Closed interval neuron weights are sampled from.
pub const WEIGHT_INIT_RANGE: (f64, f64) = (-1.0, 1.0);

/// Creates `count` leaf parameters sampled uniformly from `[low, high]`.
///
/// # Errors
/// `InvalidInitRange` if a bound is not finite or `low > high`.
pub fn uniform<'g, R: Rng + ?Sized>(
    graph: &'g Graph,
    count: usize,
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Vec<Value<'g>>, ScalarGradError> {
    if !(low.is_finite() && high.is_finite() && low <= high) {
        return Err(ScalarGradError::InvalidInitRange { low, high });
    }
    let dist = Uniform::new_inclusive(low, high);
    Ok((0..count).map(|_| graph.leaf(dist.sample(rng))).collect())
}

/// Creates `count` leaf parameters holding 0.
pub fn zeros(graph: &Graph, count: usize) -> Vec<Value<'_>> {
    (0..count).map(|_| graph.leaf(0.0)).collect()
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
