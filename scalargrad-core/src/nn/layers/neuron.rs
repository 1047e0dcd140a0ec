use crate::autograd::graph::Graph;
use crate::error::ScalarGradError;
use crate::nn::init::{self, WEIGHT_INIT_RANGE};
use crate::nn::module::{check_input_size, Module};
use crate::value::Value;
use rand::Rng;

/// A single unit computing `act(w · x + b)`, with `act` ReLU or the identity.
#[derive(Debug, Clone)]
pub struct Neuron<'g> {
    pub(crate) weights: Vec<Value<'g>>,
    pub(crate) bias: Value<'g>,
    nonlinear: bool,
}

impl<'g> Neuron<'g> {
    /// Creates a neuron with weights sampled from [`WEIGHT_INIT_RANGE`] using the
    /// thread-local generator, and a bias of 0.
    pub fn new(graph: &'g Graph, n_inputs: usize, nonlinear: bool) -> Result<Self, ScalarGradError> {
        Self::with_rng(graph, n_inputs, nonlinear, &mut rand::thread_rng())
    }

    /// Same as [`Neuron::new`], drawing weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        graph: &'g Graph,
        n_inputs: usize,
        nonlinear: bool,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        let (low, high) = WEIGHT_INIT_RANGE;
        let weights = init::uniform(graph, n_inputs, low, high, rng)?;
        let bias = graph.leaf(0.0);
        Ok(Neuron {
            weights,
            bias,
            nonlinear,
        })
    }

    /// Creates a neuron with explicit weights and bias.
    pub fn from_weights(graph: &'g Graph, weights: &[f64], bias: f64, nonlinear: bool) -> Self {
        Neuron {
            weights: weights.iter().map(|&w| graph.leaf(w)).collect(),
            bias: graph.leaf(bias),
            nonlinear,
        }
    }

    pub fn weights(&self) -> &[Value<'g>] {
        &self.weights
    }

    pub fn bias(&self) -> Value<'g> {
        self.bias
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.len()
    }

    pub fn is_nonlinear(&self) -> bool {
        self.nonlinear
    }
}

impl<'g> Module<'g> for Neuron<'g> {
    type Output = Value<'g>;

    fn forward(&self, inputs: &[Value<'g>]) -> Result<Value<'g>, ScalarGradError> {
        check_input_size("Neuron", self.weights.len(), inputs.len())?;
        let mut act = self.bias;
        for (w, x) in self.weights.iter().zip(inputs) {
            act += *w * *x;
        }
        Ok(if self.nonlinear { act.relu() } else { act })
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        let mut params = self.weights.clone();
        params.push(self.bias);
        params
    }

    fn named_parameters(&self) -> Vec<(String, Value<'g>)> {
        let mut named: Vec<(String, Value<'g>)> = self
            .weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("weight.{}", i), *w))
            .collect();
        named.push(("bias".to_string(), self.bias));
        named
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value<'g>> {
        let mut params: Vec<&mut Value<'g>> = self.weights.iter_mut().collect();
        params.push(&mut self.bias);
        params
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
