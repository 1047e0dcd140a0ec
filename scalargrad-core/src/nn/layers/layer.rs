use crate::autograd::graph::Graph;
use crate::error::ScalarGradError;
use crate::nn::layers::neuron::Neuron;
use crate::nn::module::{check_input_size, prefix_names, Module};
use crate::value::Value;
use rand::Rng;

/// A fully connected layer: `n_out` independent neurons reading the same inputs.
#[derive(Debug, Clone)]
pub struct Layer<'g> {
    neurons: Vec<Neuron<'g>>,
    n_inputs: usize,
}

impl<'g> Layer<'g> {
    pub fn new(
        graph: &'g Graph,
        n_inputs: usize,
        n_outputs: usize,
        nonlinear: bool,
    ) -> Result<Self, ScalarGradError> {
        Self::with_rng(graph, n_inputs, n_outputs, nonlinear, &mut rand::thread_rng())
    }

    /// Builds the layer drawing every neuron's weights from `rng`. Each neuron
    /// gets its own samples.
    pub fn with_rng<R: Rng + ?Sized>(
        graph: &'g Graph,
        n_inputs: usize,
        n_outputs: usize,
        nonlinear: bool,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        let neurons = (0..n_outputs)
            .map(|_| Neuron::with_rng(graph, n_inputs, nonlinear, &mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer { neurons, n_inputs })
    }

    /// Assembles a layer from existing neurons, which must share one input size.
    pub fn from_neurons(neurons: Vec<Neuron<'g>>) -> Result<Self, ScalarGradError> {
        let n_inputs = match neurons.first() {
            Some(first) => first.n_inputs(),
            None => {
                return Err(ScalarGradError::InvalidArchitecture(
                    "a layer built from neurons needs at least one neuron".to_string(),
                ))
            }
        };
        for neuron in &neurons {
            check_input_size("Layer", n_inputs, neuron.n_inputs())?;
        }
        Ok(Layer { neurons, n_inputs })
    }

    pub fn neurons(&self) -> &[Neuron<'g>] {
        &self.neurons
    }

    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    pub fn n_outputs(&self) -> usize {
        self.neurons.len()
    }
}

impl<'g> Module<'g> for Layer<'g> {
    type Output = Vec<Value<'g>>;

    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>, ScalarGradError> {
        check_input_size("Layer", self.n_inputs, inputs.len())?;
        self.neurons
            .iter()
            .map(|neuron| neuron.forward(inputs))
            .collect()
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, Value<'g>)> {
        self.neurons
            .iter()
            .enumerate()
            .flat_map(|(i, neuron)| prefix_names("neurons", i, neuron.named_parameters()))
            .collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value<'g>> {
        self.neurons
            .iter_mut()
            .flat_map(|neuron| neuron.parameters_mut())
            .collect()
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
