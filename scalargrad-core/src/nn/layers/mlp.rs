use crate::autograd::graph::Graph;
use crate::error::ScalarGradError;
use crate::nn::layers::layer::Layer;
use crate::nn::module::{check_input_size, prefix_names, Module};
use crate::value::Value;
use rand::Rng;

/// Multi-layer perceptron chaining `n_inputs -> sizes[0] -> sizes[1] -> ...`.
///
/// Every layer applies ReLU except the last, which is linear.
#[derive(Debug, Clone)]
pub struct Mlp<'g> {
    layers: Vec<Layer<'g>>,
}

impl<'g> Mlp<'g> {
    pub fn new(graph: &'g Graph, n_inputs: usize, layer_sizes: &[usize]) -> Result<Self, ScalarGradError> {
        Self::with_rng(graph, n_inputs, layer_sizes, &mut rand::thread_rng())
    }

    /// # Errors
    /// `InvalidArchitecture` if `layer_sizes` is empty.
    pub fn with_rng<R: Rng + ?Sized>(
        graph: &'g Graph,
        n_inputs: usize,
        layer_sizes: &[usize],
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        if layer_sizes.is_empty() {
            return Err(ScalarGradError::InvalidArchitecture(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        let mut layers = Vec::with_capacity(layer_sizes.len());
        let mut fan_in = n_inputs;
        for (i, &size) in layer_sizes.iter().enumerate() {
            let nonlinear = i + 1 != layer_sizes.len();
            layers.push(Layer::with_rng(graph, fan_in, size, nonlinear, &mut *rng)?);
            fan_in = size;
        }
        let mlp = Mlp { layers };
        log::debug!(
            "Built MLP {} -> {:?} with {} parameters",
            n_inputs,
            layer_sizes,
            mlp.num_parameters()
        );
        Ok(mlp)
    }

    /// Chains existing layers. Each layer's input size must match the previous
    /// layer's output size.
    pub fn from_layers(layers: Vec<Layer<'g>>) -> Result<Self, ScalarGradError> {
        if layers.is_empty() {
            return Err(ScalarGradError::InvalidArchitecture(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        for pair in layers.windows(2) {
            check_input_size("Mlp", pair[0].n_outputs(), pair[1].n_inputs())?;
        }
        Ok(Mlp { layers })
    }

    pub fn layers(&self) -> &[Layer<'g>] {
        &self.layers
    }
}

impl<'g> Module<'g> for Mlp<'g> {
    type Output = Vec<Value<'g>>;

    fn forward(&self, inputs: &[Value<'g>]) -> Result<Vec<Value<'g>>, ScalarGradError> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations)?;
        }
        Ok(activations)
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        self.layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, Value<'g>)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| prefix_names("layers", i, layer.named_parameters()))
            .collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value<'g>> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.parameters_mut())
            .collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
