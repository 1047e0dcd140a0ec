use crate::error::ScalarGradError;
use crate::value::Value;
use std::fmt::Debug;

/// The base trait for all neural network modules (neurons, layers, networks).
///
/// A module owns leaf [`Value`]s as parameters and composes value operations into
/// a forward function. Gradients land on the parameters through `backward` and
/// are not reset automatically: call [`Module::zero_grad`] between optimisation
/// steps.
pub trait Module<'g>: Debug {
    /// What a forward pass produces: one value for a neuron, a vector for layers.
    type Output;

    /// Performs a forward pass of the module.
    ///
    /// # Errors
    /// `InputSizeMismatch` if `inputs` does not have the arity the module was built
    /// for.
    ///
    /// # Panics
    /// If `inputs` belong to a different graph than the module's parameters.
    fn forward(&self, inputs: &[Value<'g>]) -> Result<Self::Output, ScalarGradError>;

    /// Returns every parameter, flattened in declaration order (weights before
    /// bias within a neuron, neurons in order, layers in order).
    fn parameters(&self) -> Vec<Value<'g>>;

    /// Returns every parameter along with a hierarchical name such as
    /// `"layers.1.neurons.0.weight.2"`. Same order as [`Module::parameters`].
    fn named_parameters(&self) -> Vec<(String, Value<'g>)>;

    /// Mutable access to the parameter handles, same order as
    /// [`Module::parameters`]. Optimizers use this to rebind parameters to updated
    /// leaves.
    fn parameters_mut(&mut self) -> Vec<&mut Value<'g>>;

    /// Resets the gradient of every parameter to 0.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }
}

/// Shared arity check for forward passes.
pub(crate) fn check_input_size(
    module: &str,
    expected: usize,
    actual: usize,
) -> Result<(), ScalarGradError> {
    if expected != actual {
        return Err(ScalarGradError::InputSizeMismatch {
            module: module.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Prefixes child parameter names with `prefix.index.`.
pub(crate) fn prefix_names<'g>(
    prefix: &str,
    index: usize,
    named: Vec<(String, Value<'g>)>,
) -> Vec<(String, Value<'g>)> {
    named
        .into_iter()
        .map(|(name, param)| (format!("{}.{}.{}", prefix, index, name), param))
        .collect()
}

#[cfg(test)]
#[path = "module_test.rs"]
mod tests;
