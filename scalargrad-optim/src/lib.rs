//! Optimizers updating `scalargrad` module parameters from their gradients.

use scalargrad_core::{ScalarGradError, Value};

pub mod sgd;

pub use sgd::Sgd;

/// Trait for optimization algorithms.
/// Optimizers update the parameters of a model based on their gradients.
pub trait Optimizer<'g> {
    /// Performs a single optimization step.
    ///
    /// Nodes are immutable once built, so each parameter handle is rebound to a
    /// fresh leaf holding the updated value. Gradients recorded on the old nodes
    /// are left as they are. Follow with `Graph::truncate` to release the step's
    /// graph.
    ///
    /// # Arguments
    /// * `params` - The model parameters to update, typically from
    ///   `Module::parameters_mut`.
    fn step(&mut self, params: &mut [&mut Value<'g>]) -> Result<(), ScalarGradError>;

    /// Clears the gradients of all parameters.
    /// Should be called before the backward pass to avoid accumulating gradients
    /// from multiple iterations.
    fn zero_grad(&self, params: &mut [&mut Value<'g>]);
}
