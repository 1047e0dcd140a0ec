// src/value/autograd.rs

use crate::error::ScalarGradError;
use crate::value::Value;

impl<'g> Value<'g> {
    /// Accumulated d(root)/d(self) from the backward passes run so far.
    pub fn grad(&self) -> f64 {
        self.graph.grad(self.id)
    }

    /// Resets this node's gradient to 0.
    pub fn zero_grad(&self) {
        self.graph.set_grad(self.id, 0.0);
    }

    /// Computes the gradient of this value with respect to every node it depends on.
    ///
    /// Seeds this node's gradient with 1 and propagates in reverse topological
    /// order. Gradients accumulate across calls; they are not reset here.
    ///
    /// # Errors
    /// `CycleDetected` if the graph reachable from this node is not acyclic.
    pub fn backward(&self) -> Result<(), ScalarGradError> {
        if self.is_leaf() {
            log::debug!("backward() called on leaf node {}; only seeding its gradient.", self.id);
        }
        self.graph.backward_from(self.id)
    }
}
