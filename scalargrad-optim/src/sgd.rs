// scalargrad-optim/src/sgd.rs

use crate::Optimizer;
use scalargrad_core::{ScalarGradError, Value};

/// Implements stochastic gradient descent (optionally with momentum).
///
/// Updates parameters `p` according to the rule:
/// `v = momentum * v + grad(p)`, `p = p - lr * v`
///
/// With a momentum of 0 this is plain `p = p - lr * grad(p)`.
#[derive(Debug, Clone)]
pub struct Sgd {
    lr: f64,
    momentum: f64,
    velocity: Vec<f64>,
}

impl Sgd {
    /// Creates a plain SGD optimizer.
    ///
    /// # Errors
    /// `InvalidHyperparameter` if `lr` is negative or not finite.
    pub fn new(lr: f64) -> Result<Self, ScalarGradError> {
        Self::with_momentum(lr, 0.0)
    }

    /// Creates an SGD optimizer with momentum in `[0, 1)`.
    pub fn with_momentum(lr: f64, momentum: f64) -> Result<Self, ScalarGradError> {
        if !(lr.is_finite() && lr >= 0.0) {
            return Err(ScalarGradError::InvalidHyperparameter {
                name: "lr".to_string(),
                value: lr,
            });
        }
        if !(0.0..1.0).contains(&momentum) {
            return Err(ScalarGradError::InvalidHyperparameter {
                name: "momentum".to_string(),
                value: momentum,
            });
        }
        Ok(Sgd {
            lr,
            momentum,
            velocity: Vec::new(),
        })
    }

    pub fn lr(&self) -> f64 {
        self.lr
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn set_lr(&mut self, lr: f64) -> Result<(), ScalarGradError> {
        if !(lr.is_finite() && lr >= 0.0) {
            return Err(ScalarGradError::InvalidHyperparameter {
                name: "lr".to_string(),
                value: lr,
            });
        }
        self.lr = lr;
        Ok(())
    }
}

impl<'g> Optimizer<'g> for Sgd {
    fn step(&mut self, params: &mut [&mut Value<'g>]) -> Result<(), ScalarGradError> {
        if self.momentum > 0.0 {
            if self.velocity.is_empty() {
                self.velocity = vec![0.0; params.len()];
            } else if self.velocity.len() != params.len() {
                return Err(ScalarGradError::OptimizerStateMismatch {
                    expected: self.velocity.len(),
                    actual: params.len(),
                });
            }
        }
        log::debug!(
            "SGD step over {} parameters (lr={}, momentum={})",
            params.len(),
            self.lr,
            self.momentum
        );

        for (i, param) in params.iter_mut().enumerate() {
            let grad = param.grad();
            if !grad.is_finite() {
                log::warn!("Parameter {} has a non-finite gradient: {}", i, grad);
            }
            let update = if self.momentum > 0.0 {
                let v = &mut self.velocity[i];
                *v = self.momentum * *v + grad;
                *v
            } else {
                grad
            };
            let graph = param.graph();
            **param = graph.leaf(param.value() - self.lr * update);
        }
        Ok(())
    }

    fn zero_grad(&self, params: &mut [&mut Value<'g>]) {
        for param in params {
            param.zero_grad();
        }
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
