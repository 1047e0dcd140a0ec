//! Scalar reverse-mode automatic differentiation.
//!
//! Values live in a [`Graph`] arena; every operation on them records a node so
//! that [`Value::backward`] can compute exact gradients in one reverse sweep. The
//! [`nn`] module builds neurons, layers and multi-layer perceptrons on top.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod value;

pub use autograd::{Checkpoint, Graph, NodeId, Op};
pub use error::ScalarGradError;
pub use value::Value;
// Re-export so callers can seed the generators passed to `*_with_rng` constructors
pub use rand;
