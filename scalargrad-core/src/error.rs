use thiserror::Error;

/// Custom error type for the scalargrad engine.
///
/// Arithmetic on values never produces one of these: invalid operations such as
/// `0 / 0` resolve to NaN or infinity and propagate like plain `f64` arithmetic.
/// Only structural problems (graph shape, module arity, configuration) are errors.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum ScalarGradError {
    #[error("Cycle detected in the computation graph at node {node} during backward pass.")]
    CycleDetected { node: usize },

    #[error("Input size mismatch in {module}: expected {expected} inputs, got {actual}")]
    InputSizeMismatch {
        module: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid architecture: {0}")]
    InvalidArchitecture(String),

    #[error("Invalid initialisation range: [{low}, {high}]")]
    InvalidInitRange { low: f64, high: f64 },

    #[error("Operation {operation} received no inputs")]
    EmptyInput { operation: String },

    #[error("Length mismatch during {operation}: expected {expected}, got {actual}")]
    LengthMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported reduction type: {0}")]
    UnsupportedReduction(String),

    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: String, value: f64 },

    #[error("Checkpoint at {checkpoint} nodes is beyond the current graph length {len}")]
    InvalidCheckpoint { checkpoint: usize, len: usize },

    #[error("Optimizer state tracks {expected} parameters, but {actual} were given")]
    OptimizerStateMismatch { expected: usize, actual: usize },
}
