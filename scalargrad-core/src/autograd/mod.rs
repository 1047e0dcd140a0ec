// src/autograd/mod.rs

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::Op;
pub use graph::{Checkpoint, Graph, NodeId};
