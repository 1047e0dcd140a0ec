// src/value/mod.rs

use crate::autograd::backward_op::Op;
use crate::autograd::graph::{Graph, NodeId};

mod autograd;
mod debug;
mod ops;
mod traits;

/// A handle to one node of a [`Graph`].
///
/// Copying a `Value` copies the handle, not the node: after `let y = x`, both
/// denote the same node and share its gradient. Operations on values allocate new
/// nodes in the same arena; compound assignment (`x += y`) rebinds the handle to
/// the new node and leaves the old one untouched.
#[derive(Clone, Copy)]
pub struct Value<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Value<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Value { graph, id }
    }

    /// The scalar held by this node.
    pub fn value(&self) -> f64 {
        self.graph.value(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The arena this value lives in.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// The operation that produced this node.
    pub fn op(&self) -> Op {
        self.graph.op(self.id)
    }

    /// Diagnostic label of the producing operation (`"+"`, `"ReLU"`, ...).
    pub fn label(&self) -> String {
        self.op().label()
    }

    /// Handles to the operands this node was derived from, in operand order.
    pub fn parents(&self) -> Vec<Value<'g>> {
        self.op()
            .parents()
            .into_iter()
            .map(|id| Value::new(self.graph, id))
            .collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.op().is_leaf()
    }

    /// Returns `true` if both handles denote the same node of the same graph.
    pub fn ptr_eq(&self, other: &Value<'_>) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.id == other.id
    }
}
