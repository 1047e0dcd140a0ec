use crate::autograd::graph::{Node, NodeId};
use std::fmt;

/// The operation that produced a node, together with its operands.
///
/// This is the node's local backward rule: during the reverse pass the graph
/// dispatches on the variant to route the node's gradient to its parents.
/// Derived operations (negation, subtraction, division) have no variant of their
/// own; they are built from these and reuse their rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Input constant or trainable parameter. No parents, no rule.
    Leaf,
    Add(NodeId, NodeId),
    /// `x + c` for a constant `c`.
    AddScalar(NodeId),
    Mul(NodeId, NodeId),
    /// `x * c` for a constant `c`.
    MulScalar(NodeId, f64),
    /// `x ** p` for a constant exponent `p`.
    Pow(NodeId, f64),
    Exp(NodeId),
    Relu(NodeId),
}

impl Op {
    /// Returns the operand ids, in operand order.
    pub fn parents(&self) -> Vec<NodeId> {
        (0..).map_while(|position| self.parent(position)).collect()
    }

    /// Returns the operand at `position`, if the op has that many.
    pub fn parent(&self, position: usize) -> Option<NodeId> {
        match (*self, position) {
            (Op::Add(x, _) | Op::Mul(x, _), 0) => Some(x),
            (Op::Add(_, y) | Op::Mul(_, y), 1) => Some(y),
            (
                Op::AddScalar(x) | Op::MulScalar(x, _) | Op::Pow(x, _) | Op::Exp(x) | Op::Relu(x),
                0,
            ) => Some(x),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Op::Leaf)
    }

    /// Diagnostic tag. Not used in any computation.
    pub fn label(&self) -> String {
        match self {
            Op::Leaf => String::new(),
            Op::Add(..) | Op::AddScalar(..) => "+".to_string(),
            Op::Mul(..) | Op::MulScalar(..) => "*".to_string(),
            Op::Pow(_, p) => format!("**{}", p),
            Op::Exp(..) => "exp".to_string(),
            Op::Relu(..) => "ReLU".to_string(),
        }
    }

    /// Adds this node's contribution to each parent's gradient.
    ///
    /// `out_value` and `out_grad` belong to the node carrying this op; `out_grad`
    /// must already hold the sum of every contribution from the node's children.
    /// Parents are accumulated into, never assigned, so an operand used twice
    /// (`x * x`) receives both contributions.
    pub(crate) fn backward(&self, out_value: f64, out_grad: f64, nodes: &mut [Node]) {
        match *self {
            Op::Leaf => {}
            Op::Add(x, y) => {
                nodes[x.index()].grad += out_grad;
                nodes[y.index()].grad += out_grad;
            }
            Op::AddScalar(x) => {
                nodes[x.index()].grad += out_grad;
            }
            Op::Mul(x, y) => {
                // Read both operands before writing either: x and y may alias.
                let x_value = nodes[x.index()].value;
                let y_value = nodes[y.index()].value;
                nodes[x.index()].grad += out_grad * y_value;
                nodes[y.index()].grad += out_grad * x_value;
            }
            Op::MulScalar(x, c) => {
                nodes[x.index()].grad += out_grad * c;
            }
            Op::Pow(x, p) => {
                let x_value = nodes[x.index()].value;
                nodes[x.index()].grad += out_grad * p * x_value.powf(p - 1.0);
            }
            Op::Exp(x) => {
                nodes[x.index()].grad += out_grad * out_value;
            }
            Op::Relu(x) => {
                // Hard gate: the boundary at exactly 0 counts as inactive.
                let gate = if out_value > 0.0 { 1.0 } else { 0.0 };
                nodes[x.index()].grad += out_grad * gate;
            }
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
#[path = "backward_op_test.rs"]
mod tests;
