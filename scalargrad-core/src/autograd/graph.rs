use crate::autograd::backward_op::Op;
use crate::error::ScalarGradError;
use crate::value::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;

/// Stable identity of a node inside one [`Graph`].
///
/// Ids are dense indices into the arena, tagged with the arena generation the
/// node was allocated in. A node's parents always carry strictly smaller
/// indices than the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u64,
}

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Position of the node in its arena.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// A node of the computation graph. Only `grad` changes after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
    pub(crate) generation: u64,
}

/// A position in a [`Graph`] to truncate back to, from [`Graph::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of nodes the graph held when the checkpoint was taken.
    pub fn node_count(&self) -> usize {
        self.0
    }
}

/// Append-only arena owning every node of a computation graph.
///
/// [`Value`] handles borrow the graph, so nodes live as long as the arena unless
/// they are dropped with [`Graph::truncate`]. The arena uses interior mutability
/// and is not `Sync`: a graph and all of its values stay on one thread, and
/// independent graphs can be built on different threads without sharing anything.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: RefCell<Vec<Node>>,
    // Bumped by every truncate so handles to dropped nodes can be told apart
    // from the nodes reusing their slots.
    generation: Cell<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Returns the slot of `id`, panicking if it does not name a live node.
fn live_index(nodes: &[Node], id: NodeId) -> usize {
    match nodes.get(id.index) {
        Some(node) if node.generation == id.generation => id.index,
        _ => panic!(
            "node {} is not live in this graph (dropped by a truncate or from another graph)",
            id
        ),
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: RefCell::new(Vec::with_capacity(capacity)),
            generation: Cell::new(0),
        }
    }

    /// Creates a leaf node holding `value` and returns a handle to it.
    pub fn leaf(&self, value: f64) -> Value<'_> {
        let id = self.push(value, Op::Leaf);
        Value::new(self, id)
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Resets the gradient of every node in the arena to 0.
    pub fn zero_grad(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Marks the current end of the arena. Pass it to [`Graph::truncate`] to drop
    /// everything allocated afterwards.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.len())
    }

    /// Drops every node allocated after `checkpoint`.
    ///
    /// Handles in `keep` that point at dropped nodes are rebound to fresh leaves
    /// holding the same value and a zero gradient; handles to the same node stay
    /// aliased. Kept handles below the checkpoint are left as they are. A training
    /// loop takes a checkpoint once the model is built and truncates after each
    /// optimizer step, keeping the parameters, so the arena stays bounded:
    ///
    /// ```ignore
    /// let checkpoint = graph.checkpoint();
    /// for _ in 0..epochs {
    ///     // forward, backward, optimizer step
    ///     graph.truncate(checkpoint, &mut model.parameters_mut())?;
    /// }
    /// ```
    ///
    /// Any other handle to a dropped node becomes stale; using it panics.
    ///
    /// # Errors
    /// `InvalidCheckpoint` if the graph is already shorter than `checkpoint`.
    ///
    /// # Panics
    /// If a handle in `keep` belongs to another graph or is already stale.
    pub fn truncate<'g>(
        &'g self,
        checkpoint: Checkpoint,
        keep: &mut [&mut Value<'g>],
    ) -> Result<(), ScalarGradError> {
        let len = self.len();
        if checkpoint.0 > len {
            return Err(ScalarGradError::InvalidCheckpoint {
                checkpoint: checkpoint.0,
                len,
            });
        }
        let saved: Vec<Option<f64>> = keep
            .iter()
            .map(|value| {
                assert!(
                    std::ptr::eq(self, value.graph()),
                    "truncate: kept node {} belongs to a different graph",
                    value.id()
                );
                (value.id().index >= checkpoint.0).then(|| value.value())
            })
            .collect();

        self.nodes.borrow_mut().truncate(checkpoint.0);
        self.generation.set(self.generation.get() + 1);

        let mut rebound: HashMap<NodeId, Value<'g>> = HashMap::new();
        for (value, saved) in keep.iter_mut().zip(saved) {
            if let Some(data) = saved {
                let fresh = *rebound
                    .entry(value.id())
                    .or_insert_with(|| self.leaf(data));
                **value = fresh;
            }
        }
        log::debug!(
            "truncate: dropped {} nodes, re-leafed {}",
            len - checkpoint.0,
            rebound.len()
        );
        Ok(())
    }

    pub(crate) fn push(&self, value: f64, op: Op) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId {
            index: nodes.len(),
            generation: self.generation.get(),
        };
        debug_assert!(
            op.parents().iter().all(|parent| parent.index < id.index),
            "parents must be allocated before their children"
        );
        nodes.push(Node {
            value,
            grad: 0.0,
            op,
            generation: id.generation,
        });
        id
    }

    fn node(&self, id: NodeId) -> Node {
        let nodes = self.nodes.borrow();
        nodes[live_index(&nodes, id)]
    }

    pub(crate) fn value(&self, id: NodeId) -> f64 {
        self.node(id).value
    }

    pub(crate) fn grad(&self, id: NodeId) -> f64 {
        self.node(id).grad
    }

    pub(crate) fn op(&self, id: NodeId) -> Op {
        self.node(id).op
    }

    pub(crate) fn set_grad(&self, id: NodeId, grad: f64) {
        let mut nodes = self.nodes.borrow_mut();
        let index = live_index(&nodes, id);
        nodes[index].grad = grad;
    }

    /// Orders every node reachable from `root` so that parents come before the
    /// nodes derived from them. `root` is always last.
    ///
    /// # Errors
    /// `CycleDetected` if a node is reached again while it is still being expanded.
    ///
    /// # Panics
    /// If `root` belongs to another graph or is stale.
    pub fn topological_sort(&self, root: Value<'_>) -> Result<Vec<NodeId>, ScalarGradError> {
        self.check_owned(&root, "topological_sort");
        self.topological_order(root.id())
    }

    /// Computes d(root)/d(n) for every node `n` reachable from `root`.
    ///
    /// Gradients are accumulated on top of whatever the nodes already hold; call
    /// [`Graph::zero_grad`] (or `zero_grad` on the relevant values) between passes.
    /// Values are never modified.
    ///
    /// # Panics
    /// If `root` belongs to another graph or is stale.
    pub fn backward(&self, root: Value<'_>) -> Result<(), ScalarGradError> {
        self.check_owned(&root, "backward");
        self.backward_from(root.id())
    }

    fn check_owned(&self, value: &Value<'_>, operation: &str) {
        assert!(
            std::ptr::eq(self, value.graph()),
            "{}: node {} belongs to a different graph",
            operation,
            value.id()
        );
    }

    /// Depth-first with an explicit stack, so long chains cannot overflow the call
    /// stack. Each node is emitted once, however many paths lead to it.
    pub(crate) fn topological_order(&self, root: NodeId) -> Result<Vec<NodeId>, ScalarGradError> {
        let nodes = self.nodes.borrow();
        let root_index = live_index(&nodes, root);
        let mut marks = vec![Mark::Unvisited; nodes.len()];
        let mut order = Vec::new();
        // Each frame holds a node and the position of the next parent to expand.
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        marks[root_index] = Mark::OnStack;

        while let Some(frame) = stack.last_mut() {
            let (node, position) = *frame;
            match nodes[node.index].op.parent(position) {
                Some(parent) => {
                    frame.1 += 1;
                    match marks[parent.index] {
                        Mark::Unvisited => {
                            log::trace!("[topological_sort] {} -> parent {}", node, parent);
                            marks[parent.index] = Mark::OnStack;
                            stack.push((parent, 0));
                        }
                        Mark::OnStack => {
                            return Err(ScalarGradError::CycleDetected {
                                node: parent.index,
                            });
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node.index] = Mark::Done;
                    order.push(node);
                    stack.pop();
                }
            }
        }
        Ok(order)
    }

    pub(crate) fn backward_from(&self, root: NodeId) -> Result<(), ScalarGradError> {
        let order = self.topological_order(root)?;
        log::debug!(
            "backward from node {}: {} nodes in topological order",
            root,
            order.len()
        );

        let mut nodes = self.nodes.borrow_mut();
        nodes[root.index].grad = 1.0;
        for id in order.iter().rev() {
            let Node {
                value, grad, op, ..
            } = nodes[id.index];
            if op.is_leaf() {
                continue;
            }
            op.backward(value, grad, nodes.as_mut_slice());
        }
        Ok(())
    }
}

#[cfg(test)]
impl Graph {
    /// Appends a node without the ordering check. Only for building broken graphs
    /// in tests.
    pub(crate) fn push_unchecked(&self, value: f64, op: Op) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId {
            index: nodes.len(),
            generation: self.generation.get(),
        };
        nodes.push(Node {
            value,
            grad: 0.0,
            op,
            generation: id.generation,
        });
        id
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
