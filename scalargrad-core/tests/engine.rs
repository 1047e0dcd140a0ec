use approx::assert_relative_eq;
use scalargrad_core::autograd::grad_check::{check_grad, GradCheckError};
use scalargrad_core::nn::{Mlp, Module};
use scalargrad_core::{Graph, NodeId, Op, ScalarGradError};
use std::collections::HashSet;

mod common;
use common::{init_logger, seeded_rng};

#[test]
fn test_reference_scenario_through_public_api() -> Result<(), ScalarGradError> {
    init_logger();
    let graph = Graph::new();
    let a = graph.leaf(-4.0);
    let b = graph.leaf(2.0);
    let mut c = a + b;
    let mut d = a * b + b.pow(3.0);
    c += c + 1.0;
    c += 1.0 + c + (-a);
    d += d * 2.0 + (b + a).relu();
    d += 3.0 * d + (b - a).relu();
    let e = c - d;
    let f = e.pow(2.0);
    let mut g = f / 2.0;
    g += 10.0 / f;
    g.backward()?;

    assert_relative_eq!(g.value(), 24.70408163265306, epsilon = 1e-6);
    assert_relative_eq!(a.grad(), 138.83381924198252, epsilon = 1e-6);
    assert_relative_eq!(b.grad(), 645.5772594752186, epsilon = 1e-6);
    assert_eq!(g.grad(), 1.0);
    Ok(())
}

#[test]
fn test_every_node_in_order_follows_its_parents() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.leaf(0.3);
    let y = graph.leaf(-1.2);
    let out = ((x * y).exp() + x.pow(2.0) - y / x).relu() * 4.0;

    let order = graph.topological_sort(out)?;
    assert_eq!(order.last(), Some(&out.id()));
    let position = |id: NodeId| order.iter().position(|n| *n == id);

    let mut pending = vec![out];
    let mut reached = HashSet::new();
    while let Some(node) = pending.pop() {
        let node_position = position(node.id()).expect("reachable node missing from order");
        for parent in node.parents() {
            let parent_position = position(parent.id()).expect("parent missing from order");
            assert!(
                parent_position < node_position,
                "parent {} must precede {}",
                parent.id(),
                node.id()
            );
            pending.push(parent);
        }
        reached.insert(node.id());
    }
    assert_eq!(reached.len(), order.len(), "order holds exactly the reachable nodes");
    assert!(matches!(x.op(), Op::Leaf));
    Ok(())
}

#[test]
fn test_repeated_backward_accumulates() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let x = graph.leaf(3.0);
    let y = x * x + x;
    y.backward()?;
    let once = x.grad();
    y.backward()?;
    // The root is re-seeded to 1 but everything below keeps accumulating.
    assert_eq!(y.grad(), 1.0);
    assert!(x.grad() > once);

    graph.zero_grad();
    y.backward()?;
    assert_eq!(x.grad(), once);
    Ok(())
}

#[test]
fn test_mlp_gradients_match_finite_differences() -> Result<(), GradCheckError> {
    init_logger();
    let graph = Graph::new();
    let mlp = Mlp::with_rng(&graph, 3, &[4, 4, 1], &mut seeded_rng(17))?;
    check_grad(
        &graph,
        |xs| {
            let out = mlp.forward(xs)?;
            Ok(out[0].pow(2.0))
        },
        &[0.7, -1.3, 2.1],
        1e-6,
        1e-5,
        1e-4,
    )
}
