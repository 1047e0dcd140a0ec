use rand::rngs::StdRng;
use rand::SeedableRng;
use scalargrad_core::nn::{mse_loss, Mlp, Module, Reduction};
use scalargrad_core::{Graph, ScalarGradError, Value};
use scalargrad_optim::{Optimizer, Sgd};

fn epoch_loss<'g>(graph: &'g Graph, mlp: &Mlp<'g>) -> Result<Value<'g>, ScalarGradError> {
    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];
    let mut preds = Vec::with_capacity(xs.len());
    for x in &xs {
        let inputs: Vec<Value<'g>> = x.iter().map(|&v| graph.leaf(v)).collect();
        preds.push(mlp.forward(&inputs)?[0]);
    }
    mse_loss(&preds, &ys, Reduction::Mean)
}

#[test]
fn test_sgd_with_momentum_trains_mlp() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut mlp = Mlp::with_rng(&graph, 3, &[4, 4, 1], &mut StdRng::seed_from_u64(2024))?;
    let mut optim = Sgd::with_momentum(0.005, 0.5)?;

    let checkpoint = graph.checkpoint();
    let initial = epoch_loss(&graph, &mlp)?.value();
    let mut last = initial;
    for _ in 0..40 {
        let loss = epoch_loss(&graph, &mlp)?;
        optim.zero_grad(&mut mlp.parameters_mut());
        loss.backward()?;
        optim.step(&mut mlp.parameters_mut())?;
        last = loss.value();
        graph.truncate(checkpoint, &mut mlp.parameters_mut())?;
    }
    assert!(last < initial, "loss went from {} to {}", initial, last);
    Ok(())
}

#[test]
fn test_step_keeps_graph_history() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut mlp = Mlp::with_rng(&graph, 3, &[2, 1], &mut StdRng::seed_from_u64(1))?;
    let before = mlp.parameters();
    let mut optim = Sgd::new(0.1)?;

    let loss = epoch_loss(&graph, &mlp)?;
    loss.backward()?;
    let nodes = graph.len();
    optim.step(&mut mlp.parameters_mut())?;

    let after = mlp.parameters();
    assert_eq!(graph.len(), nodes + after.len(), "one fresh leaf per parameter");
    for (old, new) in before.iter().zip(&after) {
        assert!(!old.ptr_eq(new));
        approx::assert_relative_eq!(new.value(), old.value() - 0.1 * old.grad());
    }
    Ok(())
}

#[test]
fn test_truncate_bounds_graph_across_steps() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut mlp = Mlp::with_rng(&graph, 3, &[4, 4, 1], &mut StdRng::seed_from_u64(7))?;
    let mut optim = Sgd::new(0.01)?;
    let checkpoint = graph.checkpoint();

    let mut sizes = Vec::new();
    for _ in 0..200 {
        let loss = epoch_loss(&graph, &mlp)?;
        optim.zero_grad(&mut mlp.parameters_mut());
        loss.backward()?;
        optim.step(&mut mlp.parameters_mut())?;
        graph.truncate(checkpoint, &mut mlp.parameters_mut())?;
        sizes.push(graph.len());
    }
    let bound = checkpoint.node_count() + mlp.num_parameters();
    assert!(sizes.iter().all(|&len| len == bound), "arena grew: {:?}", sizes);

    // The model still trains on the re-leafed parameters.
    let loss = epoch_loss(&graph, &mlp)?;
    loss.backward()?;
    assert!(mlp.parameters().iter().any(|p| p.grad() != 0.0));
    Ok(())
}
