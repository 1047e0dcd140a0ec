//! # Training a small MLP
//!
//! Builds the classic four-sample toy problem, trains a 3 -> 4 -> 4 -> 1
//! perceptron with plain gradient descent and prints the loss as it goes.
//! The graph is truncated after every update, so its size stays constant.
//!
//! Run with:
//! `RUST_LOG=debug cargo run --example train_mlp`

use scalargrad_core::nn::{mse_loss, Mlp, Module, Reduction};
use scalargrad_core::rand::rngs::StdRng;
use scalargrad_core::rand::SeedableRng;
use scalargrad_core::{Graph, ScalarGradError, Value};

fn main() -> Result<(), ScalarGradError> {
    env_logger::init();

    let xs = [
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = [1.0, -1.0, -1.0, 1.0];

    let graph = Graph::new();
    let mut mlp = Mlp::with_rng(&graph, 3, &[4, 4, 1], &mut StdRng::seed_from_u64(42))?;
    println!("MLP with {} parameters", mlp.num_parameters());

    let learning_rate = 0.01;
    // Everything past this point is rebuilt each epoch.
    let checkpoint = graph.checkpoint();
    for epoch in 0..50 {
        let mut preds = Vec::with_capacity(xs.len());
        for x in &xs {
            let inputs: Vec<Value> = x.iter().map(|&v| graph.leaf(v)).collect();
            preds.push(mlp.forward(&inputs)?[0]);
        }
        let loss = mse_loss(&preds, &ys, Reduction::Mean)?;

        mlp.zero_grad();
        loss.backward()?;
        for param in mlp.parameters_mut() {
            *param = graph.leaf(param.value() - learning_rate * param.grad());
        }

        if epoch % 10 == 0 {
            println!("Epoch {:>2}: loss = {:.6} ({} nodes)", epoch, loss, graph.len());
        }
        graph.truncate(checkpoint, &mut mlp.parameters_mut())?;
    }

    for x in &xs {
        let inputs: Vec<Value> = x.iter().map(|&v| graph.leaf(v)).collect();
        println!("{:?} -> {:.4}", x, mlp.forward(&inputs)?[0]);
    }
    Ok(())
}
