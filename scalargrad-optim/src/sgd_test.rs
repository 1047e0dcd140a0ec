use super::*;
use approx::assert_relative_eq;
use scalargrad_core::Graph;

#[test]
fn test_sgd_step() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut p1 = graph.leaf(1.0);
    let mut p2 = graph.leaf(-2.0);
    let mut p3 = graph.leaf(5.0);
    let loss = p1 * 10.0 + p2 * (-20.0);
    loss.backward()?;

    let old_p1 = p1;
    let mut optim = Sgd::new(0.1)?;
    optim.step(&mut [&mut p1, &mut p2, &mut p3])?;

    // p = p - lr * grad
    assert_relative_eq!(p1.value(), 0.0);
    assert_relative_eq!(p2.value(), 0.0);
    // No gradient, no movement.
    assert_relative_eq!(p3.value(), 5.0);

    assert!(p1.is_leaf());
    assert!(!p1.ptr_eq(&old_p1), "parameters are rebound to new leaves");
    assert_eq!(old_p1.value(), 1.0);
    assert_eq!(old_p1.grad(), 10.0);
    assert_eq!(p1.grad(), 0.0);
    Ok(())
}

#[test]
fn test_sgd_momentum_accumulates_velocity() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut p = graph.leaf(0.0);
    let mut optim = Sgd::with_momentum(0.1, 0.5)?;

    // d/dp (2p) = 2 on every step.
    (p * 2.0).backward()?;
    optim.step(&mut [&mut p])?;
    assert_relative_eq!(p.value(), -0.2);

    (p * 2.0).backward()?;
    optim.step(&mut [&mut p])?;
    // v = 0.5 * 2 + 2 = 3
    assert_relative_eq!(p.value(), -0.5);
    Ok(())
}

#[test]
fn test_sgd_state_mismatch() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut a = graph.leaf(1.0);
    let mut b = graph.leaf(1.0);
    let mut optim = Sgd::with_momentum(0.1, 0.9)?;
    optim.step(&mut [&mut a, &mut b])?;
    assert_eq!(
        optim.step(&mut [&mut a]),
        Err(ScalarGradError::OptimizerStateMismatch {
            expected: 2,
            actual: 1
        })
    );
    Ok(())
}

#[test]
fn test_sgd_plain_accepts_any_parameter_count() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut a = graph.leaf(1.0);
    let mut b = graph.leaf(1.0);
    let mut optim = Sgd::new(0.1)?;
    optim.step(&mut [&mut a, &mut b])?;
    optim.step(&mut [&mut a])?;
    Ok(())
}

#[test]
fn test_sgd_invalid_hyperparameters() {
    assert_eq!(
        Sgd::new(-0.1).unwrap_err(),
        ScalarGradError::InvalidHyperparameter {
            name: "lr".to_string(),
            value: -0.1
        }
    );
    assert!(Sgd::new(f64::NAN).is_err());
    assert!(Sgd::with_momentum(0.1, 1.0).is_err());
    assert!(Sgd::with_momentum(0.1, -0.5).is_err());

    let mut optim = Sgd::new(0.1).unwrap();
    assert!(optim.set_lr(f64::INFINITY).is_err());
    assert_eq!(optim.lr(), 0.1);
    optim.set_lr(0.01).unwrap();
    assert_eq!(optim.lr(), 0.01);
    assert_eq!(optim.momentum(), 0.0);
}

#[test]
fn test_sgd_zero_grad() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut p1 = graph.leaf(1.0);
    let mut p2 = graph.leaf(2.0);
    (p1 * p2).backward()?;
    assert_eq!(p1.grad(), 2.0);

    let optim = Sgd::new(0.1)?;
    optim.zero_grad(&mut [&mut p1, &mut p2]);
    assert_eq!(p1.grad(), 0.0);
    assert_eq!(p2.grad(), 0.0);
    Ok(())
}

#[test]
fn test_sgd_non_finite_gradient_propagates() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let mut p = graph.leaf(0.0);
    p.pow(-1.0).backward()?;
    let mut optim = Sgd::new(0.1)?;
    optim.step(&mut [&mut p])?;
    assert!(!p.value().is_finite());
    Ok(())
}
