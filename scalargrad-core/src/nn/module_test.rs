use super::*;
use crate::autograd::graph::Graph;

/// A module computing `scale * x` with a single parameter.
#[derive(Debug)]
struct ScaleModule<'g> {
    scale: Value<'g>,
}

impl<'g> Module<'g> for ScaleModule<'g> {
    type Output = Value<'g>;

    fn forward(&self, inputs: &[Value<'g>]) -> Result<Value<'g>, ScalarGradError> {
        check_input_size("ScaleModule", 1, inputs.len())?;
        Ok(self.scale * inputs[0])
    }

    fn parameters(&self) -> Vec<Value<'g>> {
        vec![self.scale]
    }

    fn named_parameters(&self) -> Vec<(String, Value<'g>)> {
        vec![("scale".to_string(), self.scale)]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value<'g>> {
        vec![&mut self.scale]
    }
}

#[test]
fn test_default_zero_grad() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let module = ScaleModule {
        scale: graph.leaf(3.0),
    };
    let x = graph.leaf(2.0);
    let out = module.forward(&[x])?;
    out.backward()?;
    assert_eq!(module.scale.grad(), 2.0);
    assert_eq!(x.grad(), 3.0);

    module.zero_grad();
    assert_eq!(module.scale.grad(), 0.0);
    // Only parameters are reset.
    assert_eq!(x.grad(), 3.0);
    Ok(())
}

#[test]
fn test_default_num_parameters() {
    let graph = Graph::new();
    let module = ScaleModule {
        scale: graph.leaf(1.0),
    };
    assert_eq!(module.num_parameters(), 1);
}

#[test]
fn test_forward_arity_error() {
    let graph = Graph::new();
    let module = ScaleModule {
        scale: graph.leaf(1.0),
    };
    let inputs = [graph.leaf(1.0), graph.leaf(2.0)];
    assert_eq!(
        module.forward(&inputs).unwrap_err(),
        ScalarGradError::InputSizeMismatch {
            module: "ScaleModule".to_string(),
            expected: 1,
            actual: 2,
        }
    );
}

#[test]
fn test_parameters_mut_rebinds() {
    let graph = Graph::new();
    let mut module = ScaleModule {
        scale: graph.leaf(1.0),
    };
    let original = module.scale;
    for param in module.parameters_mut() {
        *param = graph.leaf(param.value() + 1.0);
    }
    assert!(!module.scale.ptr_eq(&original));
    assert_eq!(module.scale.value(), 2.0);
    assert_eq!(original.value(), 1.0);
}

#[test]
fn test_prefix_names() {
    let graph = Graph::new();
    let p = graph.leaf(0.0);
    let named = prefix_names("layers", 2, vec![("bias".to_string(), p)]);
    assert_eq!(named.len(), 1);
    assert_eq!(named[0].0, "layers.2.bias");
    assert!(named[0].1.ptr_eq(&p));
}
