// src/value/ops.rs

use crate::autograd::backward_op::Op;
use crate::value::Value;

/// Forward implementations of every differentiable operation.
///
/// Primitive operations compute the forward value, allocate the result node and
/// record the `Op` carrying the local backward rule. Negation, subtraction and
/// division are compositions of primitives and reuse their rules.
///
/// Binary operations panic if the operands belong to different graphs.
impl<'g> Value<'g> {
    fn push(&self, value: f64, op: Op) -> Value<'g> {
        Value::new(self.graph, self.graph.push(value, op))
    }

    fn check_same_graph(&self, other: &Value<'g>, operation: &str) {
        assert!(
            std::ptr::eq(self.graph, other.graph),
            "{}: operands {} and {} belong to different graphs",
            operation,
            self.id,
            other.id
        );
    }

    pub fn add(self, other: Value<'g>) -> Value<'g> {
        self.check_same_graph(&other, "add");
        self.push(self.value() + other.value(), Op::Add(self.id, other.id))
    }

    pub fn add_scalar(self, scalar: f64) -> Value<'g> {
        self.push(self.value() + scalar, Op::AddScalar(self.id))
    }

    pub fn mul(self, other: Value<'g>) -> Value<'g> {
        self.check_same_graph(&other, "mul");
        self.push(self.value() * other.value(), Op::Mul(self.id, other.id))
    }

    pub fn mul_scalar(self, scalar: f64) -> Value<'g> {
        self.push(self.value() * scalar, Op::MulScalar(self.id, scalar))
    }

    /// Raises to a constant power. A negative base with a fractional exponent
    /// yields NaN, as with `f64::powf`.
    pub fn pow(self, exponent: f64) -> Value<'g> {
        self.push(self.value().powf(exponent), Op::Pow(self.id, exponent))
    }

    pub fn exp(self) -> Value<'g> {
        self.push(self.value().exp(), Op::Exp(self.id))
    }

    /// `max(0, x)`.
    pub fn relu(self) -> Value<'g> {
        let x = self.value();
        let out = if x > 0.0 { x } else { 0.0 };
        self.push(out, Op::Relu(self.id))
    }

    /// `x * -1`.
    pub fn neg(self) -> Value<'g> {
        self.mul_scalar(-1.0)
    }

    /// `x + (-y)`.
    pub fn sub(self, other: Value<'g>) -> Value<'g> {
        self.check_same_graph(&other, "sub");
        self.add(other.neg())
    }

    /// `x + (-c)`.
    pub fn sub_scalar(self, scalar: f64) -> Value<'g> {
        self.add_scalar(-scalar)
    }

    /// `c - x`, with `c` entered as a constant leaf.
    pub fn rsub_scalar(self, scalar: f64) -> Value<'g> {
        self.graph.leaf(scalar).sub(self)
    }

    /// `x * y**-1`. Dividing by a node holding 0 yields infinities or NaN.
    pub fn div(self, other: Value<'g>) -> Value<'g> {
        self.check_same_graph(&other, "div");
        self.mul(other.pow(-1.0))
    }

    /// `x * c**-1`.
    pub fn div_scalar(self, scalar: f64) -> Value<'g> {
        self.mul_scalar(scalar.powi(-1))
    }

    /// `c / x`, with `c` entered as a constant leaf.
    pub fn rdiv_scalar(self, scalar: f64) -> Value<'g> {
        self.graph.leaf(scalar).div(self)
    }
}
