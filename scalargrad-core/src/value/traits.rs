// src/value/traits.rs
//
// Operator sugar over the named operations in `ops.rs`. Compound assignment
// rebinds the handle to the node built by the binary operation.

use crate::value::Value;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// --- Add ---

impl<'g> Add for Value<'g> {
    type Output = Value<'g>;

    fn add(self, rhs: Value<'g>) -> Value<'g> {
        Value::add(self, rhs)
    }
}

impl<'g> Add<f64> for Value<'g> {
    type Output = Value<'g>;

    fn add(self, rhs: f64) -> Value<'g> {
        self.add_scalar(rhs)
    }
}

impl<'g> Add<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn add(self, rhs: Value<'g>) -> Value<'g> {
        rhs.add_scalar(self)
    }
}

// --- Sub ---

impl<'g> Sub for Value<'g> {
    type Output = Value<'g>;

    fn sub(self, rhs: Value<'g>) -> Value<'g> {
        Value::sub(self, rhs)
    }
}

impl<'g> Sub<f64> for Value<'g> {
    type Output = Value<'g>;

    fn sub(self, rhs: f64) -> Value<'g> {
        self.sub_scalar(rhs)
    }
}

impl<'g> Sub<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn sub(self, rhs: Value<'g>) -> Value<'g> {
        rhs.rsub_scalar(self)
    }
}

// --- Mul ---

impl<'g> Mul for Value<'g> {
    type Output = Value<'g>;

    fn mul(self, rhs: Value<'g>) -> Value<'g> {
        Value::mul(self, rhs)
    }
}

impl<'g> Mul<f64> for Value<'g> {
    type Output = Value<'g>;

    fn mul(self, rhs: f64) -> Value<'g> {
        self.mul_scalar(rhs)
    }
}

impl<'g> Mul<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn mul(self, rhs: Value<'g>) -> Value<'g> {
        rhs.mul_scalar(self)
    }
}

// --- Div ---

impl<'g> Div for Value<'g> {
    type Output = Value<'g>;

    fn div(self, rhs: Value<'g>) -> Value<'g> {
        Value::div(self, rhs)
    }
}

impl<'g> Div<f64> for Value<'g> {
    type Output = Value<'g>;

    fn div(self, rhs: f64) -> Value<'g> {
        self.div_scalar(rhs)
    }
}

impl<'g> Div<Value<'g>> for f64 {
    type Output = Value<'g>;

    fn div(self, rhs: Value<'g>) -> Value<'g> {
        rhs.rdiv_scalar(self)
    }
}

// --- Neg ---

impl<'g> Neg for Value<'g> {
    type Output = Value<'g>;

    fn neg(self) -> Value<'g> {
        Value::neg(self)
    }
}

// --- Compound assignment ---

impl<'g> AddAssign for Value<'g> {
    fn add_assign(&mut self, rhs: Value<'g>) {
        *self = Value::add(*self, rhs);
    }
}

impl<'g> AddAssign<f64> for Value<'g> {
    fn add_assign(&mut self, rhs: f64) {
        *self = self.add_scalar(rhs);
    }
}

impl<'g> SubAssign for Value<'g> {
    fn sub_assign(&mut self, rhs: Value<'g>) {
        *self = Value::sub(*self, rhs);
    }
}

impl<'g> SubAssign<f64> for Value<'g> {
    fn sub_assign(&mut self, rhs: f64) {
        *self = self.sub_scalar(rhs);
    }
}

impl<'g> MulAssign for Value<'g> {
    fn mul_assign(&mut self, rhs: Value<'g>) {
        *self = Value::mul(*self, rhs);
    }
}

impl<'g> MulAssign<f64> for Value<'g> {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.mul_scalar(rhs);
    }
}

impl<'g> DivAssign for Value<'g> {
    fn div_assign(&mut self, rhs: Value<'g>) {
        *self = Value::div(*self, rhs);
    }
}

impl<'g> DivAssign<f64> for Value<'g> {
    fn div_assign(&mut self, rhs: f64) {
        *self = self.div_scalar(rhs);
    }
}
