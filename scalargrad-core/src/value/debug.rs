use crate::value::Value;
use std::fmt;

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.op();
        if op.is_leaf() {
            write!(f, "Value(data={}, grad={})", self.value(), self.grad())
        } else {
            write!(
                f,
                "Value(data={}, grad={}, op={})",
                self.value(),
                self.grad(),
                op
            )
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}
