// scalargrad-core/src/nn/losses/mse.rs

use crate::error::ScalarGradError;
use crate::value::Value;
use std::str::FromStr;

/// Specifies the reduction to apply to the summed squared errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    #[default]
    Mean,
    Sum,
}

impl FromStr for Reduction {
    type Err = ScalarGradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Reduction::Mean),
            "sum" => Ok(Reduction::Sum),
            _ => Err(ScalarGradError::UnsupportedReduction(s.to_string())),
        }
    }
}

/// Mean squared error between predictions and constant targets.
///
/// Built entirely from value operations, so its gradient flows through the
/// ordinary reverse pass.
#[derive(Debug, Clone, Default)]
pub struct MseLoss {
    reduction: Reduction,
}

impl MseLoss {
    pub fn new(reduction: Reduction) -> Self {
        MseLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn calculate<'g>(
        &self,
        predictions: &[Value<'g>],
        targets: &[f64],
    ) -> Result<Value<'g>, ScalarGradError> {
        mse_loss(predictions, targets, self.reduction)
    }
}

/// Computes `sum((p - t)^2)`, divided by the element count for `Reduction::Mean`.
///
/// # Errors
/// `LengthMismatch` if the slices differ in length, `EmptyInput` if they are empty.
pub fn mse_loss<'g>(
    predictions: &[Value<'g>],
    targets: &[f64],
    reduction: Reduction,
) -> Result<Value<'g>, ScalarGradError> {
    if predictions.len() != targets.len() {
        return Err(ScalarGradError::LengthMismatch {
            operation: "mse_loss".to_string(),
            expected: targets.len(),
            actual: predictions.len(),
        });
    }

    let mut squared_errors = predictions
        .iter()
        .zip(targets)
        .map(|(p, &t)| (*p - t).pow(2.0));
    let first = squared_errors
        .next()
        .ok_or_else(|| ScalarGradError::EmptyInput {
            operation: "mse_loss".to_string(),
        })?;
    let total = squared_errors.fold(first, |acc, err| acc + err);

    Ok(match reduction {
        Reduction::Sum => total,
        Reduction::Mean => total / predictions.len() as f64,
    })
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
