use crate::error::Result;
use crate::math::matrix::Matrix;

/// Quadratic cost C = ½‖a − y‖² for one example.
pub struct QuadraticLoss;

impl QuadraticLoss {
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> Result<f64> {
        let diff = predicted.sub(expected)?;
        Ok(0.5 * diff.inner(&diff)?)
    }

    /// ∂C/∂a = a − y
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Result<Matrix> {
        predicted.sub(expected)
    }
}
