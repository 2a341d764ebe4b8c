use rand::Rng;

use crate::activation::sigmoid::sigmoid_matrix;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// One fully connected sigmoid layer: the weights and biases between
/// layer l-1 (`input_size` units) and layer l (`size` units).
///
/// `weights` is (size, input_size) and `biases` is (size, 1), so that
/// z = W·a + b for a column input a.
#[derive(Debug, Clone)]
pub struct Layer {
    weights: Matrix,
    biases: Matrix,
}

impl Layer {
    /// Draws every weight and bias from N(0, 1).
    pub fn new<R: Rng>(size: usize, input_size: usize, rng: &mut R) -> Result<Layer> {
        let biases = Matrix::standard_normal(size, 1, rng)?;
        let weights = Matrix::standard_normal(size, input_size, rng)?;
        Ok(Layer { weights, biases })
    }

    /// Builds a layer from explicit parameters.
    pub fn from_parts(weights: Matrix, biases: Matrix) -> Result<Layer> {
        if biases.shape() != (weights.rows(), 1) {
            return Err(Error::DimensionMismatch {
                op: "layer",
                left: weights.shape(),
                right: biases.shape(),
            });
        }
        Ok(Layer { weights, biases })
    }

    pub fn size(&self) -> usize {
        self.weights.rows()
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn biases(&self) -> &Matrix {
        &self.biases
    }

    pub fn weights_mut(&mut self) -> &mut Matrix {
        &mut self.weights
    }

    pub fn biases_mut(&mut self) -> &mut Matrix {
        &mut self.biases
    }

    /// z = W·a + b
    pub fn pre_activation(&self, input: &Matrix) -> Result<Matrix> {
        self.weights.dot(input)?.add(&self.biases)
    }

    /// Returns (z, σ(z)) for one column input.
    pub fn feed_from(&self, input: &Matrix) -> Result<(Matrix, Matrix)> {
        let z = self.pre_activation(input)?;
        let a = sigmoid_matrix(&z);
        Ok((z, a))
    }

    /// Subtracts `step` times the given gradients from the parameters.
    pub fn apply_gradients(
        &mut self,
        weights_grad: &Matrix,
        biases_grad: &Matrix,
        step: f64,
    ) -> Result<()> {
        let weights = self.weights.sub(&weights_grad.scale(step))?;
        let biases = self.biases.sub(&biases_grad.scale(step))?;
        self.weights = weights;
        self.biases = biases;
        Ok(())
    }
}
