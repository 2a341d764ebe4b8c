use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::network::Network;

/// Per-layer weight and bias gradients, shaped exactly like the network's
/// parameters.
#[derive(Debug, Clone)]
pub struct Gradients {
    pub weights: Vec<Matrix>,
    pub biases: Vec<Matrix>,
}

impl Gradients {
    /// Zero gradients matching every parameter of `network`.
    pub fn zeros_like(network: &Network) -> Result<Gradients> {
        let mut weights = Vec::with_capacity(network.layers().len());
        let mut biases = Vec::with_capacity(network.layers().len());
        for layer in network.layers() {
            let (wr, wc) = layer.weights().shape();
            let (br, bc) = layer.biases().shape();
            weights.push(Matrix::try_zeros(wr, wc)?);
            biases.push(Matrix::try_zeros(br, bc)?);
        }
        Ok(Gradients { weights, biases })
    }

    pub fn num_layers(&self) -> usize {
        self.weights.len()
    }

    /// Folds `other` into `self`, layer by layer. Shapes are checked for
    /// every layer before anything is added.
    pub fn add_assign(&mut self, other: &Gradients) -> Result<()> {
        self.check_compatible(other)?;
        for (a, b) in self.weights.iter_mut().zip(&other.weights) {
            a.add_assign(b)?;
        }
        for (a, b) in self.biases.iter_mut().zip(&other.biases) {
            a.add_assign(b)?;
        }
        Ok(())
    }

    /// Element-wise sum, layer by layer.
    pub fn add(&self, other: &Gradients) -> Result<Gradients> {
        if self.num_layers() != other.num_layers() {
            return Err(Error::DimensionMismatch {
                op: "gradients",
                left: (self.num_layers(), 1),
                right: (other.num_layers(), 1),
            });
        }
        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| a.add(b))
            .collect::<Result<Vec<_>>>()?;
        let biases = self
            .biases
            .iter()
            .zip(&other.biases)
            .map(|(a, b)| a.add(b))
            .collect::<Result<Vec<_>>>()?;
        Ok(Gradients { weights, biases })
    }

    fn check_compatible(&self, other: &Gradients) -> Result<()> {
        if self.num_layers() != other.num_layers() {
            return Err(Error::DimensionMismatch {
                op: "gradients",
                left: (self.num_layers(), 1),
                right: (other.num_layers(), 1),
            });
        }
        let pairs = self
            .weights
            .iter()
            .zip(&other.weights)
            .chain(self.biases.iter().zip(&other.biases));
        for (a, b) in pairs {
            if a.shape() != b.shape() {
                return Err(Error::DimensionMismatch {
                    op: "gradients",
                    left: a.shape(),
                    right: b.shape(),
                });
            }
        }
        Ok(())
    }
}

/// Running sum of per-example gradients over one mini-batch.
///
/// Created zeroed at the start of a batch and consumed by `Sgd::step`.
#[derive(Debug)]
pub struct GradientAccumulator {
    sum: Gradients,
    examples: usize,
}

impl GradientAccumulator {
    pub fn new(network: &Network) -> Result<GradientAccumulator> {
        Ok(GradientAccumulator {
            sum: Gradients::zeros_like(network)?,
            examples: 0,
        })
    }

    /// Adds one example's gradients. No averaging happens here.
    pub fn accumulate(&mut self, gradients: &Gradients) -> Result<()> {
        self.sum.add_assign(gradients)?;
        self.examples += 1;
        Ok(())
    }

    pub fn examples(&self) -> usize {
        self.examples
    }

    pub fn sum(&self) -> &Gradients {
        &self.sum
    }

    pub fn into_sum(self) -> Gradients {
        self.sum
    }
}
