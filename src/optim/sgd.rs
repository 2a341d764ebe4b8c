use crate::error::{Error, Result};
use crate::network::network::Network;
use crate::train::gradients::GradientAccumulator;

/// Plain stochastic gradient descent.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one mini-batch update, P ← P − (η/B)·ΣG, where B is the number
    /// of examples folded into `accumulated`. The accumulator is consumed.
    pub fn step(&self, network: &mut Network, accumulated: GradientAccumulator) -> Result<()> {
        let batch_size = accumulated.examples();
        if batch_size == 0 {
            return Err(Error::InvalidConfig(
                "cannot apply an update from an empty mini-batch".to_owned(),
            ));
        }
        let step = self.learning_rate / batch_size as f64;
        let sum = accumulated.into_sum();
        if sum.num_layers() != network.layers().len() {
            return Err(Error::DimensionMismatch {
                op: "sgd",
                left: (network.layers().len(), 1),
                right: (sum.num_layers(), 1),
            });
        }
        for ((layer, w_grad), b_grad) in network
            .layers_mut()
            .iter_mut()
            .zip(&sum.weights)
            .zip(&sum.biases)
        {
            layer.apply_gradients(w_grad, b_grad, step)?;
        }
        Ok(())
    }
}
