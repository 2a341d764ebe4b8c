use crate::activation::sigmoid::sigmoid_prime_matrix;
use crate::error::{Error, Result};
use crate::loss::quadratic::QuadraticLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::trace::ActivationTrace;
use crate::train::gradients::Gradients;

/// Gradients of the quadratic cost for one (input, target) pair, together
/// with the trace of the forward pass that produced them.
pub fn backprop(network: &Network, input: &Matrix, target: &Matrix) -> Result<(Gradients, ActivationTrace)> {
    if target.shape() != (network.output_size(), 1) {
        return Err(Error::DimensionMismatch {
            op: "backprop",
            left: (network.output_size(), 1),
            right: target.shape(),
        });
    }

    let trace = network.forward_trace(input)?;
    let layers = network.layers();
    let n = layers.len();

    let mut weights = vec![Matrix::default(); n];
    let mut biases = vec![Matrix::default(); n];

    // δ_{N-1} = (a_{N-1} − y) ⊙ σ'(z_{N-1})
    let error = QuadraticLoss::derivative(trace.output(), target)?;
    let mut delta = error.hadamard(&sigmoid_prime_matrix(&trace.pre_activations[n - 1]))?;

    for i in (0..n).rev() {
        // activations[i] is the input to layers[i].
        weights[i] = delta.dot(&trace.activations[i].transpose())?;
        if i > 0 {
            // δ_l = (W_{l+1}ᵗ · δ_{l+1}) ⊙ σ'(z_l)
            let next = layers[i]
                .weights()
                .transpose()
                .dot(&delta)?
                .hadamard(&sigmoid_prime_matrix(&trace.pre_activations[i - 1]))?;
            biases[i] = std::mem::replace(&mut delta, next);
        } else {
            biases[i] = std::mem::take(&mut delta);
        }
    }

    Ok((Gradients { weights, biases }, trace))
}
