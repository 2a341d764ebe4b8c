use crate::math::matrix::Matrix;

/// Everything one forward pass computed for a single example.
///
/// `activations` holds a_0 (the input) through a_{N-1}; `pre_activations`
/// holds z_1 through z_{N-1}, so `pre_activations[i]` produced
/// `activations[i + 1]`.
#[derive(Debug, Clone)]
pub struct ActivationTrace {
    pub pre_activations: Vec<Matrix>,
    pub activations: Vec<Matrix>,
}

impl ActivationTrace {
    /// Network output a_{N-1}.
    pub fn output(&self) -> &Matrix {
        // forward_trace always pushes the input first.
        &self.activations[self.activations.len() - 1]
    }
}
