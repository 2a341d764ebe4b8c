use crate::math::matrix::Matrix;

/// Logistic sigmoid, 1 / (1 + e^-x).
///
/// Evaluated in the form whose exponent is never positive, so neither branch
/// overflows for large |x|. The result is clamped so it stays strictly inside
/// (0, 1) where f64 would otherwise round to exactly 0 or 1.
pub fn sigmoid(x: f64) -> f64 {
    let s = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    s.clamp(f64::MIN_POSITIVE, 1.0 - f64::EPSILON)
}

/// Derivative of the sigmoid: σ(x)(1 − σ(x)).
pub fn sigmoid_prime(x: f64) -> f64 {
    let s = sigmoid(x);
    s * (1.0 - s)
}

/// Element-wise sigmoid over a matrix.
pub fn sigmoid_matrix(z: &Matrix) -> Matrix {
    z.map(sigmoid)
}

/// Element-wise sigmoid derivative over a matrix.
pub fn sigmoid_prime_matrix(z: &Matrix) -> Matrix {
    z.map(sigmoid_prime)
}
