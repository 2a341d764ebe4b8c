// Tests for backpropagation, gradient accumulation and the SGD update.

use approx::assert_abs_diff_eq;
use sigmoid_digits::train::{backprop, GradientAccumulator, Gradients};
use sigmoid_digits::{sigmoid_prime, Error, Layer, Matrix, Network, Sgd};

#[test]
fn gradients_mirror_parameter_shapes() {
    let network = Network::with_seed(&[4, 6, 3], 2).unwrap();
    let input = Matrix::column(vec![0.1, 0.2, 0.3, 0.4]);
    let target = Matrix::column(vec![0.0, 1.0, 0.0]);
    let (gradients, trace) = backprop(&network, &input, &target).unwrap();

    assert_eq!(gradients.num_layers(), 2);
    for ((layer, w), b) in network.layers().iter().zip(&gradients.weights).zip(&gradients.biases) {
        assert_eq!(w.shape(), layer.weights().shape());
        assert_eq!(b.shape(), layer.biases().shape());
    }
    assert_eq!(trace.activations.len(), 3);
}

#[test]
fn single_layer_gradient_matches_formula() {
    // One sigmoid unit: δ = (a − y)σ'(z), dW = δ·xᵗ, db = δ.
    let layer = Layer::from_parts(
        Matrix::from_vec(1, 2, vec![0.4, -0.7]).unwrap(),
        Matrix::column(vec![0.1]),
    )
    .unwrap();
    let network = Network::from_layers(vec![layer]).unwrap();
    let input = Matrix::column(vec![0.5, 1.0]);
    let target = Matrix::column(vec![1.0]);

    let z: f64 = 0.4 * 0.5 - 0.7 * 1.0 + 0.1;
    let a = sigmoid_digits::sigmoid(z);
    let delta = (a - 1.0) * sigmoid_prime(z);

    let (gradients, _) = backprop(&network, &input, &target).unwrap();
    assert_abs_diff_eq!(gradients.biases[0][(0, 0)], delta, epsilon = 1e-12);
    assert_abs_diff_eq!(gradients.weights[0][(0, 0)], delta * 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(gradients.weights[0][(0, 1)], delta, epsilon = 1e-12);
}

#[test]
fn backprop_rejects_wrong_target_shape() {
    let network = Network::with_seed(&[2, 2, 3], 0).unwrap();
    let input = Matrix::column(vec![0.0, 1.0]);
    let err = backprop(&network, &input, &Matrix::column(vec![1.0, 0.0])).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

#[test]
fn accumulator_sums_without_averaging() {
    let network = Network::with_seed(&[2, 3, 2], 4).unwrap();
    let x1 = Matrix::column(vec![1.0, 0.0]);
    let x2 = Matrix::column(vec![0.0, 1.0]);
    let y1 = Matrix::column(vec![1.0, 0.0]);
    let y2 = Matrix::column(vec![0.0, 1.0]);
    let (g1, _) = backprop(&network, &x1, &y1).unwrap();
    let (g2, _) = backprop(&network, &x2, &y2).unwrap();

    let mut acc = GradientAccumulator::new(&network).unwrap();
    assert_eq!(acc.examples(), 0);
    assert!(acc.sum().weights.iter().all(|w| w.as_slice().iter().all(|&x| x == 0.0)));
    acc.accumulate(&g1).unwrap();
    acc.accumulate(&g2).unwrap();
    assert_eq!(acc.examples(), 2);

    let expected = g1.add(&g2).unwrap();
    for l in 0..2 {
        assert_eq!(acc.sum().weights[l], expected.weights[l]);
        assert_eq!(acc.sum().biases[l], expected.biases[l]);
    }
}

#[test]
fn accumulator_rejects_foreign_gradients() {
    let network = Network::with_seed(&[2, 3, 2], 4).unwrap();
    let other = Network::with_seed(&[2, 4, 2], 4).unwrap();
    let mut acc = GradientAccumulator::new(&network).unwrap();
    let foreign = Gradients::zeros_like(&other).unwrap();
    assert!(matches!(acc.accumulate(&foreign), Err(Error::DimensionMismatch { .. })));
    assert_eq!(acc.examples(), 0);
}

#[test]
fn gradients_fold_in_place() {
    let network = Network::with_seed(&[2, 3, 2], 4).unwrap();
    let (g, _) = backprop(&network, &Matrix::column(vec![0.2, 0.9]), &Matrix::column(vec![0.0, 1.0])).unwrap();

    let mut folded = Gradients::zeros_like(&network).unwrap();
    folded.add_assign(&g).unwrap();
    folded.add_assign(&g).unwrap();
    let doubled = g.add(&g).unwrap();
    assert_eq!(folded.weights, doubled.weights);
    assert_eq!(folded.biases, doubled.biases);

    // A mismatch in the last layer must not leave earlier layers half-added.
    let mut bad = g.clone();
    bad.biases[1] = Matrix::column(vec![0.0; 3]);
    let before = folded.clone();
    assert!(folded.add_assign(&bad).is_err());
    assert_eq!(folded.weights, before.weights);
    assert_eq!(folded.biases, before.biases);
}

#[test]
fn sgd_step_scales_by_learning_rate_over_batch() {
    let mut network = Network::with_seed(&[2, 2], 6).unwrap();
    let before = network.clone();

    let mut ones = Gradients::zeros_like(&network).unwrap();
    ones.weights[0] = ones.weights[0].map(|_| 1.0);
    ones.biases[0] = ones.biases[0].map(|_| 2.0);

    let mut acc = GradientAccumulator::new(&network).unwrap();
    for _ in 0..4 {
        acc.accumulate(&ones).unwrap();
    }
    Sgd::new(3.0).step(&mut network, acc).unwrap();

    // Summed weight gradient is 4, step is 3/4 per unit of gradient.
    let layer = &network.layers()[0];
    let old = &before.layers()[0];
    for (new, old) in layer.weights().as_slice().iter().zip(old.weights().as_slice()) {
        assert_abs_diff_eq!(*new, old - 3.0, epsilon = 1e-12);
    }
    for (new, old) in layer.biases().as_slice().iter().zip(old.biases().as_slice()) {
        assert_abs_diff_eq!(*new, old - 6.0, epsilon = 1e-12);
    }
}

#[test]
fn sgd_refuses_empty_batch() {
    let mut network = Network::with_seed(&[2, 2], 6).unwrap();
    let acc = GradientAccumulator::new(&network).unwrap();
    assert!(matches!(Sgd::new(1.0).step(&mut network, acc), Err(Error::InvalidConfig(_))));
}
