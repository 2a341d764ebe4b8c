// Tests for parameter initialization and forward propagation.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sigmoid_digits::{sigmoid, Classification, Error, Layer, Matrix, Network};

#[test]
fn parameters_have_layer_shapes() {
    let network = Network::with_seed(&[4, 5, 3, 2], 1).unwrap();
    assert_eq!(network.layers().len(), 3);
    let expected = [((5, 4), (5, 1)), ((3, 5), (3, 1)), ((2, 3), (2, 1))];
    for (layer, (w, b)) in network.layers().iter().zip(expected) {
        assert_eq!(layer.weights().shape(), w);
        assert_eq!(layer.biases().shape(), b);
    }
    assert_eq!(network.input_size(), 4);
    assert_eq!(network.output_size(), 2);
}

#[test]
fn seeded_initialization_is_deterministic() {
    let a = Network::with_seed(&[3, 4, 2], 42).unwrap();
    let b = Network::new(&[3, 4, 2], &mut StdRng::seed_from_u64(42)).unwrap();
    let c = Network::with_seed(&[3, 4, 2], 43).unwrap();
    for (la, lb) in a.layers().iter().zip(b.layers()) {
        assert_eq!(la.weights(), lb.weights());
        assert_eq!(la.biases(), lb.biases());
    }
    assert_ne!(a.layers()[0].weights(), c.layers()[0].weights());
}

#[test]
fn initial_weights_look_standard_normal() {
    let network = Network::with_seed(&[100, 100, 2], 5).unwrap();
    let weights = network.layers()[0].weights().as_slice();
    let n = weights.len() as f64;
    let mean = weights.iter().sum::<f64>() / n;
    let var = weights.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n;
    assert!(mean.abs() < 0.05, "mean {mean}");
    assert!((var - 1.0).abs() < 0.1, "variance {var}");
}

#[test]
fn invalid_topologies_are_rejected() {
    assert!(matches!(Network::with_seed(&[3], 0), Err(Error::InvalidConfig(_))));
    assert!(matches!(Network::with_seed(&[], 0), Err(Error::InvalidConfig(_))));
    assert!(matches!(Network::with_seed(&[3, 0, 2], 0), Err(Error::InvalidConfig(_))));
}

#[test]
fn forward_output_is_in_open_unit_interval() {
    let network = Network::with_seed(&[6, 8, 4], 9).unwrap();
    let input = Matrix::column(vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    let output = network.forward(&input).unwrap();
    assert_eq!(output.shape(), (4, 1));
    assert!(output.as_slice().iter().all(|&a| a > 0.0 && a < 1.0));
}

#[test]
fn saturated_unit_stays_inside_open_interval() {
    let layer = Layer::from_parts(
        Matrix::from_vec(1, 1, vec![50.0]).unwrap(),
        Matrix::column(vec![0.0]),
    )
    .unwrap();
    let network = Network::from_layers(vec![layer]).unwrap();
    for &x in &[1.0, -1.0, 20.0, -20.0] {
        let a = network.forward(&Matrix::column(vec![x])).unwrap()[(0, 0)];
        assert!(a > 0.0 && a < 1.0, "input {x} gave activation {a}");
    }
}

#[test]
fn forward_matches_hand_computation() {
    // 2 -> 1, w = [0.5, -1.0], b = 0.25
    let layer = Layer::from_parts(
        Matrix::from_vec(1, 2, vec![0.5, -1.0]).unwrap(),
        Matrix::column(vec![0.25]),
    )
    .unwrap();
    let network = Network::from_layers(vec![layer]).unwrap();
    let out = network.forward(&Matrix::column(vec![1.0, 0.5])).unwrap();
    assert_abs_diff_eq!(out[(0, 0)], sigmoid(0.5 - 0.5 + 0.25), epsilon = 1e-12);
}

#[test]
fn trace_records_every_layer() {
    let network = Network::with_seed(&[3, 4, 5, 2], 3).unwrap();
    let input = Matrix::column(vec![0.1, 0.5, 0.9]);
    let trace = network.forward_trace(&input).unwrap();

    assert_eq!(trace.activations.len(), 4);
    assert_eq!(trace.pre_activations.len(), 3);
    assert_eq!(trace.activations[0], input);
    for (z, a) in trace.pre_activations.iter().zip(&trace.activations[1..]) {
        assert_eq!(z.shape(), a.shape());
        for (&zi, &ai) in z.as_slice().iter().zip(a.as_slice()) {
            assert_abs_diff_eq!(sigmoid(zi), ai, epsilon = 1e-15);
        }
    }
    assert_eq!(trace.output(), &network.forward(&input).unwrap());
}

#[test]
fn forward_rejects_wrong_input_shape() {
    let network = Network::with_seed(&[3, 2], 0).unwrap();
    let err = network.forward(&Matrix::column(vec![1.0, 2.0])).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));

    let row = Matrix::from_vec(1, 3, vec![0.0; 3]).unwrap();
    assert!(network.forward(&row).is_err());
    assert!(network.classify(&row).is_err());
}

#[test]
fn forward_does_not_touch_parameters() {
    let network = Network::with_seed(&[3, 3, 2], 8).unwrap();
    let before = network.clone();
    let input = Matrix::column(vec![0.3, 0.3, 0.3]);
    network.forward(&input).unwrap();
    network.forward_trace(&input).unwrap();
    network.classify(&input).unwrap();
    for (a, b) in network.layers().iter().zip(before.layers()) {
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.biases(), b.biases());
    }
}

#[test]
fn classify_applies_confidence_threshold() {
    // Identity weights scaled by 10, bias -5: a lit input saturates its unit.
    let layer = Layer::from_parts(
        Matrix::from_rows(&[vec![10.0, 0.0], vec![0.0, 10.0]]).unwrap(),
        Matrix::column(vec![-5.0, -5.0]),
    )
    .unwrap();
    let network = Network::from_layers(vec![layer]).unwrap();

    let lit = Matrix::column(vec![0.0, 1.0]);
    assert_eq!(network.classify(&lit).unwrap(), Classification::Class(1));
    let dark = Matrix::column(vec![0.0, 0.0]);
    assert_eq!(network.classify(&dark).unwrap(), Classification::Unconfident);
    assert_eq!(network.output_percentages(&dark).unwrap(), vec![0, 0]);
    assert_eq!(network.output_percentages(&lit).unwrap(), vec![0, 99]);
}

#[test]
fn from_layers_checks_chaining() {
    let mut rng = StdRng::seed_from_u64(0);
    let first = Layer::new(4, 3, &mut rng).unwrap();
    let wrong = Layer::new(2, 5, &mut rng).unwrap();
    assert!(matches!(
        Network::from_layers(vec![first, wrong]),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(Network::from_layers(vec![]).is_err());
}
