use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::provider::DatasetProvider;
use crate::error::{Error, Result};
use crate::eval::evaluation::{evaluate, Evaluation};
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::classification::Classification;
use crate::network::trace::ActivationTrace;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// Fully connected sigmoid network.
///
/// `sizes` lists the units per layer, input first; `layers[i]` holds the
/// parameters between `sizes[i]` and `sizes[i + 1]`. Parameters only change
/// through `train`.
#[derive(Debug, Clone)]
pub struct Network {
    sizes: Vec<usize>,
    layers: Vec<Layer>,
}

impl Network {
    /// Builds a network with N(0, 1) weights and biases drawn from `rng`.
    pub fn new<R: Rng>(sizes: &[usize], rng: &mut R) -> Result<Network> {
        validate_sizes(sizes)?;
        let layers = sizes
            .windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Network {
            sizes: sizes.to_vec(),
            layers,
        })
    }

    /// Deterministic initialization from a seed.
    pub fn with_seed(sizes: &[usize], seed: u64) -> Result<Network> {
        Network::new(sizes, &mut StdRng::seed_from_u64(seed))
    }

    /// Assembles a network from pre-built layers; adjacent layers must chain.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let first = layers
            .first()
            .ok_or_else(|| Error::InvalidConfig("a network needs at least one layer".to_owned()))?;
        let mut sizes = vec![first.input_size()];
        for layer in &layers {
            let prev = sizes[sizes.len() - 1];
            if layer.input_size() != prev {
                return Err(Error::DimensionMismatch {
                    op: "from_layers",
                    left: (prev, 1),
                    right: layer.weights().shape(),
                });
            }
            sizes.push(layer.size());
        }
        validate_sizes(&sizes)?;
        Ok(Network { sizes, layers })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Output activations a_{N-1} for one column input.
    pub fn forward(&self, input: &Matrix) -> Result<Matrix> {
        self.check_input(input)?;
        let mut current = input.clone();
        for layer in &self.layers {
            let (_, a) = layer.feed_from(&current)?;
            current = a;
        }
        Ok(current)
    }

    /// Forward pass that keeps every z and a for backpropagation.
    pub fn forward_trace(&self, input: &Matrix) -> Result<ActivationTrace> {
        self.check_input(input)?;
        let mut pre_activations = Vec::with_capacity(self.layers.len());
        let mut activations = Vec::with_capacity(self.sizes.len());
        activations.push(input.clone());
        for layer in &self.layers {
            let (z, a) = layer.feed_from(&activations[activations.len() - 1])?;
            pre_activations.push(z);
            activations.push(a);
        }
        Ok(ActivationTrace {
            pre_activations,
            activations,
        })
    }

    pub fn classify(&self, input: &Matrix) -> Result<Classification> {
        Ok(Classification::from_output(&self.forward(input)?))
    }

    /// Output activations as whole percentages, truncated.
    pub fn output_percentages(&self, input: &Matrix) -> Result<Vec<u32>> {
        Ok(self
            .forward(input)?
            .as_slice()
            .iter()
            .map(|&a| (a * 100.0) as u32)
            .collect())
    }

    /// Runs mini-batch SGD over `dataset`; see `train_loop`.
    pub fn train<D, R>(&mut self, dataset: &mut D, config: &TrainConfig, rng: &mut R) -> Result<()>
    where
        D: DatasetProvider + ?Sized,
        R: Rng,
    {
        train_loop(self, dataset, config, rng).map(|_| ())
    }

    /// Classification accuracy over `dataset` in canonical order.
    pub fn evaluate<D>(&self, dataset: &mut D) -> Result<Evaluation>
    where
        D: DatasetProvider + ?Sized,
    {
        evaluate(self, dataset)
    }

    fn check_input(&self, input: &Matrix) -> Result<()> {
        if input.shape() != (self.input_size(), 1) {
            return Err(Error::DimensionMismatch {
                op: "forward",
                left: (self.input_size(), 1),
                right: input.shape(),
            });
        }
        Ok(())
    }
}

fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < 2 {
        return Err(Error::InvalidConfig(format!(
            "a network needs at least 2 layer sizes, got {}",
            sizes.len()
        )));
    }
    if let Some(pos) = sizes.iter().position(|&s| s == 0) {
        return Err(Error::InvalidConfig(format!("layer {pos} has zero units")));
    }
    Ok(())
}
