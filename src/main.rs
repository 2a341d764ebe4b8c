use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use sigmoid_digits::data::idx::load_idx_pair;
use sigmoid_digits::{Network, Result, RunConfig};

/// Train a sigmoid feedforward network on MNIST-format IDX files and report
/// its classification accuracy.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON run configuration; flags below override its values
    #[arg(long)]
    config: Option<String>,
    /// Units per layer, input first (e.g. 784,30,10)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<usize>>,
    #[arg(long)]
    epochs: Option<usize>,
    #[arg(long)]
    batch_size: Option<usize>,
    #[arg(long)]
    learning_rate: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    train_images: Option<PathBuf>,
    #[arg(long)]
    train_labels: Option<PathBuf>,
    #[arg(long)]
    test_images: Option<PathBuf>,
    #[arg(long)]
    test_labels: Option<PathBuf>,
    /// Unlabeled random-noise examples to append to the training set
    #[arg(long)]
    noise_examples: Option<usize>,
}

impl Args {
    fn into_config(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load_json(path)?,
            None => RunConfig::default(),
        };
        if let Some(sizes) = self.sizes {
            config.sizes = sizes;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(path) = self.train_images {
            config.train_images = path;
        }
        if let Some(path) = self.train_labels {
            config.train_labels = path;
        }
        if self.test_images.is_some() {
            config.test_images = self.test_images;
        }
        if self.test_labels.is_some() {
            config.test_labels = self.test_labels;
        }
        if let Some(n) = self.noise_examples {
            config.noise_examples = n;
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(config: RunConfig) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut train_set = load_idx_pair(&config.train_images, &config.train_labels, config.n_classes())?;
    if config.noise_examples > 0 {
        train_set.add_noise(config.noise_examples, &mut rng)?;
        info!("added {} unlabeled noise examples", config.noise_examples);
    }

    let mut network = Network::new(&config.sizes, &mut rng)?;
    info!(
        "training {:?} for {} epochs, batch size {}, learning rate {}",
        config.sizes, config.epochs, config.batch_size, config.learning_rate
    );
    network.train(&mut train_set, &config.train_config(), &mut rng)?;

    let evaluation = match (&config.test_images, &config.test_labels) {
        (Some(images), Some(labels)) => {
            let mut test_set = load_idx_pair(images, labels, config.n_classes())?;
            network.evaluate(&mut test_set)?
        }
        _ => network.evaluate(&mut train_set)?,
    };
    println!("{evaluation}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Args::parse().into_config().and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
