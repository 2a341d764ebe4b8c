//! Run configuration for the command-line trainer.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! {
//!   "sizes": [784, 30, 10],
//!   "epochs": 30,
//!   "batch_size": 10,
//!   "learning_rate": 3.0,
//!   "seed": 42,
//!   "train_images": "data/train-images-idx3-ubyte",
//!   "train_labels": "data/train-labels-idx1-ubyte"
//! }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::train::train_config::TrainConfig;

/// Hyperparameters and dataset locations for one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Units per layer, input first.
    pub sizes: Vec<usize>,
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
    /// Seeds initialization and shuffling; `None` draws a seed from the OS.
    pub seed: Option<u64>,
    pub train_images: PathBuf,
    pub train_labels: PathBuf,
    /// Evaluated after training when both are set; otherwise the training
    /// set is evaluated.
    pub test_images: Option<PathBuf>,
    pub test_labels: Option<PathBuf>,
    /// Unlabeled random-noise examples appended to the training set.
    pub noise_examples: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            sizes: vec![784, 25, 25, 10],
            epochs: 10,
            batch_size: 15,
            learning_rate: 3.0,
            seed: None,
            train_images: PathBuf::from("train-images-idx3-ubyte"),
            train_labels: PathBuf::from("train-labels-idx1-ubyte"),
            test_images: None,
            test_labels: None,
            noise_examples: 0,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(json: &str) -> Result<RunConfig> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Reads a `RunConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| Error::InvalidConfig(format!("{path}: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        if self.sizes.len() < 2 {
            return Err(Error::InvalidConfig(format!(
                "sizes needs at least 2 entries, got {}",
                self.sizes.len()
            )));
        }
        if self.sizes.contains(&0) {
            return Err(Error::InvalidConfig("layer sizes must be positive".to_owned()));
        }
        if self.test_images.is_some() != self.test_labels.is_some() {
            return Err(Error::InvalidConfig(
                "test_images and test_labels must be given together".to_owned(),
            ));
        }
        self.train_config().validate()
    }

    /// Number of output classes, i.e. the last layer size.
    pub fn n_classes(&self) -> usize {
        self.sizes.last().copied().unwrap_or(0)
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs, self.batch_size, self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = RunConfig::from_json_str(r#"{ "epochs": 3, "seed": 9 }"#).unwrap();
        assert_eq!(config.epochs, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sizes, vec![784, 25, 25, 10]);
        assert_eq!(config.batch_size, 15);
        assert_eq!(config.n_classes(), 10);
        config.validate().unwrap();
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = RunConfig::from_json_str("{ epochs: }").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_bad_topology_and_batch() {
        let config = RunConfig { sizes: vec![784], ..RunConfig::default() };
        assert!(config.validate().is_err());

        let config = RunConfig { sizes: vec![4, 0, 2], ..RunConfig::default() };
        assert!(config.validate().is_err());

        let config = RunConfig { batch_size: 0, ..RunConfig::default() };
        assert!(config.validate().is_err());

        let config = RunConfig { test_images: Some("t".into()), ..RunConfig::default() };
        assert!(config.validate().is_err());
    }
}
