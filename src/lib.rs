pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod eval;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::sigmoid::{sigmoid, sigmoid_prime};
pub use config::RunConfig;
pub use data::{DatasetProvider, InMemoryDataset};
pub use error::{Error, Result};
pub use eval::Evaluation;
pub use layers::dense::Layer;
pub use math::matrix::Matrix;
pub use network::{Classification, Network};
pub use optim::sgd::Sgd;
pub use train::{train_loop, EpochStats, TrainConfig};
