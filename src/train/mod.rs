pub mod backprop;
pub mod epoch_stats;
pub mod gradients;
pub mod loop_fn;
pub mod train_config;

pub use backprop::backprop;
pub use epoch_stats::EpochStats;
pub use gradients::{GradientAccumulator, Gradients};
pub use loop_fn::train_loop;
pub use train_config::TrainConfig;
