pub mod evaluation;

pub use evaluation::{evaluate, Evaluation};
