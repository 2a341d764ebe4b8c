use serde::{Deserialize, Serialize};

/// Statistics for one completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    pub total_epochs: usize,
    /// Mini-batches applied this epoch.
    pub batches: usize,
    /// Examples that contributed to an update; the trailing partial batch is
    /// not counted.
    pub examples: usize,
    /// Mean quadratic cost of the processed examples, measured before each
    /// batch's update.
    pub train_cost: f64,
    pub elapsed_ms: u64,
}
