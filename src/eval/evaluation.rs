use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::data::provider::DatasetProvider;
use crate::error::Result;
use crate::network::network::Network;

/// Outcome of classifying every example of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub matches: usize,
    pub total: usize,
    /// Percentage of matches, in [0, 100].
    pub accuracy: f64,
}

impl Evaluation {
    pub fn new(matches: usize, total: usize) -> Evaluation {
        let accuracy = if total == 0 {
            0.0
        } else {
            100.0 * matches as f64 / total as f64
        };
        Evaluation { matches, total, accuracy }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Two decimals, truncated rather than rounded.
        let hundredths = if self.total == 0 {
            0
        } else {
            self.matches * 10_000 / self.total
        };
        write!(
            f,
            "{}/{} | {}.{:02}%",
            self.matches,
            self.total,
            hundredths / 100,
            hundredths % 100
        )
    }
}

/// Classifies every example of `dataset` in canonical order and counts how
/// many answers agree with the labels. The network is not modified; the
/// dataset is left in canonical order with its cursor at the end.
pub fn evaluate<D>(network: &Network, dataset: &mut D) -> Result<Evaluation>
where
    D: DatasetProvider + ?Sized,
{
    dataset.reset_order();

    let mut matches = 0;
    while dataset.has_next() {
        let answer = network.classify(dataset.current_input()?)?;
        if answer.matches(dataset.current_label()?) {
            matches += 1;
        }
        dataset.advance();
    }

    let evaluation = Evaluation::new(matches, dataset.len());
    info!("evaluation: {evaluation}");
    Ok(evaluation)
}
