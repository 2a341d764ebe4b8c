use std::fmt;

use crate::math::matrix::Matrix;

/// Output activation the winning unit must reach for a confident answer.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Result of classifying one input.
///
/// The outputs are independent sigmoids rather than a distribution, so every
/// unit can stay below the threshold; that is reported as `Unconfident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Class(usize),
    Unconfident,
}

impl Classification {
    /// Picks the largest output; `Unconfident` when it is below 0.5.
    pub fn from_output(output: &Matrix) -> Classification {
        match output.argmax() {
            Some((index, value)) if value >= CONFIDENCE_THRESHOLD => Classification::Class(index),
            _ => Classification::Unconfident,
        }
    }

    pub fn class(self) -> Option<usize> {
        match self {
            Classification::Class(c) => Some(c),
            Classification::Unconfident => None,
        }
    }

    /// Whether this answer agrees with a dataset label.
    ///
    /// An unlabeled example is answered correctly by `Unconfident`.
    pub fn matches(self, label: Option<usize>) -> bool {
        self.class() == label
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Class(c) => write!(f, "{c}"),
            Classification::Unconfident => write!(f, "unconfident"),
        }
    }
}
