use rand::RngCore;

use crate::error::Result;
use crate::math::matrix::Matrix;

/// The capabilities the training loop and evaluation need from a dataset.
///
/// A provider holds its examples in a fixed canonical order and traverses
/// them through a permutation plus a forward cursor. Reordering never touches
/// the stored examples.
pub trait DatasetProvider {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Randomly permutes the traversal order and moves the cursor to the start.
    fn shuffle(&mut self, rng: &mut dyn RngCore);

    /// Restores canonical order and moves the cursor to the start.
    fn reset_order(&mut self);

    /// Moves the cursor to the start without changing the order.
    fn reset_cursor(&mut self);

    /// Number of examples already passed by the cursor.
    fn position(&self) -> usize;

    /// Whether the cursor is on an example.
    fn has_next(&self) -> bool {
        self.position() < self.len()
    }

    /// Examples from the cursor to the end, inclusive of the current one.
    fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    fn advance(&mut self);

    /// Input column vector under the cursor.
    fn current_input(&self) -> Result<&Matrix>;

    /// One-hot target under the cursor; all zeros for an unlabeled example.
    fn current_target(&self) -> Result<Matrix>;

    /// Class index under the cursor; `None` for an unlabeled example.
    fn current_label(&self) -> Result<Option<usize>>;
}
