use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::data::provider::DatasetProvider;
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Examples held in memory, traversed through a shuffleable index permutation.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    inputs: Vec<Matrix>,
    labels: Vec<Option<usize>>,
    n_classes: usize,
    order: Vec<usize>,
    cursor: usize,
}

impl InMemoryDataset {
    /// Inputs are flat feature vectors of equal length; a `None` label marks
    /// an unlabeled example.
    pub fn new(inputs: Vec<Vec<f64>>, labels: Vec<Option<usize>>, n_classes: usize) -> Result<Self> {
        if inputs.len() != labels.len() {
            return Err(Error::InvalidData(format!(
                "{} inputs but {} labels",
                inputs.len(),
                labels.len()
            )));
        }
        if n_classes == 0 {
            return Err(Error::InvalidData("n_classes must be at least 1".to_owned()));
        }
        let input_len = inputs.first().map_or(0, Vec::len);
        for (i, input) in inputs.iter().enumerate() {
            if input.len() != input_len {
                return Err(Error::InvalidData(format!(
                    "input {i} has {} features, expected {input_len}",
                    input.len()
                )));
            }
        }
        if let Some((i, class)) = labels
            .iter()
            .enumerate()
            .find_map(|(i, l)| l.filter(|&c| c >= n_classes).map(|c| (i, c)))
        {
            return Err(Error::InvalidData(format!(
                "label {i}: class {class} is out of range for {n_classes} classes"
            )));
        }

        let order = (0..inputs.len()).collect();
        Ok(InMemoryDataset {
            inputs: inputs.into_iter().map(Matrix::column).collect(),
            labels,
            n_classes,
            order,
            cursor: 0,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn input_size(&self) -> usize {
        self.inputs.first().map_or(0, Matrix::rows)
    }

    /// Current traversal order as indices into the stored examples.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Stored example in canonical position `index`.
    pub fn example(&self, index: usize) -> Option<(&Matrix, Option<usize>)> {
        Some((self.inputs.get(index)?, *self.labels.get(index)?))
    }

    /// Appends `count` unlabeled examples with uniform random features in [0, 1).
    ///
    /// They carry an all-zero target, which pushes every output unit towards
    /// zero and teaches the network to answer `Unconfident` on non-digits.
    /// The feature count is taken from the stored examples, so the dataset
    /// must not be empty.
    pub fn add_noise<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        let input_len = self.input_size();
        if input_len == 0 {
            return Err(Error::InvalidData(
                "cannot add noise to a dataset without features".to_owned(),
            ));
        }
        for _ in 0..count {
            let features = (0..input_len).map(|_| rng.gen::<f64>()).collect();
            self.order.push(self.inputs.len());
            self.inputs.push(Matrix::column(features));
            self.labels.push(None);
        }
        Ok(())
    }

    fn current_index(&self) -> Result<usize> {
        self.order.get(self.cursor).copied().ok_or_else(|| {
            Error::DatasetAccess(format!(
                "cursor {} is past the end of a {}-example dataset",
                self.cursor,
                self.order.len()
            ))
        })
    }
}

impl DatasetProvider for InMemoryDataset {
    fn len(&self) -> usize {
        self.inputs.len()
    }

    fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.order.shuffle(rng);
        self.cursor = 0;
    }

    fn reset_order(&mut self) {
        self.order.sort_unstable();
        self.cursor = 0;
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    fn position(&self) -> usize {
        self.cursor
    }

    fn advance(&mut self) {
        if self.cursor < self.order.len() {
            self.cursor += 1;
        }
    }

    fn current_input(&self) -> Result<&Matrix> {
        Ok(&self.inputs[self.current_index()?])
    }

    fn current_target(&self) -> Result<Matrix> {
        let mut target = Matrix::zeros(self.n_classes, 1);
        if let Some(class) = self.labels[self.current_index()?] {
            target[(class, 0)] = 1.0;
        }
        Ok(target)
    }

    fn current_label(&self) -> Result<Option<usize>> {
        Ok(self.labels[self.current_index()?])
    }
}
