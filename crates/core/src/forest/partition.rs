//! Seeded train/test partitioning.
//!
//! Row indices are shuffled with a seeded generator and cut once, so the
//! same dataset size and seed always produce the same partition. The two
//! sides are disjoint by construction and together cover every row.

use crate::error::{CoreError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

/// A reproducible split of dataset row indices into train and test sides.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    train: Vec<usize>,
    test: Vec<usize>,
}

impl TrainTestSplit {
    /// Partition `num_rows` indices, reserving `test_fraction` of them
    /// (rounded to the nearest row) for evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InsufficientData`] if either side would be
    /// empty — the dataset is too small for the requested fraction.
    pub fn partition(num_rows: usize, test_fraction: f64, seed: u64) -> Result<Self> {
        let mut indices: Vec<usize> = (0..num_rows).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        // An as-cast saturates, so hostile fractions land in the error
        // branch below instead of underflowing.
        let test_len = (((num_rows as f64) * test_fraction).round() as usize).min(num_rows);
        let train_len = num_rows - test_len;
        if train_len == 0 || test_len == 0 {
            return Err(CoreError::insufficient(format!(
                "partition of {num_rows} rows at test fraction {test_fraction} \
                 leaves {train_len} train / {test_len} test rows"
            )));
        }

        let test = indices.split_off(train_len);
        debug!(train = train_len, test = test_len, "dataset partitioned");
        Ok(Self {
            train: indices,
            test,
        })
    }

    /// Row indices used for fitting.
    #[must_use]
    pub fn train(&self) -> &[usize] {
        &self.train
    }

    /// Row indices held out for evaluation.
    #[must_use]
    pub fn test(&self) -> &[usize] {
        &self.test
    }
}
