//! Bagged decision-tree ensemble for severe-weather classification.
//!
//! Training partitions the dataset with a seeded shuffle, fits a fixed
//! number of CART trees on bootstrap resamples with per-split feature
//! restriction, and evaluates on the held-out rows. Every stochastic
//! choice derives from the configured seed, so the same dataset and
//! configuration always reproduce the same partition, trees, and
//! predictions. Tree fitting is parallelized with rayon as a pure
//! performance optimization: each tree owns a generator seeded from the
//! base seed and its own index, so the schedule cannot change results.

pub mod evaluation;
pub mod importance;
pub mod partition;
mod tree;

pub use evaluation::{ClassMetrics, ClassificationReport, ConfusionMatrix};
pub use importance::FeatureImportance;
pub use partition::TrainTestSplit;

use crate::core_types::NUM_FEATURES;
use crate::error::{CoreError, Result};
use crate::features::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Seed used when the caller does not supply one. Chosen once so that
/// repeated runs over the same data agree by default.
pub const DEFAULT_SEED: u64 = 42;

/// Ensemble training configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Fraction of rows held out for evaluation.
    pub test_fraction: f64,
    /// Base seed for partitioning and per-tree randomness.
    pub seed: u64,
    /// Nodes with fewer samples become leaves.
    pub min_samples_split: usize,
    /// Candidate columns considered at each split.
    pub max_features: usize,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            test_fraction: 0.2,
            seed: DEFAULT_SEED,
            min_samples_split: 2,
            // floor(sqrt(NUM_FEATURES)) for NUM_FEATURES = 6
            max_features: 2,
        }
    }
}

/// A trained ensemble. Immutable once fit.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<tree::DecisionTree>,
}

impl RandomForest {
    /// Majority vote across all trees. A `true` prediction requires a
    /// strict majority; a tied vote comes out non-severe.
    #[must_use]
    pub fn predict(&self, features: &[f64; NUM_FEATURES]) -> bool {
        let votes = self.trees.iter().filter(|t| t.predict(features)).count();
        votes * 2 > self.trees.len()
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether the ensemble holds no trees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Fit `config.n_trees` trees on bootstrap resamples of `train`,
    /// returning the forest and raw per-feature impurity-decrease totals.
    fn fit(
        dataset: &Dataset,
        train: &[usize],
        config: &RandomForestConfig,
    ) -> (Self, [f64; NUM_FEATURES]) {
        let fitted: Vec<(tree::DecisionTree, [f64; NUM_FEATURES])> = (0..config.n_trees)
            .into_par_iter()
            .map(|index| {
                let mut rng = StdRng::seed_from_u64(tree_seed(config.seed, index));
                let sample: Vec<usize> = (0..train.len())
                    .map(|_| train[rng.random_range(0..train.len())])
                    .collect();
                let mut importance = [0.0; NUM_FEATURES];
                let fitted_tree = tree::DecisionTree::fit(
                    dataset,
                    &sample,
                    config.min_samples_split,
                    config.max_features,
                    &mut rng,
                    &mut importance,
                );
                (fitted_tree, importance)
            })
            .collect();

        let mut totals = [0.0; NUM_FEATURES];
        let mut trees = Vec::with_capacity(fitted.len());
        for (fitted_tree, importance) in fitted {
            for (total, value) in totals.iter_mut().zip(importance) {
                *total += value;
            }
            trees.push(fitted_tree);
        }
        (Self { trees }, totals)
    }
}

/// Everything training produces: the model, its hold-out report, and the
/// normalized feature importances.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The fitted ensemble.
    pub model: RandomForest,
    /// Metrics on the test partition.
    pub report: ClassificationReport,
    /// Normalized impurity-decrease weights.
    pub importance: FeatureImportance,
}

/// Partition, train, and evaluate in one pass.
///
/// # Errors
///
/// - [`CoreError::InsufficientData`] if either partition side is empty.
/// - [`CoreError::ModelTraining`] if the training rows carry a single
///   label class, or if no split anywhere in the ensemble reduced
///   impurity (a degenerate model is never returned as if valid).
pub fn train_and_evaluate(
    dataset: &Dataset,
    config: &RandomForestConfig,
) -> Result<TrainingOutcome> {
    let split = TrainTestSplit::partition(dataset.len(), config.test_fraction, config.seed)?;

    let train = split.train();
    let severe = train.iter().filter(|&&row| dataset.label(row)).count();
    if severe == 0 || severe == train.len() {
        return Err(CoreError::untrainable(format!(
            "training rows hold a single label class ({severe} severe of {})",
            train.len()
        )));
    }

    info!(
        train = train.len(),
        test = split.test().len(),
        trees = config.n_trees,
        "fitting ensemble"
    );
    let (model, totals) = RandomForest::fit(dataset, train, config);
    let importance = FeatureImportance::from_totals(totals).ok_or_else(|| {
        CoreError::untrainable("no split in the ensemble reduced label impurity")
    })?;

    let mut confusion = ConfusionMatrix::default();
    for &row in split.test() {
        confusion.record(dataset.label(row), model.predict(&dataset.feature_row(row)));
    }
    let report = ClassificationReport::from_confusion(confusion);
    info!(accuracy = report.accuracy, "hold-out evaluation complete");

    Ok(TrainingOutcome {
        model,
        report,
        importance,
    })
}

/// Derive the generator seed for one tree from the base seed. The +1
/// offset keeps tree 0 off the partition generator's stream.
fn tree_seed(base: u64, index: usize) -> u64 {
    base ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
