//! CART decision trees over labeled observation rows.
//!
//! Each tree is grown from a bootstrap resample of the training rows. At
//! every split only a random subset of the predictor columns is considered;
//! among those candidates the (feature, threshold) pair minimizing weighted
//! Gini impurity wins. Growth stops at pure nodes or below the minimum
//! split size; depth is otherwise unbounded.
//!
//! Nodes live in a flat arena indexed by position, so trees are cheap to
//! clone and traverse without pointer chasing.

use crate::core_types::NUM_FEATURES;
use crate::features::Dataset;
use rand::seq::SliceRandom;
use rand::Rng;

/// One node of a fitted tree.
#[derive(Debug, Clone)]
enum TreeNode {
    /// Terminal node carrying the majority label of its samples.
    Leaf { severe: bool },
    /// Binary split: rows with `feature <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single fitted decision tree.
#[derive(Debug, Clone)]
pub(crate) struct DecisionTree {
    nodes: Vec<TreeNode>,
    root: usize,
}

/// Best threshold found for one candidate feature.
struct CandidateSplit {
    feature: usize,
    threshold: f64,
    weighted_impurity: f64,
}

/// Gini impurity of a node with `severe` positive labels out of `total`.
pub(crate) fn gini(severe: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = severe as f64 / total as f64;
    let q = 1.0 - p;
    1.0 - p * p - q * q
}

impl DecisionTree {
    /// Fit a tree on `sample` (bootstrap row indices into `dataset`).
    ///
    /// Impurity decreases attributable to each feature, weighted by the
    /// node's share of the sample, are accumulated into `importance`.
    pub fn fit<R: Rng>(
        dataset: &Dataset,
        sample: &[usize],
        min_samples_split: usize,
        max_features: usize,
        rng: &mut R,
        importance: &mut [f64; NUM_FEATURES],
    ) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: 0,
        };
        let max_features = max_features.clamp(1, NUM_FEATURES);
        tree.root = tree.grow(
            dataset,
            sample.to_vec(),
            sample.len(),
            min_samples_split,
            max_features,
            rng,
            importance,
        );
        tree
    }

    /// Predict the label for one feature row.
    pub fn predict(&self, features: &[f64; NUM_FEATURES]) -> bool {
        let mut index = self.root;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { severe } => return *severe,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Recursively grow the subtree for `rows`, returning its node index.
    #[allow(clippy::too_many_arguments)]
    fn grow<R: Rng>(
        &mut self,
        dataset: &Dataset,
        rows: Vec<usize>,
        total_samples: usize,
        min_samples_split: usize,
        max_features: usize,
        rng: &mut R,
        importance: &mut [f64; NUM_FEATURES],
    ) -> usize {
        let n = rows.len();
        let severe = rows.iter().filter(|&&r| dataset.label(r)).count();

        if severe == 0 || severe == n || n < min_samples_split {
            return self.push_leaf(severe, n);
        }

        // Random feature restriction: shuffle the column indices and take
        // the first `max_features` as this split's candidates.
        let mut columns: [usize; NUM_FEATURES] = std::array::from_fn(|i| i);
        columns.shuffle(rng);

        let mut best: Option<CandidateSplit> = None;
        for &feature in &columns[..max_features] {
            if let Some(candidate) = best_threshold(dataset, &rows, feature) {
                let better = best
                    .as_ref()
                    .is_none_or(|b| candidate.weighted_impurity < b.weighted_impurity);
                if better {
                    best = Some(candidate);
                }
            }
        }

        // All candidate columns constant across the node: nothing to split on.
        let Some(split) = best else {
            return self.push_leaf(severe, n);
        };

        let decrease = gini(severe, n) - split.weighted_impurity;
        if decrease > 0.0 {
            importance[split.feature] += (n as f64 / total_samples as f64) * decrease;
        }

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| dataset.feature_row(r)[split.feature] <= split.threshold);

        let left = self.grow(
            dataset,
            left_rows,
            total_samples,
            min_samples_split,
            max_features,
            rng,
            importance,
        );
        let right = self.grow(
            dataset,
            right_rows,
            total_samples,
            min_samples_split,
            max_features,
            rng,
            importance,
        );

        self.nodes.push(TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        });
        self.nodes.len() - 1
    }

    fn push_leaf(&mut self, severe: usize, total: usize) -> usize {
        self.nodes.push(TreeNode::Leaf {
            // Strict majority; a tied node predicts non-severe.
            severe: severe * 2 > total,
        });
        self.nodes.len() - 1
    }
}

/// Scan the sorted values of one feature for the impurity-minimizing
/// threshold. Returns `None` when the feature is constant across `rows`.
fn best_threshold(dataset: &Dataset, rows: &[usize], feature: usize) -> Option<CandidateSplit> {
    let mut values: Vec<(f64, bool)> = rows
        .iter()
        .map(|&r| (dataset.feature_row(r)[feature], dataset.label(r)))
        .collect();
    values.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = values.len();
    let total_severe = values.iter().filter(|&&(_, label)| label).count();

    let mut left_n = 0usize;
    let mut left_severe = 0usize;
    let mut best: Option<CandidateSplit> = None;

    for i in 0..n - 1 {
        left_n += 1;
        if values[i].1 {
            left_severe += 1;
        }
        // A boundary only exists between distinct adjacent values, which
        // also guarantees both children are nonempty.
        if values[i].0 == values[i + 1].0 {
            continue;
        }

        let right_n = n - left_n;
        let right_severe = total_severe - left_severe;
        let weighted = (left_n as f64 * gini(left_severe, left_n)
            + right_n as f64 * gini(right_severe, right_n))
            / n as f64;

        let better = best
            .as_ref()
            .is_none_or(|b| weighted < b.weighted_impurity);
        if better {
            best = Some(CandidateSplit {
                feature,
                threshold: 0.5 * (values[i].0 + values[i + 1].0),
                weighted_impurity: weighted,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{RawTable, REQUIRED_COLUMNS};
    use crate::features::FeatureBuilder;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Build a dataset where each row is (TEMP value, severe?). The other
    /// predictors are constant so only TEMP carries signal.
    fn temp_dataset(rows: &[(f64, bool)]) -> Dataset {
        let columns = REQUIRED_COLUMNS.iter().map(ToString::to_string).collect();
        let data = rows
            .iter()
            .map(|&(temp, severe)| {
                let prcp = if severe { 40.0 } else { 0.0 };
                vec![
                    Some(temp),
                    Some(50.0),
                    Some(1010.0),
                    Some(5.0),
                    Some(80.0),
                    Some(60.0),
                    Some(prcp),
                ]
            })
            .collect();
        let table = RawTable::new(columns, data).unwrap();
        FeatureBuilder::build(&table).unwrap()
    }

    #[test]
    fn gini_known_values() {
        assert_abs_diff_eq!(gini(0, 10), 0.0);
        assert_abs_diff_eq!(gini(10, 10), 0.0);
        assert_abs_diff_eq!(gini(5, 10), 0.5);
        assert_abs_diff_eq!(gini(2, 8), 0.375, epsilon = 1e-12);
        assert_abs_diff_eq!(gini(0, 0), 0.0);
    }

    /// A separable set is learned exactly when every column is in play.
    #[test]
    fn separable_data_is_fit_perfectly() {
        let dataset = temp_dataset(&[
            (60.0, false),
            (62.0, false),
            (64.0, false),
            (90.0, true),
            (92.0, true),
            (94.0, true),
        ]);
        let sample: Vec<usize> = (0..dataset.len()).collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut importance = [0.0; NUM_FEATURES];
        let tree = DecisionTree::fit(&dataset, &sample, 2, NUM_FEATURES, &mut rng, &mut importance);

        for i in 0..dataset.len() {
            assert_eq!(tree.predict(&dataset.feature_row(i)), dataset.label(i));
        }
        // All signal sits in TEMP (column 0).
        assert!(importance[0] > 0.0);
        assert_abs_diff_eq!(importance[1..].iter().sum::<f64>(), 0.0);
    }

    /// Pure samples produce a single leaf and no importance.
    #[test]
    fn pure_sample_is_a_leaf() {
        let dataset = temp_dataset(&[(60.0, false), (61.0, false), (62.0, false)]);
        let sample = [0, 1, 2];
        let mut rng = StdRng::seed_from_u64(0);
        let mut importance = [0.0; NUM_FEATURES];
        let tree = DecisionTree::fit(&dataset, &sample, 2, 2, &mut rng, &mut importance);

        assert!(!tree.predict(&dataset.feature_row(0)));
        assert_abs_diff_eq!(importance.iter().sum::<f64>(), 0.0);
    }

    /// Constant features leave nothing to split on; the leaf takes the
    /// majority label.
    #[test]
    fn constant_features_fall_back_to_majority_leaf() {
        let dataset = temp_dataset(&[(70.0, true), (70.0, true), (70.0, false)]);
        let sample = [0, 1, 2];
        let mut rng = StdRng::seed_from_u64(9);
        let mut importance = [0.0; NUM_FEATURES];
        let tree = DecisionTree::fit(&dataset, &sample, 2, NUM_FEATURES, &mut rng, &mut importance);

        assert!(tree.predict(&dataset.feature_row(0)));
    }

    /// The best threshold for a clean separation sits at the gap midpoint.
    #[test]
    fn threshold_lands_between_classes() {
        let dataset = temp_dataset(&[(10.0, false), (20.0, false), (30.0, true), (40.0, true)]);
        let rows: Vec<usize> = (0..4).collect();
        let split = best_threshold(&dataset, &rows, 0).unwrap();

        assert_abs_diff_eq!(split.threshold, 25.0);
        assert_abs_diff_eq!(split.weighted_impurity, 0.0);
    }
}
