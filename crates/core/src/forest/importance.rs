//! Feature importance from accumulated impurity decreases.

use crate::core_types::{FEATURE_NAMES, NUM_FEATURES};
use serde::{Deserialize, Serialize};

/// Normalized per-feature contribution to impurity reduction across the
/// whole ensemble. Weights are non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    weights: [f64; NUM_FEATURES],
}

impl FeatureImportance {
    /// Normalize raw impurity-decrease totals.
    ///
    /// Returns `None` when the totals are all zero — an ensemble in which
    /// no split reduced impurity has no meaningful ranking, and the caller
    /// treats that as a training failure rather than inventing weights.
    pub(crate) fn from_totals(totals: [f64; NUM_FEATURES]) -> Option<Self> {
        let sum: f64 = totals.iter().sum();
        if sum <= 0.0 {
            return None;
        }
        let mut weights = totals;
        for w in &mut weights {
            *w /= sum;
        }
        Some(Self { weights })
    }

    /// Weight of a named feature, if the name is one of the predictors.
    #[must_use]
    pub fn weight(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.weights[i])
    }

    /// (name, weight) pairs in canonical feature order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.into_iter().zip(self.weights)
    }

    /// Features sorted by descending weight.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&'static str, f64)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalizes_to_unit_sum() {
        let importance =
            FeatureImportance::from_totals([2.0, 1.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
        let total: f64 = importance.iter().map(|(_, w)| w).sum();

        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(importance.weight("TEMP").unwrap(), 0.5);
        assert_abs_diff_eq!(importance.weight("SLP").unwrap(), 0.25);
        assert!(importance.iter().all(|(_, w)| w >= 0.0));
    }

    #[test]
    fn ranked_sorts_descending() {
        let importance =
            FeatureImportance::from_totals([0.1, 0.5, 0.2, 0.1, 0.05, 0.05]).unwrap();
        let ranked = importance.ranked();

        assert_eq!(ranked[0].0, "DEWP");
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn all_zero_totals_are_rejected() {
        assert!(FeatureImportance::from_totals([0.0; NUM_FEATURES]).is_none());
    }

    #[test]
    fn unknown_feature_name() {
        let importance = FeatureImportance::from_totals([1.0; NUM_FEATURES]).unwrap();
        assert!(importance.weight("PRCP").is_none());
    }
}
