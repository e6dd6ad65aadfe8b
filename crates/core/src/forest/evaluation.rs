//! Hold-out evaluation: confusion counts and per-class metrics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prediction counts over the test rows, with "severe" as the positive
/// class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Severe days predicted severe.
    pub true_positives: usize,
    /// Calm days predicted severe.
    pub false_positives: usize,
    /// Calm days predicted calm.
    pub true_negatives: usize,
    /// Severe days predicted calm.
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally one test-row outcome.
    pub fn record(&mut self, actual: bool, predicted: bool) {
        match (actual, predicted) {
            (true, true) => self.true_positives += 1,
            (false, true) => self.false_positives += 1,
            (false, false) => self.true_negatives += 1,
            (true, false) => self.false_negatives += 1,
        }
    }

    /// Total rows tallied.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }
}

/// Precision, recall, F1 and support for one label class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Fraction of predicted-this-class rows that were correct.
    pub precision: f64,
    /// Fraction of actual-this-class rows that were found.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of actual rows of this class in the test set.
    pub support: usize,
}

impl ClassMetrics {
    /// Derive metrics from counts, treating this class as positive.
    /// Empty denominators yield 0.0 rather than NaN.
    fn from_counts(tp: usize, fp: usize, missed: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + missed);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1,
            support: tp + missed,
        }
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Per-class metrics plus overall accuracy on the test partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Metrics with severe days as the positive class.
    pub severe: ClassMetrics,
    /// Metrics with calm days as the positive class.
    pub calm: ClassMetrics,
    /// Fraction of all test rows predicted correctly.
    pub accuracy: f64,
    /// Raw prediction counts behind the metrics.
    pub confusion: ConfusionMatrix,
}

impl ClassificationReport {
    /// Compute the full report from tallied counts.
    #[must_use]
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let severe = ClassMetrics::from_counts(
            confusion.true_positives,
            confusion.false_positives,
            confusion.false_negatives,
        );
        let calm = ClassMetrics::from_counts(
            confusion.true_negatives,
            confusion.false_negatives,
            confusion.false_positives,
        );
        let accuracy = ratio(
            confusion.true_positives + confusion.true_negatives,
            confusion.total(),
        );
        Self {
            severe,
            calm,
            accuracy,
            confusion,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1", "support"
        )?;
        for (name, m) in [("calm", &self.calm), ("severe", &self.severe)] {
            writeln!(
                f,
                "{:>10} {:>10.3} {:>10.3} {:>10.3} {:>10}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        write!(
            f,
            "{:>10} {:>43.3} ({} rows)",
            "accuracy",
            self.accuracy,
            self.confusion.total()
        )
    }
}
