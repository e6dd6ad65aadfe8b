//! Error taxonomy for the core pipeline.
//!
//! Every failure is terminal for the operation that raised it and carries
//! enough context (column name, row counts, configured bounds) for the
//! caller to act on. The library never retries internally and never
//! substitutes default data for a failed stage.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures surfaced by feature building, training, and simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The input table violates the required schema.
    #[error("input table schema violation: {context}")]
    Data {
        /// Which column or row broke the schema.
        context: String,
    },

    /// No usable rows remain, or a partition side came up empty.
    #[error("insufficient data: {context}")]
    InsufficientData {
        /// What ran dry, with counts.
        context: String,
    },

    /// The training set cannot support learning a decision boundary.
    #[error("model training failed: {reason}")]
    ModelTraining {
        /// Why the ensemble cannot be fit (e.g. class counts).
        reason: String,
    },

    /// A simulation step count outside the allowed range.
    #[error("invalid step count {steps}: must be between {min} and {max}")]
    Config {
        /// Requested number of steps.
        steps: usize,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
    },
}

impl CoreError {
    /// Schema violation for a named column.
    pub(crate) fn missing_column(column: &str) -> Self {
        Self::Data {
            context: format!("required column '{column}' is missing"),
        }
    }

    /// Empty dataset or partition.
    pub(crate) fn insufficient(context: impl Into<String>) -> Self {
        Self::InsufficientData {
            context: context.into(),
        }
    }

    /// Untrainable label distribution.
    pub(crate) fn untrainable(reason: impl Into<String>) -> Self {
        Self::ModelTraining {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = CoreError::missing_column("SLP");
        assert_eq!(
            err.to_string(),
            "input table schema violation: required column 'SLP' is missing"
        );

        let err = CoreError::Config {
            steps: 500,
            min: 50,
            max: 200,
        };
        assert_eq!(
            err.to_string(),
            "invalid step count 500: must be between 50 and 200"
        );
    }
}
