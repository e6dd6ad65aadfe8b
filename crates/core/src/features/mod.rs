//! Feature and label derivation from raw observation tables.
//!
//! [`FeatureBuilder`] is the validation pass between ingestion and
//! training: it resolves the required schema, drops every row with a
//! missing cell, and derives the severity label for the rows that remain.
//! The resulting [`Dataset`] is fully populated — downstream code never
//! sees a missing value and never re-derives the label.
//!
//! The pass is deterministic: the same table always yields the same
//! dataset, row order preserved.

use crate::core_types::{LabeledObservation, Observation, RawTable, REQUIRED_COLUMNS};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ordered collection of labeled observations with no missing values.
///
/// Produced exclusively by [`FeatureBuilder::build`]; rows dropped during
/// construction are gone for good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    observations: Vec<LabeledObservation>,
}

impl Dataset {
    /// Number of retained rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Predictor values of row `i`, in canonical feature order.
    #[must_use]
    pub fn feature_row(&self, i: usize) -> [f64; crate::core_types::NUM_FEATURES] {
        self.observations[i].predictors()
    }

    /// Label of row `i`.
    #[must_use]
    pub fn label(&self, i: usize) -> bool {
        self.observations[i].severe()
    }

    /// How many rows are labeled severe.
    #[must_use]
    pub fn severe_count(&self) -> usize {
        self.observations.iter().filter(|o| o.severe()).count()
    }

    /// Iterate over the labeled rows.
    pub fn iter(&self) -> impl Iterator<Item = &LabeledObservation> {
        self.observations.iter()
    }
}

/// Builds a clean [`Dataset`] from a [`RawTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Select the required columns, drop incomplete rows, derive labels.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Data`] if any of the seven required columns is absent
    ///   from the table schema.
    /// - [`CoreError::InsufficientData`] if no row has all seven values.
    pub fn build(table: &RawTable) -> Result<Dataset> {
        // Resolve the full schema up front so a missing column is reported
        // even when the table has zero rows.
        let mut positions = [0usize; 7];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = table.column_index(name)?;
        }

        let mut observations = Vec::with_capacity(table.num_rows());
        let mut dropped = 0usize;
        for row in table.iter_rows() {
            match Self::extract(row, &positions) {
                Some(obs) => observations.push(LabeledObservation::from_observation(obs)),
                None => dropped += 1,
            }
        }

        debug!(
            retained = observations.len(),
            dropped, "feature table filtered"
        );

        if observations.is_empty() {
            return Err(CoreError::insufficient(format!(
                "0 of {} rows had values for all required fields",
                table.num_rows()
            )));
        }

        Ok(Dataset { observations })
    }

    /// Pull a complete observation out of a row, or `None` if any required
    /// cell is missing.
    fn extract(row: &[Option<f64>], positions: &[usize; 7]) -> Option<Observation> {
        let mut values = [0.0f64; 7];
        for (value, &pos) in values.iter_mut().zip(positions) {
            *value = row[pos]?;
        }
        let [temp, dewp, slp, wdsp, max_temp, min_temp, prcp] = values;
        Some(Observation {
            temp,
            dewp,
            slp,
            wdsp,
            max_temp,
            min_temp,
            prcp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(ToString::to_string).collect()
    }

    fn full_row(prcp: f64) -> Vec<Option<f64>> {
        vec![
            Some(68.0),
            Some(55.0),
            Some(1012.0),
            Some(7.0),
            Some(80.0),
            Some(58.0),
            Some(prcp),
        ]
    }

    /// Rows with any missing required value are excluded; labels follow
    /// precipitation for every retained row.
    #[test]
    fn drops_incomplete_rows_and_labels_the_rest() {
        let mut gap = full_row(40.0);
        gap[2] = None; // missing SLP
        let table = RawTable::new(columns(), vec![full_row(0.0), gap, full_row(30.0)]).unwrap();

        let dataset = FeatureBuilder::build(&table).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.label(0));
        assert!(dataset.label(1));
        assert_eq!(dataset.severe_count(), 1);
    }

    /// A missing column is a schema error, not a row filter.
    #[test]
    fn missing_column_is_a_schema_error() {
        let names: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&c| c != "SLP")
            .map(ToString::to_string)
            .collect();
        let table = RawTable::new(names, vec![]).unwrap();

        let err = FeatureBuilder::build(&table).unwrap_err();
        assert!(matches!(err, CoreError::Data { context } if context.contains("'SLP'")));
    }

    /// All rows incomplete leaves nothing to train on.
    #[test]
    fn all_rows_missing_is_insufficient() {
        let mut row = full_row(1.0);
        row[6] = None;
        let table = RawTable::new(columns(), vec![row.clone(), row]).unwrap();

        let err = FeatureBuilder::build(&table).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientData { .. }));
    }

    /// Extra columns in the table are ignored; order does not matter.
    #[test]
    fn tolerates_extra_and_reordered_columns() {
        let mut names = vec!["STATION".to_string(), "PRCP".to_string()];
        names.extend(
            ["MIN", "MAX", "WDSP", "SLP", "DEWP", "TEMP"]
                .iter()
                .map(ToString::to_string),
        );
        let row = vec![
            Some(999.0), // STATION, ignored
            Some(30.0),  // PRCP
            Some(58.0),  // MIN
            Some(80.0),  // MAX
            Some(7.0),   // WDSP
            Some(1012.0),
            Some(55.0),
            Some(68.0),
        ];
        let table = RawTable::new(names, vec![row]).unwrap();

        let dataset = FeatureBuilder::build(&table).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.label(0));
        let features = dataset.feature_row(0);
        assert_eq!(features[0], 68.0); // TEMP
        assert_eq!(features[3], 7.0); // WDSP
    }
}
