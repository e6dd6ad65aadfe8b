//! Raw tabular input as delivered by the ingestion collaborator.
//!
//! A [`RawTable`] is the only input contract of the pipeline: named columns
//! and rows of optional floating-point cells. Missing cells are permitted
//! here and filtered out later during feature building; a missing *column*
//! is a schema violation and is reported immediately on lookup.

use crate::error::{CoreError, Result};
use rustc_hash::FxHashMap;

/// A column-named table of optional floating-point values.
#[derive(Debug, Clone)]
pub struct RawTable {
    columns: Vec<String>,
    /// Fast name -> position lookup for schema resolution.
    index: FxHashMap<String, usize>,
    rows: Vec<Vec<Option<f64>>>,
}

impl RawTable {
    /// Build a table from column names and row data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Data`] if any row is ragged (its cell count
    /// does not match the number of columns).
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CoreError::Data {
                    context: format!(
                        "row {i} has {} cells, expected {}",
                        row.len(),
                        columns.len()
                    ),
                });
            }
        }
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Position of a named column.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Data`] if the column is absent.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::missing_column(name))
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// A single row of cells.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.rows[i]
    }

    /// Iterate over all rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup() {
        let table = RawTable::new(
            vec!["TEMP".to_string(), "PRCP".to_string()],
            vec![vec![Some(70.0), Some(0.2)]],
        )
        .unwrap();

        assert_eq!(table.column_index("PRCP").unwrap(), 1);
        assert!(matches!(
            table.column_index("SLP"),
            Err(CoreError::Data { context }) if context.contains("'SLP'")
        ));
    }

    #[test]
    fn ragged_rows_rejected() {
        let result = RawTable::new(
            vec!["TEMP".to_string(), "PRCP".to_string()],
            vec![vec![Some(70.0)]],
        );
        assert!(matches!(result, Err(CoreError::Data { .. })));
    }
}
