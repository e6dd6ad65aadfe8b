//! Daily station-level observation records and the derived severity label.
//!
//! Raw observations carry the six predictor variables plus precipitation.
//! The binary severity label is a pure function of precipitation: a day is
//! severe iff `PRCP` exceeds [`SEVERE_PRCP_THRESHOLD`]. The label can only
//! come out of [`LabeledObservation::from_observation`], so it can never
//! drift out of sync with the precipitation value it was derived from.

use serde::{Deserialize, Serialize};

/// Number of predictor variables fed to the classifier.
pub const NUM_FEATURES: usize = 6;

/// Predictor column names, in canonical matrix order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["TEMP", "DEWP", "SLP", "WDSP", "MAX", "MIN"];

/// Columns an input table must provide: the six predictors plus `PRCP`.
pub const REQUIRED_COLUMNS: [&str; 7] = ["TEMP", "DEWP", "SLP", "WDSP", "MAX", "MIN", "PRCP"];

/// Precipitation above this value marks a day as severe weather.
///
/// Same units as the raw source data (hundredths of inches per day).
pub const SEVERE_PRCP_THRESHOLD: f64 = 25.0;

/// One day of station-level measurements, fully populated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Mean temperature.
    pub temp: f64,
    /// Mean dew point.
    pub dewp: f64,
    /// Mean sea-level pressure.
    pub slp: f64,
    /// Mean wind speed.
    pub wdsp: f64,
    /// Maximum temperature.
    pub max_temp: f64,
    /// Minimum temperature.
    pub min_temp: f64,
    /// Total precipitation.
    pub prcp: f64,
}

impl Observation {
    /// The six predictor values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn predictors(&self) -> [f64; NUM_FEATURES] {
        [
            self.temp,
            self.dewp,
            self.slp,
            self.wdsp,
            self.max_temp,
            self.min_temp,
        ]
    }
}

/// An observation with its derived severity label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledObservation {
    observation: Observation,
    severe: bool,
}

impl LabeledObservation {
    /// Label an observation. `severe` is derived from precipitation and
    /// cannot be set any other way.
    #[must_use]
    pub fn from_observation(observation: Observation) -> Self {
        Self {
            severe: observation.prcp > SEVERE_PRCP_THRESHOLD,
            observation,
        }
    }

    /// The underlying measurements.
    #[must_use]
    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    /// Whether this day counts as severe weather.
    #[must_use]
    pub fn severe(&self) -> bool {
        self.severe
    }

    /// Predictor values for this row.
    #[must_use]
    pub fn predictors(&self) -> [f64; NUM_FEATURES] {
        self.observation.predictors()
    }
}
