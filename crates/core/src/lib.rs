//! Severe-Weather Risk Core Library
//!
//! Turns daily station-level meteorological observations into a severe-
//! weather classifier and, independently, simulates storm intensity
//! evolution over time.
//!
//! Three subsystems, in pipeline order:
//! - Feature building: raw observation tables become clean, labeled
//!   datasets (rows with missing values dropped, severity derived from
//!   precipitation).
//! - Classification: a seeded train/test split feeds a bagged ensemble of
//!   decision trees, evaluated on the hold-out rows with per-class
//!   metrics and normalized feature importances.
//! - Storm simulation: a sequential stochastic state machine emitting one
//!   intensity sample per step from temperature, humidity, and pressure.
//!
//! The classifier and the simulator never share a random source: the
//! classifier's randomness is seeded through its configuration, while the
//! simulator takes whatever generator the caller injects.

// Core types and utilities
pub mod core_types;

pub mod error;
pub mod features;
pub mod forest;
pub mod simulation;

// Re-export core types
pub use core_types::{
    LabeledObservation, Observation, RawTable, FEATURE_NAMES, NUM_FEATURES, REQUIRED_COLUMNS,
    SEVERE_PRCP_THRESHOLD,
};

pub use error::{CoreError, Result};
pub use features::{Dataset, FeatureBuilder};
pub use forest::{
    train_and_evaluate, ClassMetrics, ClassificationReport, ConfusionMatrix, FeatureImportance,
    RandomForest, RandomForestConfig, TrainTestSplit, TrainingOutcome, DEFAULT_SEED,
};
pub use simulation::{
    IntensitySeries, SimulationConfig, SimulationState, StormSimulator, MAX_STEPS, MIN_STEPS,
};
