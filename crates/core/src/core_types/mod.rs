//! Core data types shared across the pipeline

pub mod observation;
pub mod table;

pub use observation::{
    LabeledObservation, Observation, FEATURE_NAMES, NUM_FEATURES, REQUIRED_COLUMNS,
    SEVERE_PRCP_THRESHOLD,
};
pub use table::RawTable;
