//! Discrete-time stochastic simulation of storm intensity.
//!
//! The state machine tracks three scalars — temperature, humidity, and
//! pressure — and emits one intensity sample per step:
//!
//! ```text
//! instability   = (temperature - 25) * (humidity / 100)
//! pressure_drop = (1013 - pressure) / 10
//! intensity     = instability + pressure_drop
//! ```
//!
//! The sample is recorded *before* the state advances, so the first step
//! of a fresh simulator is always exactly 3.5 regardless of randomness.
//! Each update draws from strictly positive ranges: temperature only
//! falls, humidity only rises, pressure only falls, for every run.
//!
//! The random source is injected by the caller. Passing `rand::rng()`
//! gives the unseeded behavior; passing a seeded generator makes a run
//! reproducible without ever touching the classifier's seeded stream.

use crate::error::{CoreError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use tracing::debug;

/// Fewest steps a simulation may run.
pub const MIN_STEPS: usize = 50;
/// Most steps a simulation may run.
pub const MAX_STEPS: usize = 200;

const INITIAL_TEMPERATURE: f64 = 30.0;
const INITIAL_HUMIDITY: f64 = 70.0;
/// Reference sea-level pressure, also the initial state (hPa).
const BASE_PRESSURE: f64 = 1013.0;
/// Temperature below which the instability term goes negative.
const INSTABILITY_REFERENCE_TEMPERATURE: f64 = 25.0;

/// Validated simulation run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    steps: usize,
}

impl SimulationConfig {
    /// Accept a step count in `[MIN_STEPS, MAX_STEPS]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for any count outside the range.
    pub fn new(steps: usize) -> Result<Self> {
        if !(MIN_STEPS..=MAX_STEPS).contains(&steps) {
            return Err(CoreError::Config {
                steps,
                min: MIN_STEPS,
                max: MAX_STEPS,
            });
        }
        Ok(Self { steps })
    }

    /// The validated step count.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }
}

/// The three mutable scalars of the storm system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Air temperature (°C).
    pub temperature: f64,
    /// Relative humidity (%).
    pub humidity: f64,
    /// Surface pressure (hPa).
    pub pressure: f64,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            temperature: INITIAL_TEMPERATURE,
            humidity: INITIAL_HUMIDITY,
            pressure: BASE_PRESSURE,
        }
    }
}

/// Intensity samples in step order, one per simulated step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntensitySeries {
    samples: Vec<f64>,
}

impl Deref for IntensitySeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.samples
    }
}

/// Storm intensity state machine.
#[derive(Debug, Clone, Default)]
pub struct StormSimulator {
    state: SimulationState,
}

impl StormSimulator {
    /// A simulator at the initial state (30 °C, 70 %, 1013 hPa).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Intensity of the current state: thermodynamic instability plus
    /// barometric pressure drop.
    #[must_use]
    pub fn intensity(&self) -> f64 {
        let instability = (self.state.temperature - INSTABILITY_REFERENCE_TEMPERATURE)
            * (self.state.humidity / 100.0);
        let pressure_drop = (BASE_PRESSURE - self.state.pressure) / 10.0;
        instability + pressure_drop
    }

    /// Record the current intensity, then advance the state.
    ///
    /// The draws are strictly positive, so temperature and pressure only
    /// ever decrease and humidity only ever increases.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let intensity = self.intensity();
        self.state.temperature -= rng.random_range(0.05..0.2);
        self.state.humidity += rng.random_range(0.1..0.5);
        self.state.pressure -= rng.random_range(0.5..1.0);
        intensity
    }

    /// Drive the state machine for a validated number of steps.
    ///
    /// Steps are strictly sequential — each sample depends on the state
    /// left behind by the previous one.
    pub fn run<R: Rng>(&mut self, config: &SimulationConfig, rng: &mut R) -> IntensitySeries {
        let samples = (0..config.steps()).map(|_| self.step(rng)).collect();
        debug!(steps = config.steps(), "simulation run complete");
        IntensitySeries { samples }
    }
}
