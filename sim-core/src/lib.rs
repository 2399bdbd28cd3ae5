//! Deterministic exponential and logistic population growth simulation.
//!
//! Main components:
//! - [`models`] — the two simulators and the [`GrowthModel`] selector.
//! - [`params`] — simulation inputs and their structural checks.
//! - [`series`] — the sampled `(time, population)` output.
//! - [`config`] — defaults and ranges for a parameter input layer.
//! - [`error`] — simulation and configuration errors.
//! - [`types`] — shared type aliases.

pub mod config;
pub mod error;
pub mod models;
pub mod params;
pub mod series;
pub mod types;

pub use error::{ConfigError, Result, SimulationError};
pub use models::{GrowthModel, simulate, simulate_exponential, simulate_logistic};
pub use params::SimulationParameters;
pub use series::{SamplePoint, TimeSeries};
