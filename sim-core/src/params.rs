use crate::error::{Result, SimulationError};
use crate::types::{Population, Time};
use serde::{Deserialize, Serialize};

/// Inputs for a single simulation call.
///
/// Only the structural invariants are checked by the simulators:
///
/// - `initial_population` finite and `> 0`
/// - `duration` finite and `>= 0`
/// - `sample_count >= 2`
/// - `carrying_capacity` finite and `> 0` (logistic model only, where it is required)
///
/// The growth rate is accepted with any sign. Narrower ranges (such as a
/// slider limited to `[0.01, 1.0]`) belong to the input layer, see
/// [`crate::config::InputRanges`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub initial_population: Population,
    pub growth_rate: f64,
    pub duration: Time,
    pub sample_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrying_capacity: Option<Population>,
}

impl SimulationParameters {
    pub fn new(
        initial_population: Population,
        growth_rate: f64,
        duration: Time,
        sample_count: usize,
    ) -> Self {
        Self {
            initial_population,
            growth_rate,
            duration,
            sample_count,
            carrying_capacity: None,
        }
    }

    pub fn with_carrying_capacity(mut self, carrying_capacity: Population) -> Self {
        self.carrying_capacity = Some(carrying_capacity);
        self
    }

    /// Constant spacing between two consecutive samples, `duration / (sample_count - 1)`.
    ///
    /// ### Returns
    /// `None` when `sample_count < 2`, since there is no interval to divide.
    pub fn time_step(&self) -> Option<Time> {
        (self.sample_count >= 2).then(|| self.duration / (self.sample_count - 1) as f64)
    }

    /// Checks the invariants shared by both models.
    pub fn validate(&self) -> Result<()> {
        if self.sample_count < 2 {
            return Err(SimulationError::invalid(
                "sample_count",
                format!("must be at least 2, got {}", self.sample_count),
            ));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(SimulationError::invalid(
                "duration",
                format!("must be finite and non-negative, got {}", self.duration),
            ));
        }
        if !self.initial_population.is_finite() || self.initial_population <= 0.0 {
            return Err(SimulationError::invalid(
                "initial_population",
                format!("must be finite and positive, got {}", self.initial_population),
            ));
        }
        Ok(())
    }

    /// Checks the shared invariants plus the carrying capacity.
    ///
    /// ### Returns
    /// The carrying capacity, so callers don't have to unwrap it again.
    pub fn validate_logistic(&self) -> Result<Population> {
        self.validate()?;
        let Some(k) = self.carrying_capacity else {
            return Err(SimulationError::invalid(
                "carrying_capacity",
                "required for the logistic model",
            ));
        };
        if !k.is_finite() || k <= 0.0 {
            return Err(SimulationError::invalid(
                "carrying_capacity",
                format!("must be finite and positive, got {k}"),
            ));
        }
        Ok(k)
    }

    /// `true` when a carrying capacity is set but does not exceed the
    /// initial population. Such input is simulated as-is; the growth term
    /// is non-positive from the first step.
    pub fn is_degenerate_logistic(&self) -> bool {
        self.carrying_capacity
            .is_some_and(|k| k <= self.initial_population)
    }
}
