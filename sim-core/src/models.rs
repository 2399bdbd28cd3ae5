//! The two population growth models.
//!
//! - [`simulate_exponential`] evaluates the closed form `N(t) = N0 * e^(r t)`
//!   at every sample time, so there is no accumulated error.
//! - [`simulate_logistic`] integrates `dN/dt = r N (1 - N / K)` with the
//!   forward Euler method on the same time grid. The discretization error
//!   is part of the output: for large `r * dt` the curve overshoots `K`.
//!
//! Both functions are pure. Each call allocates and returns its own
//! [`TimeSeries`].

use crate::{
    error::Result,
    params::SimulationParameters,
    series::{SamplePoint, TimeSeries, time_grid},
    types::Population,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Which growth model to simulate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthModel {
    /// Unlimited resources: `N(t) = N0 * e^(r t)`.
    #[default]
    Exponential,
    /// Limited resources: `dN/dt = r N (1 - N / K)`.
    Logistic,
}

impl GrowthModel {
    pub const ALL: [GrowthModel; 2] = [GrowthModel::Exponential, GrowthModel::Logistic];

    pub fn label(self) -> &'static str {
        match self {
            GrowthModel::Exponential => "Exponential Growth",
            GrowthModel::Logistic => "Logistic Growth",
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            GrowthModel::Exponential => "N(t) = N₀ · e^(rt)",
            GrowthModel::Logistic => "dN/dt = rN(1 − N/K)",
        }
    }

    pub fn curve_shape(self) -> &'static str {
        match self {
            GrowthModel::Exponential => "J-shaped",
            GrowthModel::Logistic => "S-shaped",
        }
    }

    pub fn uses_carrying_capacity(self) -> bool {
        matches!(self, GrowthModel::Logistic)
    }
}

/// Runs the simulator that corresponds to `model`.
///
/// ### Parameters
/// - `model` - Which growth model to use.
/// - `params` - Simulation inputs; the logistic model additionally requires
///   `params.carrying_capacity`.
///
/// ### Returns
/// The sampled curve, or [`crate::SimulationError::InvalidParameter`].
pub fn simulate(model: GrowthModel, params: &SimulationParameters) -> Result<TimeSeries> {
    match model {
        GrowthModel::Exponential => simulate_exponential(params),
        GrowthModel::Logistic => simulate_logistic(params),
    }
}

/// Samples exponential growth on an evenly spaced time grid.
///
/// For each `t_i = i * T / (n - 1)`:
///
/// `N(t_i) = N0 * e^(r * t_i)`
///
/// The population is strictly increasing for `r > 0`, constant for
/// `r == 0`, and decreasing for `r < 0`. For large `r * T` the values
/// overflow to infinity; this is returned as-is and logged at `warn` level.
///
/// ### Parameters
/// - `params` - `carrying_capacity` is ignored.
///
/// ### Returns
/// A series of exactly `params.sample_count` points.
pub fn simulate_exponential(params: &SimulationParameters) -> Result<TimeSeries> {
    params.validate()?;

    let n0 = params.initial_population;
    let r = params.growth_rate;

    let points = time_grid(params.duration, params.sample_count)
        .map(|time| SamplePoint {
            time,
            population: n0 * (r * time).exp(),
        })
        .collect();
    let series = TimeSeries::from_points(points);

    debug!(
        samples = series.len(),
        final_population = series.final_population(),
        "simulated exponential growth"
    );
    if !series.is_finite() {
        warn!(
            growth_rate = r,
            duration = params.duration,
            "exponential growth overflowed to a non-finite population"
        );
    }

    Ok(series)
}

/// Right-hand side of the logistic equation, `r N (1 - N / K)`.
#[inline]
pub fn logistic_rate(
    population: Population,
    growth_rate: f64,
    carrying_capacity: Population,
) -> f64 {
    growth_rate * population * (1.0 - population / carrying_capacity)
}

/// Integrates logistic growth with the forward Euler method.
///
/// Starting from `N(t_0) = N0`, each step is
///
/// `N(t_i) = N(t_{i-1}) + logistic_rate(N(t_{i-1}), r, K) * dt`
///
/// with `dt = T / (n - 1)`. The rate is evaluated first and then scaled by
/// `dt`, in that order, so the output is reproducible bit for bit.
///
/// When `0 < N0 < K` and `r > 0` the curve rises toward `K`. A coarse step
/// can carry it past `K`; the value is not clamped. `K <= N0` is simulated
/// too (the population stays put or declines) and logged at `warn` level.
///
/// ### Parameters
/// - `params` - Must carry a positive `carrying_capacity`.
///
/// ### Returns
/// A series of exactly `params.sample_count` points.
pub fn simulate_logistic(params: &SimulationParameters) -> Result<TimeSeries> {
    let k = params.validate_logistic()?;

    if params.is_degenerate_logistic() {
        warn!(
            initial_population = params.initial_population,
            carrying_capacity = k,
            "carrying capacity does not exceed the initial population"
        );
    }

    let r = params.growth_rate;
    let dt = params.duration / (params.sample_count - 1) as f64;

    let populations = std::iter::successors(Some(params.initial_population), |&n| {
        Some(n + logistic_rate(n, r, k) * dt)
    });

    let points = time_grid(params.duration, params.sample_count)
        .zip(populations)
        .map(|(time, population)| SamplePoint { time, population })
        .collect();
    let series = TimeSeries::from_points(points);

    debug!(
        samples = series.len(),
        dt,
        final_population = series.final_population(),
        "simulated logistic growth"
    );

    Ok(series)
}
