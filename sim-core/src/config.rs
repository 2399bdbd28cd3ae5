use crate::{error::ConfigError, models::GrowthModel, params::SimulationParameters};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Starting values for the parameter input layer.
///
/// Every field has a default, so a TOML file only needs to list the values
/// it changes:
///
/// ```toml
/// model = "logistic"
/// growth_rate = 0.5
///
/// [ranges]
/// duration_max = 100.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: GrowthModel,
    pub initial_population: f64,
    pub growth_rate: f64,
    pub duration: f64,
    pub sample_count: usize,
    pub carrying_capacity: f64,
    pub ranges: InputRanges,
}

/// Ranges the input layer keeps its controls in.
///
/// The simulators never look at these; they only enforce the structural
/// checks in [`SimulationParameters::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputRanges {
    pub growth_rate_min: f64,
    pub growth_rate_max: f64,
    pub growth_rate_step: f64,
    pub duration_min: f64,
    pub duration_max: f64,
    pub initial_population_min: f64,
    /// Carrying capacity must be at least `initial_population + margin`.
    pub carrying_capacity_margin: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: GrowthModel::Exponential,
            initial_population: 100.0,
            growth_rate: 0.3,
            duration: 20.0,
            sample_count: 500,
            carrying_capacity: 1000.0,
            ranges: InputRanges::default(),
        }
    }
}

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            growth_rate_min: 0.01,
            growth_rate_max: 1.0,
            growth_rate_step: 0.01,
            duration_min: 1.0,
            duration_max: 50.0,
            initial_population_min: 1.0,
            carrying_capacity_margin: 1.0,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Lowest carrying capacity the input layer offers for the current N0.
    pub fn min_carrying_capacity(&self) -> f64 {
        self.initial_population + self.ranges.carrying_capacity_margin
    }

    /// Returns a copy with every input forced into [`InputRanges`].
    ///
    /// Initial population and carrying capacity are rounded to whole numbers.
    /// Never panics, even when a file lists a minimum above its maximum.
    pub fn clamp_inputs(&self) -> Self {
        let r = &self.ranges;
        let mut out = self.clone();

        out.growth_rate = self
            .growth_rate
            .max(r.growth_rate_min)
            .min(r.growth_rate_max);
        out.duration = self.duration.max(r.duration_min).min(r.duration_max);
        out.initial_population = self.initial_population.round().max(r.initial_population_min);
        out.sample_count = self.sample_count.max(2);
        out.carrying_capacity = self
            .carrying_capacity
            .round()
            .max(out.min_carrying_capacity());
        out
    }

    /// Builds the simulator inputs for `model`.
    ///
    /// The carrying capacity is attached only for [`GrowthModel::Logistic`].
    pub fn parameters(&self, model: GrowthModel) -> SimulationParameters {
        let params = SimulationParameters::new(
            self.initial_population,
            self.growth_rate,
            self.duration,
            self.sample_count,
        );
        if model.uses_carrying_capacity() {
            params.with_carrying_capacity(self.carrying_capacity)
        } else {
            params
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_dashboard_start_state() {
        let cfg = Config::default();
        assert_eq!(cfg.model, GrowthModel::Exponential);
        assert_eq!(cfg.initial_population, 100.0);
        assert_eq!(cfg.growth_rate, 0.3);
        assert_eq!(cfg.duration, 20.0);
        assert_eq!(cfg.sample_count, 500);
        assert_eq!(cfg.carrying_capacity, 1000.0);
        assert_eq!(cfg.ranges.growth_rate_min, 0.01);
        assert_eq!(cfg.ranges.growth_rate_max, 1.0);
        assert_eq!(cfg.min_carrying_capacity(), 101.0);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = Config::from_toml_str(
            r#"
model = "logistic"
growth_rate = 0.5

[ranges]
duration_max = 100.0
"#,
        )
        .unwrap();

        assert_eq!(cfg.model, GrowthModel::Logistic);
        assert_eq!(cfg.growth_rate, 0.5);
        assert_eq!(cfg.initial_population, 100.0);
        assert_eq!(cfg.ranges.duration_max, 100.0);
        assert_eq!(cfg.ranges.duration_min, 1.0);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = Config::from_toml_str("growth_rate = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = Config::from_toml_str("model = \"gompertz\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "duration = 35.0\ncarrying_capacity = 2500.0").unwrap();

        let cfg = Config::from_file(file.path()).unwrap();

        assert_eq!(cfg.duration, 35.0);
        assert_eq!(cfg.carrying_capacity, 2500.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn clamp_inputs_forces_values_into_ranges() {
        let cfg = Config {
            initial_population: -5.0,
            growth_rate: 3.0,
            duration: 0.0,
            sample_count: 1,
            carrying_capacity: 0.5,
            ..Config::default()
        };

        let c = cfg.clamp_inputs();

        assert_eq!(c.initial_population, 1.0);
        assert_eq!(c.growth_rate, 1.0);
        assert_eq!(c.duration, 1.0);
        assert_eq!(c.sample_count, 2);
        assert_eq!(c.carrying_capacity, 2.0);
        assert!(c.parameters(GrowthModel::Logistic).validate_logistic().is_ok());
    }

    #[test]
    fn clamp_inputs_keeps_in_range_values() {
        let cfg = Config::default();
        assert_eq!(cfg.clamp_inputs(), cfg);
    }

    #[test]
    fn clamp_inputs_rounds_populations_to_whole_numbers() {
        let cfg = Config {
            initial_population: 99.6,
            carrying_capacity: 1000.4,
            ..Config::default()
        };

        let c = cfg.clamp_inputs();
        assert_eq!(c.initial_population, 100.0);
        assert_eq!(c.carrying_capacity, 1000.0);
    }

    #[test]
    fn parameters_attach_capacity_only_for_logistic() {
        let cfg = Config::default();

        let exp = cfg.parameters(GrowthModel::Exponential);
        assert_eq!(exp.carrying_capacity, None);
        assert_eq!(exp.sample_count, 500);

        let log = cfg.parameters(GrowthModel::Logistic);
        assert_eq!(log.carrying_capacity, Some(1000.0));
        assert_eq!(log.initial_population, 100.0);
    }
}
