use crate::types::{Population, Time};

/// One `(time, population)` sample of a simulated curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    pub time: Time,
    pub population: Population,
}

/// Ordered, evenly spaced samples produced by one simulation call.
///
/// A series is only built by the simulators, after validation, so it always
/// holds at least two points and its times run from `0` to the duration.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    points: Vec<SamplePoint>,
}

impl TimeSeries {
    pub(crate) fn from_points(points: Vec<SamplePoint>) -> Self {
        debug_assert!(points.len() >= 2);
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    pub fn times(&self) -> impl Iterator<Item = Time> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn populations(&self) -> impl Iterator<Item = Population> + '_ {
        self.points.iter().map(|p| p.population)
    }

    pub fn final_point(&self) -> &SamplePoint {
        &self.points[self.points.len() - 1]
    }

    /// Population at the end of the simulated interval, at full precision.
    pub fn final_population(&self) -> Population {
        self.final_point().population
    }

    /// `false` if any population overflowed to infinity or became NaN.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.population.is_finite())
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Evenly spaced times `i * dt` for `i` in `0..sample_count`, with the last
/// one pinned to exactly `duration`.
///
/// Callers must have validated `sample_count >= 2`.
pub(crate) fn time_grid(duration: Time, sample_count: usize) -> impl Iterator<Item = Time> {
    let last = sample_count - 1;
    let step = duration / last as f64;
    (0..sample_count).map(move |i| if i == last { duration } else { i as f64 * step })
}

/// Truncates a population toward zero for display.
///
/// ### Returns
/// `None` for infinite or NaN values, which callers should report as overflow.
pub fn display_population(population: Population) -> Option<i64> {
    population
        .is_finite()
        .then(|| population.trunc() as i64)
}
