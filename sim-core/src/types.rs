/// Simulated time, in the same abstract units as the growth rate.
pub type Time = f64;

/// Population size. Kept as a real number; rounding is a display concern.
pub type Population = f64;
