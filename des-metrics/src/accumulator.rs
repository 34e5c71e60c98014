//! Time-weighted and discrete statistics accumulators

use serde::{Deserialize, Serialize};

/// Integral of a piecewise-constant level over simulated time
///
/// The level is sampled just before it changes, so each call adds the
/// rectangle `level * elapsed` for the interval since the previous event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWeighted {
    area: f64,
}

impl TimeWeighted {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `level * elapsed` to the running area.
    pub fn accumulate(&mut self, level: f64, elapsed: f64) {
        debug_assert!(elapsed >= 0.0, "negative interval {elapsed}");
        self.area += level * elapsed;
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    /// Time-average of the level over `duration`, or 0.0 for an empty run.
    pub fn time_average(&self, duration: f64) -> f64 {
        ratio(self.area, duration)
    }

    pub fn reset(&mut self) {
        self.area = 0.0;
    }
}

/// Running sum and count of discrete observations (delays, transit times)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    sum: f64,
    count: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the observations, or 0.0 when nothing was recorded.
    pub fn mean(&self) -> f64 {
        ratio(self.sum, self.count as f64)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `numerator / denominator`, reporting 0.0 when the denominator is not positive.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
