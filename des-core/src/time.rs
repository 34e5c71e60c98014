//! Simulation time management

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

/// Simulation time in simulated minutes
///
/// SimTime represents a point in simulation time, stored as minutes since the
/// start of the current replication. Values are always finite and
/// non-negative, which makes the total order over them well defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTime(f64);

impl SimTime {
    /// Create a new SimTime at the simulation start (time zero)
    pub const fn zero() -> Self {
        SimTime(0.0)
    }

    /// Create a SimTime from minutes
    ///
    /// # Panics
    ///
    /// Panics if the input is negative, infinite, or NaN.
    pub fn from_minutes(minutes: f64) -> Self {
        if !minutes.is_finite() {
            panic!("SimTime cannot be created from non-finite value: {minutes}");
        }
        if minutes < 0.0 {
            panic!("SimTime cannot be negative: {minutes}");
        }
        // Normalises -0.0 so equal instants compare equal under total_cmp
        SimTime(minutes + 0.0)
    }

    /// Get the raw minute value
    pub const fn as_minutes(&self) -> f64 {
        self.0
    }

    /// Minutes elapsed since an earlier SimTime, saturating at zero
    pub fn duration_since(&self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Add a number of minutes to this SimTime
    ///
    /// Negative or non-finite offsets are treated as zero.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        if minutes.is_finite() && minutes > 0.0 {
            SimTime(self.0 + minutes)
        } else {
            *self
        }
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: f64) -> Self::Output {
        self.add_minutes(rhs)
    }
}

impl Sub<SimTime> for SimTime {
    type Output = f64;

    fn sub(self, rhs: SimTime) -> Self::Output {
        self.duration_since(rhs)
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl From<f64> for SimTime {
    /// Convert from minutes (as f64) to SimTime
    ///
    /// # Examples
    /// ```
    /// # use des_core::SimTime;
    /// let time = SimTime::from(1.5);
    /// assert_eq!(time.as_minutes(), 1.5);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the input is negative, infinite, or NaN.
    fn from(minutes: f64) -> Self {
        SimTime::from_minutes(minutes)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}min", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simtime_creation() {
        assert_eq!(SimTime::zero().as_minutes(), 0.0);
        assert_eq!(SimTime::from_minutes(2.5).as_minutes(), 2.5);
        assert_eq!(SimTime::default(), SimTime::zero());
    }

    #[test]
    fn test_simtime_arithmetic() {
        let t1 = SimTime::from_minutes(10.0);
        let t2 = SimTime::from_minutes(4.0);

        assert_eq!(t1 + 2.5, SimTime::from_minutes(12.5));
        assert_eq!(t1 - t2, 6.0);
        // Elapsed time saturates rather than going negative
        assert_eq!(t2 - t1, 0.0);
        assert_eq!(t1 + -3.0, t1);
    }

    #[test]
    fn test_simtime_ordering() {
        let t1 = SimTime::from_minutes(1.0);
        let t2 = SimTime::from_minutes(2.0);

        assert!(t1 < t2);
        assert!(t2 > t1);
        assert_eq!(t1.cmp(&t1), Ordering::Equal);
        assert_eq!(t1.max(t2), t2);
    }

    #[test]
    fn test_simtime_display() {
        assert_eq!(SimTime::from_minutes(1.5).to_string(), "1.500min");
        assert_eq!(SimTime::zero().to_string(), "0.000min");
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be negative")]
    fn test_simtime_from_negative_f64() {
        let _ = SimTime::from(-1.0);
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be created from non-finite value")]
    fn test_simtime_from_infinite_f64() {
        let _ = SimTime::from(f64::INFINITY);
    }

    #[test]
    #[should_panic(expected = "SimTime cannot be created from non-finite value")]
    fn test_simtime_from_nan_f64() {
        let _ = SimTime::from(f64::NAN);
    }
}
