//! Bounded FIFO waiting line
//!
//! A waiting line stores the arrival time of every customer that found the
//! server busy. Customers leave strictly in arrival order.

use crate::error::QueueError;
use des_core::SimTime;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// FIFO line of arrival timestamps bounded by a fixed limit
///
/// The length never exceeds the limit: an arrival that would push it past
/// the limit is rejected with [`QueueError::Overflow`] and leaves the line
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingLine {
    arrivals: VecDeque<SimTime>,
    limit: usize,
}

impl WaitingLine {
    /// Create an empty line holding at most `limit` customers
    pub fn new(limit: usize) -> Self {
        Self {
            arrivals: VecDeque::new(),
            limit,
        }
    }

    /// Append a customer who arrived at `arrived_at`, returning the new length
    pub fn push(&mut self, arrived_at: SimTime) -> Result<usize, QueueError> {
        if self.arrivals.len() >= self.limit {
            return Err(QueueError::Overflow {
                limit: self.limit,
                time: arrived_at,
            });
        }
        self.arrivals.push_back(arrived_at);
        Ok(self.arrivals.len())
    }

    /// Remove the customer who has waited longest
    pub fn pop(&mut self) -> Option<SimTime> {
        self.arrivals.pop_front()
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(minutes: f64) -> SimTime {
        SimTime::from_minutes(minutes)
    }

    #[test]
    fn test_fifo_order() {
        let mut line = WaitingLine::new(10);
        assert!(line.is_empty());

        line.push(t(1.0)).unwrap();
        line.push(t(2.0)).unwrap();
        assert_eq!(line.push(t(3.0)).unwrap(), 3);

        assert_eq!(line.pop(), Some(t(1.0)));
        assert_eq!(line.pop(), Some(t(2.0)));
        assert_eq!(line.pop(), Some(t(3.0)));
        assert_eq!(line.pop(), None);
    }

    #[test]
    fn test_overflow_leaves_line_unchanged() {
        let mut line = WaitingLine::new(2);
        line.push(t(1.0)).unwrap();
        line.push(t(2.0)).unwrap();

        let err = line.push(t(3.0)).unwrap_err();
        assert_eq!(err, QueueError::Overflow { limit: 2, time: t(3.0) });
        assert_eq!(line.len(), 2);
        assert_eq!(line.pop(), Some(t(1.0)));
        assert_eq!(line.pop(), Some(t(2.0)));
        assert!(line.is_empty());
    }

    #[test]
    fn test_growth_up_to_limit() {
        let mut line = WaitingLine::new(1_000);
        for k in 0..1_000 {
            line.push(t(k as f64)).unwrap();
        }
        assert_eq!(line.len(), 1_000);
        assert!(line.push(t(1_000.0)).is_err());
        assert_eq!(line.len(), 1_000);
        assert_eq!(line.limit(), 1_000);
    }
}
