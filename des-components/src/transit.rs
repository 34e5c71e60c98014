//! Transit link between stage 1 and stage 2
//!
//! Customers leaving stage 1 travel for a random time before they reach
//! stage 2. The link keeps every in-flight customer ordered by the time it
//! becomes eligible to arrive, so the next stage-2 arrival is always the
//! earliest eligible one.

use des_core::SimTime;
use des_metrics::{Tally, TimeWeighted, TransitReport};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::debug;

/// A customer travelling between the stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    /// Time the customer left stage 1.
    pub departed: SimTime,
    /// Time the customer reaches stage 2.
    pub eligible: SimTime,
    sequence: u64,
}

impl InFlight {
    /// Minutes spent on the link
    pub fn transit_time(&self) -> f64 {
        self.eligible - self.departed
    }
}

impl Ord for InFlight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.eligible
            .cmp(&other.eligible)
            .then(self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for InFlight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// In-flight customers plus the in-flight statistics
///
/// Customers eligible at the same instant arrive in departure order.
#[derive(Debug, Clone)]
pub struct TransitLink {
    bound: f64,
    in_flight: BinaryHeap<Reverse<InFlight>>,
    next_sequence: u64,
    max_in_flight: usize,
    area: TimeWeighted,
    transit_times: Tally,
}

impl TransitLink {
    /// Create an empty link whose travel times are drawn on `[0, bound)`
    pub fn new(bound: f64) -> Self {
        Self {
            bound,
            in_flight: BinaryHeap::new(),
            next_sequence: 0,
            max_in_flight: 0,
            area: TimeWeighted::new(),
            transit_times: Tally::new(),
        }
    }

    /// Return to the empty state, keeping the bound
    pub fn reset(&mut self) {
        *self = Self::new(self.bound);
    }

    /// Upper bound of the uniform travel time, in minutes
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Put a customer leaving stage 1 at `now` on the link for `travel` minutes
    ///
    /// Returns the earliest eligible time among everyone now in flight, which
    /// is when the next stage-2 arrival is due.
    pub fn depart(&mut self, now: SimTime, travel: f64) -> SimTime {
        let customer = InFlight {
            departed: now,
            eligible: now + travel,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.in_flight.push(Reverse(customer));
        self.max_in_flight = self.max_in_flight.max(self.in_flight.len());
        debug!(
            time = %now,
            eligible = %customer.eligible,
            in_flight = self.in_flight.len(),
            "Customer entered transit"
        );
        // The heap cannot be empty after a push
        self.next_eligible().unwrap_or(customer.eligible)
    }

    /// Remove the earliest eligible customer as it reaches stage 2
    pub fn deliver(&mut self) -> Option<InFlight> {
        let Reverse(customer) = self.in_flight.pop()?;
        self.transit_times.record(customer.transit_time());
        debug!(
            eligible = %customer.eligible,
            in_flight = self.in_flight.len(),
            "Customer left transit"
        );
        Some(customer)
    }

    /// When the next customer reaches stage 2, if anyone is in flight
    pub fn next_eligible(&self) -> Option<SimTime> {
        self.in_flight.peek().map(|Reverse(customer)| customer.eligible)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn delivered(&self) -> u64 {
        self.transit_times.count()
    }

    pub fn area(&self) -> f64 {
        self.area.area()
    }

    /// Add `elapsed` minutes at the current in-flight count
    pub fn accumulate(&mut self, elapsed: f64) {
        self.area.accumulate(self.in_flight.len() as f64, elapsed);
    }

    /// Statistics for a replication that lasted `duration` minutes
    pub fn report(&self, duration: f64) -> TransitReport {
        TransitReport {
            mean_in_flight: self.area.time_average(duration),
            max_in_flight: self.max_in_flight,
            mean_transit_time: self.transit_times.mean(),
            delivered: self.delivered(),
        }
    }
}

impl PartialEq for TransitLink {
    fn eq(&self, other: &Self) -> bool {
        let mut mine: Vec<_> = self.in_flight.iter().map(|Reverse(c)| *c).collect();
        let mut theirs: Vec<_> = other.in_flight.iter().map(|Reverse(c)| *c).collect();
        mine.sort();
        theirs.sort();
        self.bound == other.bound
            && mine == theirs
            && self.next_sequence == other.next_sequence
            && self.max_in_flight == other.max_in_flight
            && self.area == other.area
            && self.transit_times == other.transit_times
    }
}
