//! Service stage: one server, its waiting line and its statistics
//!
//! A stage only changes state; it never draws variates or touches the event
//! list. Its caller reacts to the returned [`Admission`] or [`Completion`] by
//! scheduling the next service completion.

use crate::error::QueueError;
use crate::queue::WaitingLine;
use crate::server::{Server, ServerStatus};
use des_core::SimTime;
use des_metrics::{StageReport, Tally, TimeWeighted};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Position of a stage in the tandem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageId {
    One,
    Two,
}

impl StageId {
    /// Zero-based position
    pub fn index(self) -> usize {
        match self {
            StageId::One => 0,
            StageId::Two => 1,
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stage {}", self.index() + 1)
    }
}

/// What happened to an arriving customer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Admission {
    /// The server was idle and service started immediately.
    Served,
    /// The server was busy; the customer joined the line.
    Queued { queue_length: usize },
}

/// What the server does after finishing a customer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// The line was empty and the server went idle.
    Idle,
    /// The head of the line entered service after waiting `delay` minutes.
    NextCustomer { delay: f64 },
}

/// One server with its waiting line, time-weighted areas and counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    id: StageId,
    server: Server,
    line: WaitingLine,
    queue_area: TimeWeighted,
    busy_area: TimeWeighted,
    delays: Tally,
    arrivals: u64,
    completions: u64,
}

impl Stage {
    /// Create an empty stage with an idle server
    pub fn new(id: StageId, mean_service_time: f64, queue_limit: usize) -> Self {
        Self {
            id,
            server: Server::new(mean_service_time),
            line: WaitingLine::new(queue_limit),
            queue_area: TimeWeighted::new(),
            busy_area: TimeWeighted::new(),
            delays: Tally::new(),
            arrivals: 0,
            completions: 0,
        }
    }

    /// Return to the empty, idle state, keeping the parameters
    pub fn reset(&mut self) {
        *self = Self::new(self.id, self.server.mean_service_time(), self.line.limit());
    }

    /// Handle a customer arriving at `now`
    ///
    /// An idle server starts service at once with zero delay. A busy server
    /// sends the customer to the line, which fails with
    /// [`QueueError::Overflow`] when the line is already full.
    pub fn arrive(&mut self, now: SimTime) -> Result<Admission, QueueError> {
        let admission = if self.server.is_busy() {
            let queue_length = self.line.push(now)?;
            Admission::Queued { queue_length }
        } else {
            self.delays.record(0.0);
            self.server.start_service();
            Admission::Served
        };
        self.arrivals += 1;
        debug!(stage = %self.id, time = %now, ?admission, "Customer arrived");
        Ok(admission)
    }

    /// Handle the end of a service at `now`
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the server was idle.
    pub fn complete(&mut self, now: SimTime) -> Completion {
        debug_assert!(self.server.is_busy(), "{} completed while idle", self.id);
        self.completions += 1;
        let completion = match self.line.pop() {
            None => {
                self.server.release();
                Completion::Idle
            }
            Some(arrived_at) => {
                let delay = now - arrived_at;
                self.delays.record(delay);
                Completion::NextCustomer { delay }
            }
        };
        debug!(stage = %self.id, time = %now, ?completion, "Service completed");
        completion
    }

    /// Add `elapsed` minutes at the current line length and server status
    pub fn accumulate(&mut self, elapsed: f64) {
        self.queue_area.accumulate(self.line.len() as f64, elapsed);
        self.busy_area
            .accumulate(f64::from(self.server.status().as_indicator()), elapsed);
    }

    /// Statistics for a replication that lasted `duration` minutes
    pub fn report(&self, duration: f64) -> StageReport {
        StageReport {
            mean_delay: self.delays.mean(),
            mean_queue_length: self.queue_area.time_average(duration),
            utilization: self.busy_area.time_average(duration),
            total_delay: self.delays.sum(),
            arrivals: self.arrivals,
            customers_delayed: self.delays.count(),
            completions: self.completions,
        }
    }

    pub fn id(&self) -> StageId {
        self.id
    }

    pub fn status(&self) -> ServerStatus {
        self.server.status()
    }

    pub fn mean_service_time(&self) -> f64 {
        self.server.mean_service_time()
    }

    pub fn queue_length(&self) -> usize {
        self.line.len()
    }

    pub fn queue_limit(&self) -> usize {
        self.line.limit()
    }

    /// Customers accepted by the stage, served at once or queued
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    /// Customers whose service has started
    pub fn service_starts(&self) -> u64 {
        self.delays.count()
    }

    pub fn completions(&self) -> u64 {
        self.completions
    }

    /// Sum of the waits of every customer whose service has started
    pub fn total_delay(&self) -> f64 {
        self.delays.sum()
    }

    pub fn queue_area(&self) -> f64 {
        self.queue_area.area()
    }

    pub fn busy_area(&self) -> f64 {
        self.busy_area.area()
    }
}
