//! Error types for the simulation framework

use crate::SimTime;
use thiserror::Error;

/// Errors related to event scheduling and selection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventError {
    /// Every slot in the future-event list is unscheduled.
    #[error("Event list exhausted at time {time}")]
    EventListExhausted { time: SimTime },

    #[error("Cannot schedule {event} at {time}: clock is already at {now}")]
    ScheduleInPast {
        event: &'static str,
        time: SimTime,
        now: SimTime,
    },
}
