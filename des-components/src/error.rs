//! Error types for simulation components

use des_core::SimTime;
use thiserror::Error;

/// Errors related to waiting line operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueueError {
    /// An arrival found the line already holding `limit` customers.
    #[error("Waiting line overflow at time {time} (limit: {limit})")]
    Overflow { limit: usize, time: SimTime },
}
