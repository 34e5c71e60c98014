//! Building blocks of a tandem queueing network
//!
//! - [`WaitingLine`]: bounded FIFO of arrival times
//! - [`Server`]: busy/idle status and mean service time
//! - [`Stage`]: a server with its line, areas and counters
//! - [`TransitLink`]: customers travelling between the two stages
//!
//! Components only change state. Drawing service and travel times and
//! scheduling events is left to the engine that owns them.

pub mod builder;
pub mod error;
pub mod queue;
pub mod server;
pub mod stage;
pub mod transit;

pub use builder::{
    validate_finite, validate_non_negative, validate_positive, ValidationError, ValidationResult,
};
pub use error::QueueError;
pub use queue::WaitingLine;
pub use server::{Server, ServerStatus};
pub use stage::{Admission, Completion, Stage, StageId};
pub use transit::{InFlight, TransitLink};
