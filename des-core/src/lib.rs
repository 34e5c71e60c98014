//! Core discrete event simulation engine.
//!
//! This crate provides the fundamental building blocks for event-scheduling
//! simulations: time management, a fixed-slot future-event list, random
//! variate sources, step-wise execution and structured logging.
//!
//! # Architecture Overview
//!
//! - [`Scheduler`]: owns the simulation [`Clock`] and one slot per
//!   [`EventKind`]. It picks the earliest scheduled kind and advances the
//!   clock; it never touches model state.
//!
//! - [`VariateSource`]: the only way a model draws randomness.
//!   [`SeededVariates`] is reproducible from a seed, [`ConstantVariates`] and
//!   [`ScriptedVariates`] make runs fully predictable in tests.
//!
//! - [`Executor`]: drives any [`Step`] model until it finishes, optionally
//!   observing the model after every step.
//!
//! # Time Model
//!
//! All timing uses [`SimTime`], measured in simulated minutes (not wall-clock
//! time). This ensures deterministic, reproducible behavior across runs.

pub mod dists;
pub mod error;
pub mod execute;
pub mod logging;
pub mod scheduler;
pub mod time;
pub mod types;

pub use dists::{ConstantVariates, ScriptedVariates, SeededVariates, VariateSource};
pub use error::EventError;
pub use execute::{Execute, Executor, ExecutorWithSideEffect, Step};
pub use logging::{
    event_span, init_simulation_logging_with_level, replication_span, simulation_span,
};
pub use scheduler::{Clock, EventKind, Scheduler};
pub use time::SimTime;
pub use types::EventId;
