//! Structured logging for discrete event simulation debugging
//!
//! This module wires the simulation crates into `tracing`, making it easy to
//! follow event processing, replication boundaries and fatal conditions.
//!
//! # How to Control Terminal Logging Output
//!
//! ## 1. Use `init_simulation_logging_with_level()` for specific levels
//! ```rust
//! use des_core::init_simulation_logging_with_level;
//! init_simulation_logging_with_level("debug");  // DEBUG and above
//! ```
//!
//! ## 2. Use Environment Variables (Most flexible)
//! ```bash
//! # Default (info level)
//! cargo run --bin tandem-sim -- --config tandem.in
//!
//! # Per-event trace of the engine
//! RUST_LOG=des_tandem=trace cargo run --bin tandem-sim -- --config tandem.in
//!
//! # Module-specific logging
//! RUST_LOG=des_core::scheduler=trace cargo run --bin tandem-sim -- --config tandem.in
//! ```
//!
//! ## 3. Log Level Guidelines:
//! - **TRACE**: Every selected event and scheduling decision (very verbose)
//! - **DEBUG**: Stage state changes, transit hand-offs
//! - **INFO**: Replication start/end and run summaries
//! - **WARN**: Degenerate inputs (e.g. runs that served no customers)
//! - **ERROR**: Fatal conditions such as queue overflow

use crate::{EventId, SimTime};
use tracing::{error, info, warn, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with a specific level
///
/// `RUST_LOG` takes precedence when set. Calling this more than once is
/// harmless: only the first subscriber is installed.
///
/// # Arguments
/// * `level` - Log level: "trace", "debug", "info", "warn", or "error"
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{level},des_core={level},des_components={level},des_metrics={level},des_tandem={level}"
        )
        .into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
}

/// Create a span for tracking a whole simulation run
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Create a span for tracking one replication
pub fn replication_span(replication: usize) -> Span {
    tracing::info_span!("replication", index = replication)
}

/// Create a span for tracking event processing
pub fn event_span(event_id: EventId, event_type: &str, time: SimTime) -> Span {
    tracing::trace_span!("event",
        id = %event_id,
        event_type = event_type,
        time = %time
    )
}

/// Logging utilities for common simulation events
pub mod events {
    use super::*;

    /// Log simulation start
    pub fn simulation_started(name: &str, replications: usize, end_time: SimTime) {
        info!(
            simulation = name,
            replications = replications,
            end_time = %end_time,
            "Simulation started"
        );
    }

    /// Log simulation completion
    pub fn simulation_completed(name: &str, replications: usize, events_processed: u64) {
        info!(
            simulation = name,
            replications = replications,
            events_processed = events_processed,
            "Simulation completed"
        );
    }

    /// Log replication start
    pub fn replication_started(replication: usize) {
        info!(replication = replication, "Replication started");
    }

    /// Log replication completion
    pub fn replication_completed(replication: usize, final_time: SimTime, events_processed: u64) {
        info!(
            replication = replication,
            final_time = %final_time,
            events_processed = events_processed,
            "Replication completed"
        );
    }

}

/// Logging utilities for error conditions and warnings
pub mod diagnostics {
    use super::*;

    /// Log a waiting line that grew past its limit
    pub fn queue_overflow(component: &str, limit: usize, time: SimTime) {
        error!(
            component = component,
            limit = limit,
            time = %time,
            "Waiting line overflow"
        );
    }

    /// Log an empty future-event list
    pub fn event_list_exhausted(time: SimTime) {
        error!(time = %time, "Event list exhausted");
    }

    /// Log a run in which no customer ever started service
    pub fn no_customers_served(replication: usize, final_time: SimTime) {
        warn!(
            replication = replication,
            final_time = %final_time,
            "No customers started service during replication"
        );
    }
}
