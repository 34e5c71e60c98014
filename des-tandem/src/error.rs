//! Error types for the tandem simulation

use crate::config::ParseConfigError;
use des_components::{StageId, ValidationError};
use des_core::{EventError, SimTime};
use des_metrics::MetricsError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure that can stop a simulation run
///
/// All of them are fatal: the run stops and the remaining replications are
/// not attempted.
#[derive(Debug, Error)]
pub enum TandemError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ValidationError),

    #[error("Overflow of the {stage} waiting line at time {time} (limit: {limit})")]
    QueueOverflow {
        stage: StageId,
        time: SimTime,
        limit: usize,
    },

    #[error(transparent)]
    Event(#[from] EventError),

    #[error("Failed to read configuration {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: ParseConfigError,
    },

    #[error("Failed to parse JSON configuration {}: {source}", path.display())]
    ConfigJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Output { path: PathBuf, source: io::Error },

    #[error("Failed to write debug trace: {0}")]
    Trace(#[source] io::Error),

    #[error(transparent)]
    Metrics(#[from] MetricsError),
}
