//! Export functionality for run results
//!
//! This module provides exporters for machine-readable formats to enable
//! analysis with external tools.

pub mod csv;
pub mod json;

use crate::error::MetricsError;
use crate::report::RunResults;
use std::path::Path;

/// Trait for exporting run results to different formats
pub trait ResultsExporter {
    /// Export results to the configured destination
    fn export(&self, results: &RunResults) -> Result<(), MetricsError>;
}

/// Export results to JSON format
///
/// # Example
/// ```no_run
/// use des_metrics::export::export_json;
/// use des_metrics::{ReportHeading, RunResults};
///
/// let heading = ReportHeading {
///     mean_interarrival: 1.0,
///     mean_service: [0.5, 0.5],
///     run_length: 1000.0,
///     transit_bound: None,
/// };
/// let results = RunResults::new(heading, Vec::new());
/// export_json(&results, "results/tandem.json", true).unwrap();
/// ```
pub fn export_json(
    results: &RunResults,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), MetricsError> {
    let exporter = json::JsonExporter::new(path.as_ref(), pretty);
    exporter.export(results)
}

/// Export results to CSV format, one row per replication
pub fn export_csv(results: &RunResults, path: impl AsRef<Path>) -> Result<(), MetricsError> {
    let exporter = csv::CsvExporter::new(path.as_ref());
    exporter.export(results)
}
