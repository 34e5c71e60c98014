//! JSON export for run results
//!
//! Writes the heading, every replication report and the cross-replication
//! summary as one document.

use crate::error::MetricsError;
use crate::export::ResultsExporter;
use crate::report::RunResults;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON exporter for run results
#[derive(Debug)]
pub struct JsonExporter {
    path: PathBuf,
    pretty: bool,
}

impl JsonExporter {
    /// Create a new JSON exporter
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `pretty` - Whether to pretty-print the JSON (adds whitespace for readability)
    pub fn new(path: &Path, pretty: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            pretty,
        }
    }
}

impl ResultsExporter for JsonExporter {
    fn export(&self, results: &RunResults) -> Result<(), MetricsError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(results)
        } else {
            serde_json::to_string(results)
        }?;

        let mut file = File::create(&self.path)?;
        file.write_all(json.as_bytes())?;

        debug!(path = %self.path.display(), reports = results.reports.len(), "Exported JSON results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReplicationReport, ReportHeading, StageReport};
    use tempfile::TempDir;

    #[test]
    fn test_json_export_round_trips() {
        let heading = ReportHeading {
            mean_interarrival: 1.0,
            mean_service: [0.5, 0.5],
            run_length: 10.0,
            transit_bound: Some(2.0),
        };
        let report = ReplicationReport {
            replication: 1,
            overall_mean_delay: 0.2,
            customers_delayed: 18,
            stages: [StageReport::default(), StageReport::default()],
            transit: None,
            end_time: 10.0,
            events_processed: 30,
        };
        let results = RunResults::new(heading, vec![report]);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("results.json");
        JsonExporter::new(&path, false).export(&results).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: RunResults = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, results);
    }

    #[test]
    fn test_json_export_to_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("results.json");
        let heading = ReportHeading {
            mean_interarrival: 1.0,
            mean_service: [0.5, 0.5],
            run_length: 10.0,
            transit_bound: None,
        };
        let err = JsonExporter::new(&path, true)
            .export(&RunResults::new(heading, Vec::new()))
            .unwrap_err();
        assert!(matches!(err, MetricsError::IoError(_)));
    }
}
