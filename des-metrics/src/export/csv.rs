//! CSV export for run results
//!
//! One header row naming the metrics, then one row per replication, suitable
//! for spreadsheet analysis and pandas.

use crate::error::MetricsError;
use crate::export::ResultsExporter;
use crate::report::RunResults;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV exporter for per-replication metrics
#[derive(Debug)]
pub struct CsvExporter {
    path: PathBuf,
}

impl CsvExporter {
    /// Create a new CSV exporter writing to `path`
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ResultsExporter for CsvExporter {
    fn export(&self, results: &RunResults) -> Result<(), MetricsError> {
        let mut file = File::create(&self.path)?;

        let Some(first) = results.reports.first() else {
            return Ok(());
        };

        let mut header = vec!["replication".to_string()];
        header.extend(first.metrics().iter().map(|(name, _)| escape_csv(name)));
        header.push("customers_delayed".to_string());
        header.push("events_processed".to_string());
        writeln!(file, "{}", header.join(","))?;

        for report in &results.reports {
            let mut row = vec![report.replication.to_string()];
            row.extend(report.metrics().iter().map(|(_, value)| value.to_string()));
            row.push(report.customers_delayed.to_string());
            row.push(report.events_processed.to_string());
            writeln!(file, "{}", row.join(","))?;
        }

        debug!(path = %self.path.display(), rows = results.reports.len(), "Exported CSV results");
        Ok(())
    }
}

/// Escape a CSV field (add quotes if needed)
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReplicationReport, ReportHeading, StageReport, TransitReport};
    use tempfile::TempDir;

    fn heading() -> ReportHeading {
        ReportHeading {
            mean_interarrival: 1.0,
            mean_service: [0.5, 0.5],
            run_length: 10.0,
            transit_bound: Some(2.0),
        }
    }

    #[test]
    fn test_csv_export_one_row_per_replication() {
        let report = |replication: usize| ReplicationReport {
            replication,
            overall_mean_delay: 0.5,
            customers_delayed: 20,
            stages: [StageReport::default(), StageReport::default()],
            transit: Some(TransitReport::default()),
            end_time: 10.0,
            events_processed: 41,
        };
        let results = RunResults::new(heading(), vec![report(1), report(2), report(3)]);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("results.csv");
        CsvExporter::new(&path).export(&results).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("replication,overall_mean_delay,"));
        assert!(lines[0].contains("mean_in_transit"));
        assert!(lines[0].ends_with("customers_delayed,events_processed"));
        assert!(lines[3].starts_with("3,0.5,"));
        assert!(lines[3].ends_with(",20,41"));
        assert_eq!(
            lines[0].split(',').count(),
            lines[1].split(',').count()
        );
    }

    #[test]
    fn test_csv_export_without_reports_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");
        CsvExporter::new(&path)
            .export(&RunResults::new(heading(), Vec::new()))
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_csv_export_to_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("results.csv");
        let err = CsvExporter::new(&path)
            .export(&RunResults::new(heading(), Vec::new()))
            .unwrap_err();
        assert!(matches!(err, MetricsError::IoError(_)));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
