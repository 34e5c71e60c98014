//! Per-replication reports and their text rendering
//!
//! The text layout is fixed: overall delay, then each stage's delay and queue
//! length, then the transit link (when modelled), utilizations and the end
//! time. Downstream tooling relies on that order.

use crate::summary::{ReplicationSummary, DEFAULT_CONFIDENCE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input parameters printed once above the replication blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportHeading {
    pub mean_interarrival: f64,
    pub mean_service: [f64; 2],
    pub run_length: f64,
    pub transit_bound: Option<f64>,
}

impl fmt::Display for ReportHeading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tandem-server queueing system")?;
        writeln!(f)?;
        writeln!(f, "Mean interarrival time{:11.3} minutes", self.mean_interarrival)?;
        writeln!(f)?;
        writeln!(f, "SRVR1 mean service time{:16.3} minutes", self.mean_service[0])?;
        writeln!(f)?;
        writeln!(f, "SRVR2 mean service time{:16.3} minutes", self.mean_service[1])?;
        writeln!(f)?;
        if let Some(bound) = self.transit_bound {
            writeln!(f, "Maximum transit time{:19.3} minutes", bound)?;
            writeln!(f)?;
        }
        writeln!(f, "Length of the simulation{:16.3} minutes", self.run_length)
    }
}

/// Statistics for one stage at the end of a replication
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// Mean wait in the line before service started.
    pub mean_delay: f64,
    /// Time-average number of customers waiting.
    pub mean_queue_length: f64,
    /// Fraction of time the server was busy.
    pub utilization: f64,
    pub total_delay: f64,
    pub arrivals: u64,
    pub customers_delayed: u64,
    pub completions: u64,
}

/// Statistics for the link between the stages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub mean_in_flight: f64,
    pub max_in_flight: usize,
    /// Mean travel time of the customers that reached stage 2.
    pub mean_transit_time: f64,
    pub delivered: u64,
}

/// Everything produced by the terminal event of one replication
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicationReport {
    /// 1-based replication number.
    pub replication: usize,
    pub overall_mean_delay: f64,
    pub customers_delayed: u64,
    pub stages: [StageReport; 2],
    pub transit: Option<TransitReport>,
    pub end_time: f64,
    pub events_processed: u64,
}

impl ReplicationReport {
    /// Named scalar metrics in report order.
    ///
    /// Transit metrics are only listed when the link was modelled.
    pub fn metrics(&self) -> Vec<(&'static str, f64)> {
        let [one, two] = &self.stages;
        let mut metrics = vec![
            ("overall_mean_delay", self.overall_mean_delay),
            ("stage1_mean_delay", one.mean_delay),
            ("stage1_mean_queue_length", one.mean_queue_length),
            ("stage2_mean_delay", two.mean_delay),
            ("stage2_mean_queue_length", two.mean_queue_length),
        ];
        if let Some(transit) = &self.transit {
            metrics.push(("mean_in_transit", transit.mean_in_flight));
            metrics.push(("max_in_transit", transit.max_in_flight as f64));
            metrics.push(("mean_transit_time", transit.mean_transit_time));
        }
        metrics.push(("stage1_utilization", one.utilization));
        metrics.push(("stage2_utilization", two.utilization));
        metrics.push(("end_time", self.end_time));
        metrics
    }
}

impl fmt::Display for ReplicationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, two] = &self.stages;
        writeln!(f, "Replication {}", self.replication)?;
        writeln!(f)?;
        writeln!(f, "Average delay in system:  {:10.3} minutes", self.overall_mean_delay)?;
        writeln!(f)?;
        writeln!(f, "Average delays in queue 1:{:10.3} minutes", one.mean_delay)?;
        writeln!(f, "Average number in queue 1:{:10.3} customers", one.mean_queue_length)?;
        writeln!(f)?;
        writeln!(f, "Average delays in queue 2:{:10.3} minutes", two.mean_delay)?;
        writeln!(f, "Average number in queue 2:{:10.3} customers", two.mean_queue_length)?;
        writeln!(f)?;
        if let Some(transit) = &self.transit {
            writeln!(f, "Average number in transit:{:10.3} customers", transit.mean_in_flight)?;
            writeln!(f, "Maximum number in transit:{:10} customers", transit.max_in_flight)?;
            writeln!(f, "Average time in transit:  {:10.3} minutes", transit.mean_transit_time)?;
            writeln!(f)?;
        }
        writeln!(f, "SERVER ONE utilization:   {:7.3}", one.utilization)?;
        writeln!(f, "SERVER TWO utilization:   {:7.3}", two.utilization)?;
        writeln!(f)?;
        writeln!(f, "Simulation end time:      {:10.3} minutes", self.end_time)
    }
}

/// Heading, per-replication reports and their summary for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    pub heading: ReportHeading,
    pub reports: Vec<ReplicationReport>,
    pub summary: ReplicationSummary,
}

impl RunResults {
    pub fn new(heading: ReportHeading, reports: Vec<ReplicationReport>) -> Self {
        let summary = ReplicationSummary::from_reports(&reports, DEFAULT_CONFIDENCE);
        Self {
            heading,
            reports,
            summary,
        }
    }
}

impl fmt::Display for RunResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for report in &self.reports {
            writeln!(f)?;
            writeln!(f, "{report}")?;
        }
        if self.reports.len() > 1 {
            writeln!(f)?;
            write!(f, "{}", self.summary)?;
        }
        Ok(())
    }
}
