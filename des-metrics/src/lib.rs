//! Statistics for tandem queue simulations
//!
//! - [`accumulator`]: time-weighted areas and discrete tallies updated as
//!   the simulation advances
//! - [`report`]: per-replication reports and the fixed text layout
//! - [`summary`]: mean, standard deviation and confidence interval across
//!   replications
//! - [`export`]: JSON and CSV exporters

pub mod accumulator;
pub mod error;
pub mod export;
pub mod report;
pub mod summary;

pub use accumulator::{ratio, Tally, TimeWeighted};
pub use error::MetricsError;
pub use export::{export_csv, export_json, ResultsExporter};
pub use report::{ReplicationReport, ReportHeading, RunResults, StageReport, TransitReport};
pub use summary::{Estimate, ReplicationSummary, DEFAULT_CONFIDENCE};
