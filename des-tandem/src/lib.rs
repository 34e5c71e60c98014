//! Two-stage tandem queueing network simulation
//!
//! Customers arrive at stage 1, wait for and receive service, optionally
//! travel over a transit link, wait for and receive service at stage 2, and
//! leave. The run is driven entirely by a future-event list and repeated over
//! independent replications that share one random stream.
//!
//! # Basic Usage
//!
//! ```rust
//! use des_core::SeededVariates;
//! use des_tandem::{ReplicationDriver, TandemConfig};
//!
//! let config = TandemConfig::new(1.0, 0.5, 0.5, 100.0).with_replications(2);
//! let mut driver = ReplicationDriver::new(config.clone(), SeededVariates::new(config.seed))?;
//! let results = driver.run()?;
//!
//! assert_eq!(results.reports.len(), 2);
//! println!("{results}");
//! # Ok::<(), des_tandem::TandemError>(())
//! ```
//!
//! # Modules
//!
//! - [`config`]: parameters, file loading and validation
//! - [`event`]: the event vocabulary and per-event snapshots
//! - [`engine`]: network state and event handlers
//! - [`driver`]: the replication loop
//! - [`trace`]: the per-event debug trace

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod event;
pub mod trace;

pub use config::{ParseConfigError, TandemConfig};
pub use driver::{DriverState, ReplicationDriver};
pub use engine::Engine;
pub use error::TandemError;
pub use event::{EventSnapshot, TandemEvent};
pub use trace::DebugTrace;
