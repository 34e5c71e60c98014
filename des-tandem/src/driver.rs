//! Replication driver
//!
//! Runs the engine a configured number of times. Every replication starts
//! from a freshly initialized engine; only the variate stream carries over.
//! The driver moves `Idle -> Initializing -> Running -> Reporting -> Idle`
//! for each replication, and any error aborts the remaining ones.

use crate::config::TandemConfig;
use crate::engine::Engine;
use crate::error::TandemError;
use crate::trace::DebugTrace;
use des_core::logging::{diagnostics, events};
use des_core::{replication_span, simulation_span, Execute, Executor, SimTime, VariateSource};
use des_metrics::{ReplicationReport, RunResults};
use std::io::Write;
use tracing::{info, instrument};

/// Where the driver is within the current replication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Initializing,
    Running,
    Reporting,
}

/// Runs independent replications of one configuration
#[derive(Debug)]
pub struct ReplicationDriver<V: VariateSource> {
    config: TandemConfig,
    engine: Engine<V>,
    state: DriverState,
    completed: usize,
}

impl<V: VariateSource> ReplicationDriver<V> {
    /// Validate `config` and build the engine the replications share
    pub fn new(config: TandemConfig, variates: V) -> Result<Self, TandemError> {
        config.validate()?;
        let engine = Engine::new(&config, variates)?;
        Ok(Self {
            config,
            engine,
            state: DriverState::Idle,
            completed: 0,
        })
    }

    pub fn config(&self) -> &TandemConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn engine(&self) -> &Engine<V> {
        &self.engine
    }

    /// Replications finished so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Run every replication and collect the results
    #[instrument(skip(self), fields(replications = self.config.replications))]
    pub fn run(&mut self) -> Result<RunResults, TandemError> {
        self.run_with(|driver, replication| driver.run_replication(replication))
    }

    /// Run every replication, writing each handled event to `trace`
    #[instrument(skip(self, trace), fields(replications = self.config.replications))]
    pub fn run_traced<W: Write>(
        &mut self,
        trace: &mut DebugTrace<W>,
    ) -> Result<RunResults, TandemError> {
        self.run_with(|driver, replication| driver.run_replication_traced(replication, trace))
    }

    fn run_with<F>(&mut self, mut replicate: F) -> Result<RunResults, TandemError>
    where
        F: FnMut(&mut Self, usize) -> Result<ReplicationReport, TandemError>,
    {
        let replications = self.config.replications;
        let _span = simulation_span("tandem").entered();
        events::simulation_started(
            "tandem",
            replications,
            SimTime::from_minutes(self.config.run_length),
        );

        let mut reports = Vec::with_capacity(replications);
        let mut events_processed = 0;
        for replication in 1..=replications {
            let report = replicate(self, replication)?;
            events_processed += report.events_processed;
            reports.push(report);
        }

        events::simulation_completed("tandem", replications, events_processed);
        Ok(RunResults::new(self.config.heading(), reports))
    }

    /// Run one replication
    ///
    /// `replication` is the 1-based number put on the report.
    #[instrument(skip(self))]
    pub fn run_replication(&mut self, replication: usize) -> Result<ReplicationReport, TandemError> {
        self.replicate(replication, |_| {})
    }

    /// Run one replication, writing each handled event to `trace`
    #[instrument(skip(self, trace))]
    pub fn run_replication_traced<W: Write>(
        &mut self,
        replication: usize,
        trace: &mut DebugTrace<W>,
    ) -> Result<ReplicationReport, TandemError> {
        trace
            .begin_replication(replication)
            .map_err(TandemError::Trace)?;

        let mut failure = None;
        let report = self.replicate(replication, |engine| {
            if failure.is_some() {
                return;
            }
            if let Some(snapshot) = engine.snapshot() {
                if let Err(err) = trace.record(&snapshot) {
                    failure = Some(err);
                }
            }
        })?;

        match failure {
            Some(err) => Err(TandemError::Trace(err)),
            None => Ok(report),
        }
    }

    fn replicate<F>(&mut self, replication: usize, observer: F) -> Result<ReplicationReport, TandemError>
    where
        F: FnMut(&Engine<V>),
    {
        let result = self.replicate_inner(replication, observer);
        self.state = DriverState::Idle;
        result
    }

    fn replicate_inner<F>(
        &mut self,
        replication: usize,
        observer: F,
    ) -> Result<ReplicationReport, TandemError>
    where
        F: FnMut(&Engine<V>),
    {
        let _span = replication_span(replication).entered();
        events::replication_started(replication);

        self.state = DriverState::Initializing;
        self.engine.initialize()?;

        self.state = DriverState::Running;
        Executor::unbound()
            .side_effect::<Engine<V>, _>(observer)
            .execute(&mut self.engine)?;

        self.state = DriverState::Reporting;
        let report = self.engine.report(replication);
        if report.customers_delayed == 0 {
            diagnostics::no_customers_served(replication, self.engine.time());
        }
        events::replication_completed(replication, self.engine.time(), report.events_processed);
        info!(
            replication = replication,
            mean_delay = report.overall_mean_delay,
            utilization_stage1 = report.stages[0].utilization,
            utilization_stage2 = report.stages[1].utilization,
            "Replication report ready"
        );

        self.completed += 1;
        Ok(report)
    }
}
