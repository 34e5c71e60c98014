//! Event-scheduling engine for the tandem network
//!
//! The engine owns every piece of simulation state: the scheduler and its
//! clock, both stages, the optional transit link and the variate source.
//! Each [`Engine::step`] selects the next event, integrates the
//! time-weighted statistics over the elapsed interval and dispatches the
//! event to its handler.

use crate::config::TandemConfig;
use crate::error::TandemError;
use crate::event::{EventSnapshot, TandemEvent};
use des_components::{Admission, Completion, QueueError, Stage, StageId, TransitLink};
use des_core::logging::diagnostics;
use des_core::{EventId, EventKind, Scheduler, SimTime, Step, VariateSource};
use des_metrics::{ratio, ReplicationReport};
use tracing::{debug, trace};

/// Network state plus the future-event list
///
/// The engine is created empty; [`Engine::initialize`] prepares a
/// replication and may be called any number of times. Randomness is drawn
/// only from the owned [`VariateSource`], so a seeded source continues its
/// stream from one replication to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine<V: VariateSource> {
    mean_interarrival: f64,
    run_length: f64,
    scheduler: Scheduler<TandemEvent>,
    stages: [Stage; 2],
    transit: Option<TransitLink>,
    variates: V,
    last_event: Option<TandemEvent>,
    finished: bool,
}

impl<V: VariateSource> Engine<V> {
    /// Build an engine for `config`
    ///
    /// Only the per-engine parameters are checked, so a zero run length is
    /// accepted.
    pub fn new(config: &TandemConfig, variates: V) -> Result<Self, TandemError> {
        config.validate_parameters()?;
        Ok(Self {
            mean_interarrival: config.mean_interarrival,
            run_length: config.run_length,
            scheduler: Scheduler::new(),
            stages: [
                Stage::new(StageId::One, config.mean_service_stage1, config.queue_limit),
                Stage::new(StageId::Two, config.mean_service_stage2, config.queue_limit),
            ],
            transit: config.transit_bound.map(TransitLink::new),
            variates,
            last_event: None,
            finished: false,
        })
    }

    /// Reset all state for a new replication
    ///
    /// Clock at zero, servers idle, lines and transit link empty, the first
    /// arrival scheduled one interarrival time away and the end of the run
    /// scheduled at the run length.
    pub fn initialize(&mut self) -> Result<(), TandemError> {
        self.scheduler.reset();
        for stage in &mut self.stages {
            stage.reset();
        }
        if let Some(link) = &mut self.transit {
            link.reset();
        }
        self.last_event = None;
        self.finished = false;

        let first_arrival = self.variates.exponential(self.mean_interarrival);
        self.scheduler
            .schedule_in(TandemEvent::ArriveStage1, first_arrival)?;
        self.scheduler.schedule_at(
            TandemEvent::EndSimulation,
            SimTime::from_minutes(self.run_length),
        )?;
        debug!(
            scheduled = ?self.scheduler.pending().collect::<Vec<_>>(),
            "Engine initialized"
        );
        Ok(())
    }

    /// Handle the next event
    ///
    /// Returns `Ok(false)` once the end-of-run event has been handled; later
    /// calls do nothing.
    pub fn step(&mut self) -> Result<bool, TandemError> {
        if self.finished {
            return Ok(false);
        }

        let event = match self.scheduler.select_next() {
            Ok(event) => event,
            Err(err) => {
                diagnostics::event_list_exhausted(self.time());
                return Err(err.into());
            }
        };
        self.last_event = Some(event);

        let elapsed = self.scheduler.clock_mut().mark_event();
        self.accumulate(elapsed);

        let _span = des_core::event_span(self.event_id(), event.name(), self.time()).entered();
        match event {
            TandemEvent::ArriveStage1 => self.arrive_stage1()?,
            TandemEvent::CompleteStage1 => self.complete(StageId::One)?,
            TandemEvent::ArriveStage2 => self.arrive_from_transit()?,
            TandemEvent::CompleteStage2 => self.complete(StageId::Two)?,
            TandemEvent::EndSimulation => self.finished = true,
        }

        trace!(
            event = %event,
            time = %self.time(),
            q1 = self.stages[0].queue_length(),
            q2 = self.stages[1].queue_length(),
            srv1 = %self.stages[0].status(),
            srv2 = %self.stages[1].status(),
            in_flight = ?self.transit.as_ref().map(TransitLink::in_flight_count),
            "Event handled"
        );
        Ok(!self.finished)
    }

    fn accumulate(&mut self, elapsed: f64) {
        for stage in &mut self.stages {
            stage.accumulate(elapsed);
        }
        if let Some(link) = &mut self.transit {
            link.accumulate(elapsed);
        }
    }

    fn arrive_stage1(&mut self) -> Result<(), TandemError> {
        let next_arrival = self.variates.exponential(self.mean_interarrival);
        self.scheduler
            .schedule_in(TandemEvent::ArriveStage1, next_arrival)?;
        self.admit(StageId::One)
    }

    /// Arrival at a stage, whichever way the customer got there
    fn admit(&mut self, id: StageId) -> Result<(), TandemError> {
        let now = self.time();
        let stage = &mut self.stages[id.index()];
        match stage.arrive(now) {
            Ok(Admission::Served) => self.schedule_completion(id),
            Ok(Admission::Queued { .. }) => Ok(()),
            Err(QueueError::Overflow { limit, time }) => {
                diagnostics::queue_overflow(&id.to_string(), limit, time);
                Err(TandemError::QueueOverflow {
                    stage: id,
                    time,
                    limit,
                })
            }
        }
    }

    fn complete(&mut self, id: StageId) -> Result<(), TandemError> {
        let now = self.time();
        match self.stages[id.index()].complete(now) {
            Completion::Idle => self.scheduler.cancel(TandemEvent::completion_of(id)),
            Completion::NextCustomer { .. } => self.schedule_completion(id)?,
        }
        if id == StageId::One {
            self.hand_off()?;
        }
        Ok(())
    }

    fn schedule_completion(&mut self, id: StageId) -> Result<(), TandemError> {
        let mean = self.stages[id.index()].mean_service_time();
        let service = self.variates.exponential(mean);
        self.scheduler
            .schedule_in(TandemEvent::completion_of(id), service)?;
        Ok(())
    }

    /// Send the customer who just finished stage 1 towards stage 2
    fn hand_off(&mut self) -> Result<(), TandemError> {
        let now = self.time();
        match self.transit.as_mut() {
            Some(link) => {
                let travel = self.variates.uniform(link.bound());
                let wake_up = link.depart(now, travel);
                self.scheduler
                    .schedule_at(TandemEvent::ArriveStage2, wake_up)?;
                Ok(())
            }
            None => self.admit(StageId::Two),
        }
    }

    fn arrive_from_transit(&mut self) -> Result<(), TandemError> {
        if let Some(link) = &mut self.transit {
            link.deliver();
            match link.next_eligible() {
                Some(wake_up) => self
                    .scheduler
                    .schedule_at(TandemEvent::ArriveStage2, wake_up)?,
                None => self.scheduler.cancel(TandemEvent::ArriveStage2),
            }
        }
        self.admit(StageId::Two)
    }

    /// Statistics at the current time, labelled with the replication number
    pub fn report(&self, replication: usize) -> ReplicationReport {
        let duration = self.time().as_minutes();
        let total_delay: f64 = self.stages.iter().map(Stage::total_delay).sum();
        ReplicationReport {
            replication,
            overall_mean_delay: ratio(total_delay, self.customers_delayed() as f64),
            customers_delayed: self.customers_delayed(),
            stages: [
                self.stages[0].report(duration),
                self.stages[1].report(duration),
            ],
            transit: self.transit.as_ref().map(|link| link.report(duration)),
            end_time: duration,
            events_processed: self.events_processed(),
        }
    }

    /// State of the network after the most recent event, `None` before the
    /// first one
    pub fn snapshot(&self) -> Option<EventSnapshot> {
        let event = self.last_event?;
        Some(EventSnapshot {
            id: self.event_id(),
            event,
            time: self.time(),
            queue_lengths: [self.stages[0].queue_length(), self.stages[1].queue_length()],
            server_status: [self.stages[0].status(), self.stages[1].status()],
            in_flight: self.transit.as_ref().map(TransitLink::in_flight_count),
        })
    }

    pub fn time(&self) -> SimTime {
        self.scheduler.time()
    }

    pub fn scheduler(&self) -> &Scheduler<TandemEvent> {
        &self.scheduler
    }

    pub fn stage(&self, id: StageId) -> &Stage {
        &self.stages[id.index()]
    }

    pub fn transit(&self) -> Option<&TransitLink> {
        self.transit.as_ref()
    }

    /// Most recently handled event, `None` right after initialization
    pub fn last_event(&self) -> Option<TandemEvent> {
        self.last_event
    }

    /// Customers whose service started, over both stages
    pub fn customers_delayed(&self) -> u64 {
        self.stages.iter().map(Stage::service_starts).sum()
    }

    pub fn events_processed(&self) -> u64 {
        self.scheduler.events_selected()
    }

    fn event_id(&self) -> EventId {
        EventId(self.scheduler.events_selected())
    }
}

impl<V: VariateSource> Step for Engine<V> {
    type Error = TandemError;

    fn step(&mut self) -> Result<bool, TandemError> {
        Engine::step(self)
    }
}
