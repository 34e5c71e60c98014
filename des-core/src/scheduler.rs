use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::error::EventError;
use crate::types::EventId;
use crate::SimTime;

/// A closed vocabulary of event kinds, each owning one slot in the
/// future-event list.
///
/// `ALL` lists every kind in enumeration order and `index` must return the
/// position of `self` within `ALL`. The scheduler scans slots in that order,
/// so when two kinds are due at exactly the same instant the one listed first
/// is selected.
pub trait EventKind: Copy + Eq + fmt::Debug + 'static {
    /// Every kind, in enumeration (tie-break) order.
    const ALL: &'static [Self];

    /// Position of this kind within [`EventKind::ALL`].
    fn index(self) -> usize;

    /// Short human readable name used in logs and diagnostics.
    fn name(self) -> &'static str;
}

/// Simulation clock: the current time plus the time of the previous event,
/// which the statistics accumulators integrate over.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clock {
    current: SimTime,
    last_event: SimTime,
}

impl Clock {
    /// Return the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.current
    }

    /// Returns the minutes elapsed since the last marked event and moves the
    /// marker up to the current time.
    pub fn mark_event(&mut self) -> f64 {
        let elapsed = self.current - self.last_event;
        self.last_event = self.current;
        elapsed
    }

    fn advance_to(&mut self, time: SimTime) {
        debug_assert!(time >= self.current, "clock moved backwards");
        self.current = time;
    }
}

/// Scheduler keeps the current time and the future-event list: one scheduled
/// time per event kind, `None` when that kind is not currently scheduled.
///
/// The scheduler only answers "which kind happens next and when"; it never
/// touches queue or server state.
///
/// # Example
///
/// ```
/// # use des_core::{EventKind, Scheduler, SimTime};
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Kind { Tick, Stop }
///
/// impl EventKind for Kind {
///     const ALL: &'static [Self] = &[Kind::Tick, Kind::Stop];
///     fn index(self) -> usize { self as usize }
///     fn name(self) -> &'static str { "kind" }
/// }
///
/// let mut scheduler = Scheduler::<Kind>::new();
/// scheduler.schedule_in(Kind::Tick, 2.0).unwrap();
/// scheduler.schedule_at(Kind::Stop, SimTime::from_minutes(1.0)).unwrap();
/// assert_eq!(scheduler.select_next().unwrap(), Kind::Stop);
/// assert_eq!(scheduler.time(), SimTime::from_minutes(1.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Scheduler<K: EventKind> {
    slots: Vec<Option<SimTime>>,
    clock: Clock,
    next_event_id: u64,
    _kind: PhantomData<K>,
}

impl<K: EventKind> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            slots: vec![None; K::ALL.len()],
            clock: Clock::default(),
            next_event_id: 0,
            _kind: PhantomData,
        }
    }
}

impl<K: EventKind> Scheduler<K> {
    /// Creates a scheduler with the clock at zero and every slot unscheduled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scheduler to its freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the current simulation time.
    #[must_use]
    pub fn time(&self) -> SimTime {
        self.clock.time()
    }

    /// Read access to the clock.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Mutable access to the clock, used to mark accumulated intervals.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Number of events selected so far.
    #[must_use]
    pub fn events_selected(&self) -> u64 {
        self.next_event_id
    }

    /// Schedules `kind` at absolute time `time`, replacing any previous entry.
    pub fn schedule_at(&mut self, kind: K, time: SimTime) -> Result<(), EventError> {
        let now = self.time();
        if time < now {
            return Err(EventError::ScheduleInPast {
                event: kind.name(),
                time,
                now,
            });
        }
        trace!(event = kind.name(), time = %time, "Event scheduled");
        self.slots[kind.index()] = Some(time);
        Ok(())
    }

    /// Schedules `kind` at `self.time() + delay` minutes.
    pub fn schedule_in(&mut self, kind: K, delay: f64) -> Result<(), EventError> {
        let time = self.time() + delay;
        self.schedule_at(kind, time)
    }

    /// Removes `kind` from consideration until it is scheduled again.
    pub fn cancel(&mut self, kind: K) {
        self.slots[kind.index()] = None;
    }

    /// Returns the next event without removing or advancing anything.
    ///
    /// Ties resolve to the kind listed first in [`EventKind::ALL`].
    #[must_use]
    pub fn peek(&self) -> Option<(K, SimTime)> {
        let mut next: Option<(K, SimTime)> = None;
        for &kind in K::ALL {
            if let Some(time) = self.slots[kind.index()] {
                if next.map_or(true, |(_, best)| time < best) {
                    next = Some((kind, time));
                }
            }
        }
        next
    }

    /// Iterates over every scheduled kind and its time, in enumeration order.
    pub fn pending(&self) -> impl Iterator<Item = (K, SimTime)> + '_ {
        K::ALL
            .iter()
            .filter_map(move |&kind| self.slots[kind.index()].map(|time| (kind, time)))
    }

    /// Selects the next event and advances the clock to its time.
    ///
    /// The selected kind stays scheduled: its handler is responsible for
    /// rescheduling or cancelling it.
    pub fn select_next(&mut self) -> Result<K, EventError> {
        let (kind, time) = self.peek().ok_or(EventError::EventListExhausted {
            time: self.time(),
        })?;
        self.clock.advance_to(time);
        self.next_event_id += 1;
        trace!(
            event_id = %EventId(self.next_event_id),
            event = kind.name(),
            time = %time,
            "Selected next event"
        );
        Ok(kind)
    }
}
