//! Event vocabulary of the tandem network and per-event snapshots

use des_components::{ServerStatus, StageId};
use des_core::{EventId, EventKind, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of event, in tie-break order
///
/// `ArriveStage2` is only scheduled when a transit link exists; without one
/// a stage-1 completion feeds stage 2 in the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TandemEvent {
    ArriveStage1,
    CompleteStage1,
    ArriveStage2,
    CompleteStage2,
    EndSimulation,
}

impl TandemEvent {
    /// Service completion event of a stage
    pub fn completion_of(stage: StageId) -> Self {
        match stage {
            StageId::One => TandemEvent::CompleteStage1,
            StageId::Two => TandemEvent::CompleteStage2,
        }
    }
}

impl EventKind for TandemEvent {
    const ALL: &'static [Self] = &[
        TandemEvent::ArriveStage1,
        TandemEvent::CompleteStage1,
        TandemEvent::ArriveStage2,
        TandemEvent::CompleteStage2,
        TandemEvent::EndSimulation,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            TandemEvent::ArriveStage1 => "ArriveStage1",
            TandemEvent::CompleteStage1 => "CompleteStage1",
            TandemEvent::ArriveStage2 => "ArriveStage2",
            TandemEvent::CompleteStage2 => "CompleteStage2",
            TandemEvent::EndSimulation => "EndSimulation",
        }
    }
}

impl fmt::Display for TandemEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// State of the network right after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub id: EventId,
    pub event: TandemEvent,
    pub time: SimTime,
    pub queue_lengths: [usize; 2],
    pub server_status: [ServerStatus; 2],
    /// Customers on the transit link, when one is modelled.
    pub in_flight: Option<usize>,
}

impl fmt::Display for EventSnapshot {
    /// The block written to the debug trace, led by the event name
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "CALL:{}    TIME:{:.6}",
            self.event.name(),
            self.time.as_minutes()
        )?;
        writeln!(
            f,
            "#Q1 :{}    #Q2 :{}",
            self.queue_lengths[0], self.queue_lengths[1]
        )?;
        write!(
            f,
            "SRV1:{}    SRV2:{}",
            self.server_status[0].as_indicator(),
            self.server_status[1].as_indicator()
        )?;
        if let Some(in_flight) = self.in_flight {
            write!(f, "\n#TR :{in_flight}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_order_and_names() {
        let indices: Vec<usize> = TandemEvent::ALL.iter().map(|e| e.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(
            TandemEvent::completion_of(StageId::Two),
            TandemEvent::CompleteStage2
        );
        assert_eq!(TandemEvent::ArriveStage2.to_string(), "ArriveStage2");
    }

    #[test]
    fn test_snapshot_trace_block() {
        let snapshot = EventSnapshot {
            id: EventId(3),
            event: TandemEvent::CompleteStage1,
            time: SimTime::from_minutes(2.5),
            queue_lengths: [1, 0],
            server_status: [ServerStatus::Busy, ServerStatus::Idle],
            in_flight: None,
        };
        assert_eq!(
            snapshot.to_string(),
            "\nCALL:CompleteStage1    TIME:2.500000\n#Q1 :1    #Q2 :0\nSRV1:1    SRV2:0\n"
        );

        let with_transit = EventSnapshot {
            in_flight: Some(2),
            ..snapshot
        };
        assert!(with_transit.to_string().ends_with("SRV2:0\n#TR :2\n"));
    }
}
