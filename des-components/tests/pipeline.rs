//! Hand-driven customer flow through stage 1, the transit link and stage 2

use des_components::{Admission, Completion, ServerStatus, Stage, StageId, TransitLink};
use des_core::SimTime;

fn t(minutes: f64) -> SimTime {
    SimTime::from_minutes(minutes)
}

#[test]
fn customers_flow_through_both_stages() {
    let mut first = Stage::new(StageId::One, 1.0, 10);
    let mut link = TransitLink::new(2.0);
    let mut second = Stage::new(StageId::Two, 1.0, 10);

    // Two customers arrive back to back at stage 1
    assert_eq!(first.arrive(t(0.0)).unwrap(), Admission::Served);
    assert_eq!(
        first.arrive(t(0.5)).unwrap(),
        Admission::Queued { queue_length: 1 }
    );

    // First finishes at 1.0 and travels 1.5 minutes
    assert_eq!(
        first.complete(t(1.0)),
        Completion::NextCustomer { delay: 0.5 }
    );
    assert_eq!(link.depart(t(1.0), 1.5), t(2.5));

    // Second finishes at 2.0 and travels 0.25 minutes, overtaking the first
    assert_eq!(first.complete(t(2.0)), Completion::Idle);
    assert_eq!(link.depart(t(2.0), 0.25), t(2.25));

    let overtaker = link.deliver().unwrap();
    assert_eq!(overtaker.departed, t(2.0));
    assert_eq!(second.arrive(overtaker.eligible).unwrap(), Admission::Served);

    let straggler = link.deliver().unwrap();
    assert_eq!(
        second.arrive(straggler.eligible).unwrap(),
        Admission::Queued { queue_length: 1 }
    );
    assert_eq!(link.in_flight_count(), 0);
    assert_eq!(link.max_in_flight(), 2);

    assert_eq!(
        second.complete(t(3.0)),
        Completion::NextCustomer { delay: 0.5 }
    );
    assert_eq!(second.complete(t(4.0)), Completion::Idle);

    assert_eq!(first.status(), ServerStatus::Idle);
    assert_eq!(second.status(), ServerStatus::Idle);
    assert_eq!(first.completions(), 2);
    assert_eq!(second.completions(), 2);
    assert_eq!(first.total_delay() + second.total_delay(), 1.0);
}
