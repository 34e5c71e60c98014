//! End-to-end runs of the tandem network

use des_components::{StageId, TransitLink};
use des_core::{Execute, Executor, SeededVariates, SimTime, VariateSource};
use des_tandem::{
    DebugTrace, Engine, ReplicationDriver, TandemConfig, TandemError, TandemEvent,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Customer counts that must balance after every event
fn check_conservation<V: VariateSource>(engine: &Engine<V>) {
    let one = engine.stage(StageId::One);
    let two = engine.stage(StageId::Two);

    for stage in [one, two] {
        assert_eq!(
            stage.arrivals(),
            stage.service_starts() + stage.queue_length() as u64,
            "{} at {}",
            stage.id(),
            engine.time()
        );
        let in_service = stage.service_starts() - stage.completions();
        assert_eq!(in_service, u64::from(stage.status().as_indicator()));
        assert!(stage.queue_length() <= stage.queue_limit());
    }

    let in_flight = engine
        .transit()
        .map(TransitLink::in_flight_count)
        .unwrap_or(0) as u64;
    assert_eq!(one.completions(), two.arrivals() + in_flight);
}

#[test]
fn test_balanced_network_runs_to_completion() {
    let config = TandemConfig::new(1.0, 0.5, 0.5, 1000.0).with_replications(3);
    let mut driver = ReplicationDriver::new(config, SeededVariates::new(2024)).unwrap();
    let results = driver.run().unwrap();

    assert_eq!(results.reports.len(), 3);
    for report in &results.reports {
        assert_eq!(report.end_time, 1000.0);
        assert!(report.overall_mean_delay.is_finite());
        assert!(report.overall_mean_delay >= 0.0);
        assert!(report.customers_delayed > 0);
        for stage in &report.stages {
            assert!(stage.utilization > 0.3 && stage.utilization < 0.7);
            assert!(stage.mean_queue_length >= 0.0);
        }
        assert!(report.transit.is_none());
    }

    let utilization = results.summary.get("stage1_utilization").unwrap();
    assert_eq!(utilization.observations, 3);
    assert!(utilization.ci_low <= utilization.mean && utilization.mean <= utilization.ci_high);

    let text = results.to_string();
    assert!(text.starts_with("Tandem-server queueing system"));
    assert!(text.contains("Replication 3"));
    assert!(!text.contains("Maximum transit time"));
}

#[test]
fn test_counts_balance_after_every_event() {
    for transit_bound in [None, Some(2.0)] {
        let mut config = TandemConfig::new(1.0, 0.9, 0.8, 500.0);
        config.transit_bound = transit_bound;
        let mut engine = Engine::new(&config, SeededVariates::new(11)).unwrap();
        engine.initialize().unwrap();

        let mut last_time = SimTime::zero();
        let steps = Executor::unbound()
            .side_effect(|engine: &Engine<SeededVariates>| {
                assert!(engine.time() >= last_time);
                last_time = engine.time();
                check_conservation(engine);
            })
            .execute(&mut engine)
            .unwrap();

        assert_eq!(steps, engine.events_processed());
        assert_eq!(engine.last_event(), Some(TandemEvent::EndSimulation));
        assert_eq!(engine.time(), SimTime::from_minutes(500.0));
    }
}

#[test]
fn test_transit_link_statistics() {
    let config = TandemConfig::new(1.0, 0.5, 0.5, 1000.0)
        .with_transit_bound(2.0)
        .with_replications(1);
    let mut driver = ReplicationDriver::new(config, SeededVariates::new(99)).unwrap();
    let results = driver.run().unwrap();

    let report = results.reports[0];
    let transit = report.transit.unwrap();
    assert!(transit.delivered > 500);
    // Uniform on [0, 2) averages one minute, and about one customer is in flight
    assert!(transit.mean_transit_time > 0.8 && transit.mean_transit_time < 1.2);
    assert!(transit.mean_in_flight > 0.5 && transit.mean_in_flight < 1.5);
    assert!(transit.max_in_flight >= 1);

    let text = results.to_string();
    assert!(text.contains("Maximum transit time"));
    let estimate = results.summary.get("mean_transit_time").unwrap();
    assert_eq!(estimate.observations, 1);
    assert_eq!(estimate.std_dev, 0.0);
    assert!(report.metrics().iter().any(|(name, _)| *name == "max_in_transit"));
}

#[test]
fn test_same_seed_reproduces_run() {
    let config = TandemConfig::new(1.0, 0.7, 0.6, 300.0)
        .with_transit_bound(1.5)
        .with_replications(4);

    let first = ReplicationDriver::new(config.clone(), SeededVariates::new(5))
        .unwrap()
        .run()
        .unwrap();
    let second = ReplicationDriver::new(config.clone(), SeededVariates::new(5))
        .unwrap()
        .run()
        .unwrap();
    let other = ReplicationDriver::new(config, SeededVariates::new(6))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(first.reports, second.reports);
    assert_ne!(first.reports, other.reports);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_zero_run_length_engine_handles_only_the_end() {
    let config = TandemConfig::new(1.0, 0.5, 0.5, 0.0).with_transit_bound(2.0);
    let mut engine = Engine::new(&config, SeededVariates::new(1)).unwrap();
    engine.initialize().unwrap();

    let steps = Executor::unbound().execute(&mut engine).unwrap();
    assert_eq!(steps, 1);

    let report = engine.report(1);
    assert_eq!(report.customers_delayed, 0);
    assert_eq!(report.overall_mean_delay, 0.0);
    assert_eq!(report.stages[1].utilization, 0.0);
    assert_eq!(report.transit.unwrap().mean_in_flight, 0.0);
}

#[test]
fn test_overflow_stops_the_run() {
    let config = TandemConfig::new(1.0, 50.0, 0.5, 1000.0)
        .with_queue_limit(5)
        .with_replications(3);
    let mut driver = ReplicationDriver::new(config, SeededVariates::new(3)).unwrap();

    match driver.run().unwrap_err() {
        TandemError::QueueOverflow { stage, limit, time } => {
            assert_eq!(stage, StageId::One);
            assert_eq!(limit, 5);
            assert!(time > SimTime::zero());
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(driver.completed(), 0);
    assert_eq!(driver.engine().stage(StageId::One).queue_length(), 5);
}

#[test]
fn test_config_file_drives_a_traced_run() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1.0 0.5 0.5 30.0").unwrap();

    let config = TandemConfig::load(file.path())
        .unwrap()
        .with_replications(2)
        .with_seed(17);
    let mut driver = ReplicationDriver::new(config.clone(), SeededVariates::new(config.seed))
        .unwrap();
    let mut trace = DebugTrace::new(Vec::new());
    let results = driver.run_traced(&mut trace).unwrap();

    assert_eq!(results.heading.run_length, 30.0);
    assert_eq!(results.heading.mean_service, [0.5, 0.5]);
    let events: u64 = results.reports.iter().map(|r| r.events_processed).sum();
    assert_eq!(trace.records(), events);

    let text = String::from_utf8(trace.finish().unwrap()).unwrap();
    assert_eq!(text.matches("REPLICATION").count(), 2);
    assert!(!text.contains("#TR"));
}
