//! End-to-end drain pipeline: queue -> dispatch -> decode -> store -> stage

use vcu_core::{rx_queue, Aggregator, NodeId, NodeStatus, Queue, Record, Stage, VcuConfig};
use vcu_protocol::ids;
use vehicle_state::StateStore;

fn setup() -> (Aggregator, Queue<Record>) {
    let config = VcuConfig::default();
    (
        Aggregator::new(&config).unwrap(),
        rx_queue(&config).unwrap(),
    )
}

fn record(id: u16, data: &[u8], ts: u32) -> Record {
    Record::new(id, data, ts).unwrap()
}

/// One healthy message from every monitored node
fn heartbeat(queue: &Queue<Record>, ts: u32) {
    heartbeat_without(queue, ts, None);
}

/// Heartbeat with inverter `silent` (0..4) left out
fn heartbeat_without(queue: &Queue<Record>, ts: u32, silent: Option<usize>) {
    queue
        .push(record(ids::PEDAL, &[0x2C, 0x01, 0, 0, 0, 0, 0, 0], ts))
        .unwrap();
    queue
        .push(record(ids::SUB_CONTROLLER, &[1, 1, 0xC8, 0, 80, 0, 0, 0], ts))
        .unwrap();
    queue.push(record(ids::DASHBOARD, &[0, 1], ts)).unwrap();
    for index in (0..4).filter(|&i| Some(i) != silent) {
        queue
            .push(record(
                ids::inverter_actual_1(index),
                &[0, 0b0101_0001, 0x64, 0, 0, 0, 0, 0],
                ts,
            ))
            .unwrap();
    }
}

#[test]
fn inverter_status_reaches_the_store() {
    let (mut aggregator, queue) = setup();
    queue
        .push(record(
            ids::inverter_actual_1(0),
            &[0xEE, 0b0000_0001, 0x0A, 0x00, 0x05, 0x00, 0x00, 0x00],
            25,
        ))
        .unwrap();

    let report = aggregator.process_pending(&queue);
    assert_eq!(report.decoded, 1);
    assert!(queue.is_empty());

    let store = aggregator.store();
    let inverter = &store.inverters[0];
    assert!(inverter.status.ready);
    assert!(!inverter.status.error);
    assert!(!inverter.status.warning);
    assert!(!inverter.status.dc_on);
    assert_eq!(inverter.speed, 10);
    assert_eq!(inverter.torque_current, 5);
    assert_eq!(store.liveness(NodeId::Inverter1).last_seen_ms, Some(25));
    assert_eq!(store.vehicle.comm_counter, 1);
}

#[test]
fn ready_to_drive_stays_latched_through_the_pipeline() {
    let (mut aggregator, queue) = setup();
    queue.push(record(ids::DASHBOARD, &[1, 0], 0)).unwrap();
    queue.push(record(ids::DASHBOARD, &[0, 0], 10)).unwrap();
    aggregator.process_pending(&queue);
    assert!(aggregator.store().dashboard.ready_to_drive.is_set());

    aggregator.reset_store();
    assert!(!aggregator.store().dashboard.ready_to_drive.is_set());
}

#[test]
fn runtime_faults_are_counted_not_fatal() {
    let (mut aggregator, queue) = setup();
    queue.push(record(0x7FF, &[0; 8], 0)).unwrap();
    queue.push(record(ids::PEDAL, &[1, 2, 3], 0)).unwrap();
    queue
        .push(record(ids::inverter_actual_3(2), &[0; 8], 0))
        .unwrap();

    let report = aggregator.process_pending(&queue);
    assert_eq!(report.unrouted, 1);
    assert_eq!(report.malformed, 1);
    assert_eq!(report.decoded, 1);
    assert_eq!(report.total(), 3);

    let stats = aggregator.stats();
    assert_eq!((stats.decoded, stats.unrouted, stats.malformed), (1, 1, 1));
    assert_eq!(aggregator.store().pedal, StateStore::new().pedal);
}

#[test]
fn drain_is_capped_at_queue_capacity() {
    let aggregator_config = VcuConfig {
        rx_queue_capacity: 4,
        ..Default::default()
    };
    let mut aggregator = Aggregator::new(&aggregator_config).unwrap();
    let queue = rx_queue(&aggregator_config).unwrap();

    for ts in 0..4 {
        queue.push(record(ids::DASHBOARD, &[0, 0], ts)).unwrap();
    }
    assert!(queue.push(record(ids::DASHBOARD, &[0, 0], 9)).is_err());
    assert_eq!(queue.stats().dropped, 1);

    assert_eq!(aggregator.process_pending(&queue).decoded, 4);
    assert_eq!(aggregator.process_pending(&queue).total(), 0);
}

#[test]
fn full_stage_lifecycle() {
    let (mut aggregator, queue) = setup();

    // All nodes heard every 10 ms: running once the exit window passes
    for now in (0..=190).step_by(10) {
        heartbeat(&queue, now);
        aggregator.process_pending(&queue);
        assert_eq!(aggregator.tick(now), Stage::Startup);
    }
    heartbeat(&queue, 200);
    aggregator.process_pending(&queue);
    assert_eq!(aggregator.tick(200), Stage::Running);

    // Inverter 2 falls silent: critical loss
    let mut stage = Stage::Running;
    for now in (210..=800).step_by(10) {
        heartbeat_without(&queue, now, Some(1));
        aggregator.process_pending(&queue);
        stage = aggregator.tick(now);
    }
    assert_eq!(stage, Stage::Error);
    assert_eq!(
        aggregator.store().liveness(NodeId::Inverter2).status,
        NodeStatus::Missing
    );
    assert_eq!(aggregator.stats().stage_transitions, 2);

    let snapshot = serde_json::to_value(aggregator.snapshot()).unwrap();
    assert_eq!(snapshot["vehicle"]["stage"], "error");
}
