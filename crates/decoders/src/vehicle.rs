//! Pedal box, sub-controller and dashboard decoders

use crate::decoder::Decoder;
use tracing::{debug, info};
use vcu_protocol::{DashboardFrame, NodeId, PedalFrame, ProtocolError, Record, SubControllerFrame};
use vehicle_state::{ranges, StateStore};

/// Pedal box: throttle, brake, steering, implausibility
#[derive(Debug, Clone, Copy, Default)]
pub struct PedalDecoder;

impl Decoder for PedalDecoder {
    fn name(&self) -> &'static str {
        "pedal"
    }

    fn node(&self) -> Option<NodeId> {
        Some(NodeId::Pedal)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = PedalFrame::parse(record)?;

        let pedal = &mut store.pedal;
        pedal.throttle = ranges::THROTTLE.clamp(frame.throttle);
        pedal.brake = ranges::BRAKE.clamp(frame.brake);
        pedal.steering_angle = ranges::STEERING_ANGLE.clamp(frame.steering_angle);
        pedal.implausibility_raw = ranges::IMPLAUSIBILITY.clamp(frame.implausibility_raw);

        // Count rising edges only so a repeated payload is not counted twice
        let hard = pedal.brake >= ranges::HARD_BRAKE_THRESHOLD;
        if hard && !pedal.hard_braking {
            store.vehicle.hard_brake_count = store.vehicle.hard_brake_count.wrapping_add(1);
            debug!(brake = pedal.brake, "hard braking");
        }
        store.pedal.hard_braking = hard;

        store.mark_alive(NodeId::Pedal, record.timestamp_ms);
        Ok(())
    }
}

/// Sub-controller: shutdown circuit, arming switch, oil, water, system error
#[derive(Debug, Clone, Copy, Default)]
pub struct SubControllerDecoder;

impl Decoder for SubControllerDecoder {
    fn name(&self) -> &'static str {
        "sub_controller"
    }

    fn node(&self) -> Option<NodeId> {
        Some(NodeId::SubController)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = SubControllerFrame::parse(record)?;

        let vehicle = &mut store.vehicle;
        vehicle.shutdown_closed = frame.shutdown_closed;
        vehicle.arming_switch_on = frame.arming_switch_on;
        vehicle.rear_oil_pressure = frame.rear_oil_pressure;
        vehicle.water_temperature = frame.water_temperature;
        vehicle.errors.system = frame.system_error;

        store.mark_alive(NodeId::SubController, record.timestamp_ms);
        Ok(())
    }
}

/// Dashboard: ready-to-drive request (latched) and mission selector
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardDecoder;

impl Decoder for DashboardDecoder {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn node(&self) -> Option<NodeId> {
        Some(NodeId::Dashboard)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = DashboardFrame::parse(record)?;

        let dashboard = &mut store.dashboard;
        if frame.ready_to_drive && dashboard.ready_to_drive.set() {
            info!(mission = frame.mission, "ready-to-drive latched");
        }
        dashboard.mission = frame.mission;

        store.mark_alive(NodeId::Dashboard, record.timestamp_ms);
        Ok(())
    }
}
