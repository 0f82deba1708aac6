//! Per-node telemetry records

use crate::health::{ErrorGroup, LivenessSlot, Stage};
use serde::{Deserialize, Serialize};
use vcu_protocol::{InverterSetpoints, InverterStatus, NODE_COUNT};

/// One-way flag: once set, only a store reset clears it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Latch(bool);

impl Latch {
    /// Set the latch; returns `true` if this call changed it
    pub fn set(&mut self) -> bool {
        let changed = !self.0;
        self.0 = true;
        changed
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// Pedal box telemetry, every field clamped to `ranges`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PedalNode {
    /// Throttle (0.1 %)
    pub throttle: u16,
    /// Brake (0.1 %)
    pub brake: u16,
    /// Steering wheel angle (0.1 deg)
    pub steering_angle: i16,
    /// Implausibility sensor raw reading
    pub implausibility_raw: u16,
    /// Brake at or above the hard-brake threshold at the latest decode
    pub hard_braking: bool,
}

/// Inverter telemetry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InverterNode {
    pub status: InverterStatus,
    /// Actual speed (rpm)
    pub speed: i16,
    /// Actual torque (0.1 % of nominal)
    pub torque: i16,
    /// Motor temperature (0.1 deg C)
    pub motor_temperature: i16,
    /// Cold plate temperature (0.1 deg C)
    pub plate_temperature: i16,
    /// IGBT temperature (0.1 deg C)
    pub igbt_temperature: i16,
    /// DC bus voltage (V)
    pub dc_bus_voltage: u16,
    /// Actual power (W)
    pub actual_power: i32,
    pub torque_current: i16,
    pub magnetizing_current: i16,
    /// Last setpoints seen on the bus
    pub setpoints: InverterSetpoints,
}

/// Vehicle-wide signals, error codes, liveness and stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleState {
    /// Shutdown circuit closed
    pub shutdown_closed: bool,
    /// Rear oil pressure (0.01 bar)
    pub rear_oil_pressure: u16,
    /// Arming switch (ASMS) on
    pub arming_switch_on: bool,
    /// Water temperature (deg C)
    pub water_temperature: u8,
    pub errors: ErrorGroup,
    /// Indexed by `NodeId::index()`
    pub liveness: [LivenessSlot; NODE_COUNT],
    /// Records decoded by the drain loop
    pub comm_counter: u32,
    /// Rising edges into hard braking
    pub hard_brake_count: u32,
    pub stage: Stage,
}

/// Dashboard inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardNode {
    /// Ready-to-drive, latched on the first request
    pub ready_to_drive: Latch,
    /// Selected mission
    pub mission: u8,
}
