//! Vehicle Bus Protocol
//!
//! Defines the fixed-size [`Record`] carried by the transport queue, the
//! identities of the nodes on the bus, and the payload layout of every
//! message the vehicle control unit understands. Everything here is pure
//! byte interpretation; nothing touches shared state.

mod bits;
mod error;
mod frames;
mod node;
mod record;

pub use bits::{bit, i16_le, i32_le, u16_le};
pub use error::ProtocolError;
pub use frames::{
    DashboardFrame, InverterActual1, InverterActual2, InverterActual3, InverterSetpoints,
    InverterStatus, PedalFrame, SubControllerFrame,
};
pub use node::{NodeId, NODE_COUNT};
pub use record::{Record, MAX_PAYLOAD};

/// Message identifiers on the vehicle bus
pub mod ids {
    /// Sub-controller broadcast
    pub const SUB_CONTROLLER: u16 = 0x20;
    /// Pedal box broadcast
    pub const PEDAL: u16 = 0x30;
    /// Dashboard broadcast
    pub const DASHBOARD: u16 = 0x40;

    /// Inverter node addresses, in inverter index order
    pub const INVERTER_NODE_ADDRESSES: [u16; 4] = [1, 2, 5, 6];

    /// Actual values 1 base (status, speed, currents)
    pub const INVERTER_ACTUAL_1_BASE: u16 = 0x282;
    /// Actual values 2 base (temperatures, error code)
    pub const INVERTER_ACTUAL_2_BASE: u16 = 0x284;
    /// Actual values 3 base (torque, bus voltage, power), indexed by inverter
    pub const INVERTER_ACTUAL_3_BASE: u16 = 0x290;
    /// Setpoints base (control word and limits sent by the controller)
    pub const INVERTER_SETPOINTS_BASE: u16 = 0x183;

    /// Actual values 1 identifier for inverter `index` (0..4)
    pub const fn inverter_actual_1(index: usize) -> u16 {
        INVERTER_ACTUAL_1_BASE + INVERTER_NODE_ADDRESSES[index]
    }

    /// Actual values 2 identifier for inverter `index` (0..4)
    pub const fn inverter_actual_2(index: usize) -> u16 {
        INVERTER_ACTUAL_2_BASE + INVERTER_NODE_ADDRESSES[index]
    }

    /// Actual values 3 identifier for inverter `index` (0..4)
    pub const fn inverter_actual_3(index: usize) -> u16 {
        INVERTER_ACTUAL_3_BASE + index as u16
    }

    /// Setpoints identifier for inverter `index` (0..4)
    pub const fn inverter_setpoints(index: usize) -> u16 {
        INVERTER_SETPOINTS_BASE + INVERTER_NODE_ADDRESSES[index]
    }
}
