//! Vehicle State Store
//!
//! The single canonical snapshot of vehicle state, assembled from decoded
//! bus messages. Only decoders running on the main loop hold a
//! `&mut StateStore`; every other consumer reads through `&StateStore`.

mod health;
mod nodes;
pub mod ranges;
mod store;

pub use health::{elapsed_ms, ErrorGroup, LivenessSlot, NodeStatus, Stage};
pub use nodes::{DashboardNode, InverterNode, Latch, PedalNode, VehicleState};
pub use store::StateStore;

pub use vcu_protocol::{InverterSetpoints, InverterStatus, NodeId, NODE_COUNT};

/// Number of inverters on the vehicle
pub const INVERTER_COUNT: usize = 4;
