//! State Store

use crate::health::{LivenessSlot, Stage};
use crate::nodes::{DashboardNode, InverterNode, PedalNode, VehicleState};
use crate::INVERTER_COUNT;
use serde::{Deserialize, Serialize};
use vcu_protocol::NodeId;

/// Canonical vehicle state.
///
/// Zero-initialized at startup and alive for the whole process. Mutation
/// requires `&mut`, which only the main-loop drain and the liveness sweep
/// hold; interrupt handlers never see the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateStore {
    pub pedal: PedalNode,
    pub inverters: [InverterNode; INVERTER_COUNT],
    pub vehicle: VehicleState,
    pub dashboard: DashboardNode,
}

impl StateStore {
    /// Create a zeroed store
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every field to zero, including latched fields
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record that `node` produced a decodable message at `timestamp_ms`
    pub fn mark_alive(&mut self, node: NodeId, timestamp_ms: u32) {
        let slot = &mut self.vehicle.liveness[node.index()];
        slot.last_seen_ms = Some(timestamp_ms);
        slot.messages = slot.messages.wrapping_add(1);
    }

    /// Liveness slot of `node`
    pub fn liveness(&self, node: NodeId) -> &LivenessSlot {
        &self.vehicle.liveness[node.index()]
    }

    pub(crate) fn liveness_mut(&mut self, node: NodeId) -> &mut LivenessSlot {
        &mut self.vehicle.liveness[node.index()]
    }

    /// Inverter telemetry by index (0..4)
    pub fn inverter(&self, index: usize) -> Option<&InverterNode> {
        self.inverters.get(index)
    }

    /// Current safety stage
    pub fn stage(&self) -> Stage {
        self.vehicle.stage
    }

    /// Check if any subsystem reports a fault: a non-zero error code or an
    /// inverter status error flag
    pub fn has_fault(&self) -> bool {
        self.vehicle.errors.any() || self.inverters.iter().any(|inv| inv.status.error)
    }
}

/// Write access reserved for the liveness sweep
impl StateStore {
    /// Set the debounced status of `node`
    pub fn set_node_status(&mut self, node: NodeId, status: crate::NodeStatus) {
        self.liveness_mut(node).status = status;
    }

    /// Set the safety stage
    pub fn set_stage(&mut self, stage: Stage) {
        self.vehicle.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeStatus;

    #[test]
    fn test_new_is_zeroed() {
        let store = StateStore::new();
        assert_eq!(store.pedal.throttle, 0);
        assert_eq!(store.pedal.brake, 0);
        assert!(!store.vehicle.shutdown_closed);
        assert_eq!(store.stage(), Stage::Startup);
        assert!(!store.dashboard.ready_to_drive.is_set());
        for node in NodeId::ALL {
            assert_eq!(*store.liveness(node), LivenessSlot::default());
        }
    }

    #[test]
    fn test_mark_alive_only_touches_one_slot() {
        let mut store = StateStore::new();
        store.mark_alive(NodeId::Pedal, 100);
        store.mark_alive(NodeId::Inverter1, 105);
        store.mark_alive(NodeId::Inverter1, 110);

        assert_eq!(store.liveness(NodeId::Pedal).last_seen_ms, Some(100));
        assert_eq!(store.liveness(NodeId::Inverter1).messages, 2);
        assert_eq!(store.liveness(NodeId::Inverter1).last_seen_ms, Some(110));
        assert_eq!(store.liveness(NodeId::Inverter3).last_seen_ms, None);
        // Marking alive never decides the debounced status
        assert_eq!(store.liveness(NodeId::Pedal).status, NodeStatus::Pending);
    }

    #[test]
    fn test_multiple_inverters() {
        let mut store = StateStore::new();
        for (i, inverter) in store.inverters.iter_mut().enumerate() {
            inverter.speed = 1000 + i as i16 * 100;
        }
        assert_eq!(store.inverter(0).map(|inv| inv.speed), Some(1000));
        assert_eq!(store.inverter(3).map(|inv| inv.speed), Some(1300));
        assert!(store.inverter(4).is_none());
    }

    #[test]
    fn test_fault_sources() {
        let mut store = StateStore::new();
        assert!(!store.has_fault());

        store.inverters[1].status.error = true;
        assert!(store.has_fault());

        store.inverters[1].status.error = false;
        store.vehicle.errors.system = 0x01;
        assert!(store.has_fault());
    }

    #[test]
    fn test_reset_clears_latch() {
        let mut store = StateStore::new();
        store.dashboard.ready_to_drive.set();
        store.set_stage(Stage::Error);
        store.reset();
        assert!(!store.dashboard.ready_to_drive.is_set());
        assert_eq!(store.stage(), Stage::Startup);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut store = StateStore::new();
        store.mark_alive(NodeId::Dashboard, 7);
        let json = serde_json::to_value(store).unwrap();
        assert_eq!(json["vehicle"]["stage"], "startup");
        assert_eq!(json["vehicle"]["liveness"][6]["last_seen_ms"], 7);
        assert_eq!(json["dashboard"]["ready_to_drive"], false);
    }
}
