//! Node Identities

use serde::{Deserialize, Serialize};

/// Number of nodes with a liveness slot
pub const NODE_COUNT: usize = 7;

/// Logical originators of bus messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeId {
    /// Pedal box (throttle, brake, steering)
    Pedal,
    /// Front-left inverter
    Inverter1,
    /// Front-right inverter
    Inverter2,
    /// Rear-left inverter
    Inverter3,
    /// Rear-right inverter
    Inverter4,
    /// Sub-controller (shutdown circuit, arming switch, oil pressure)
    SubController,
    /// Dashboard
    Dashboard,
}

impl NodeId {
    /// Every node, in liveness slot order
    pub const ALL: [NodeId; NODE_COUNT] = [
        NodeId::Pedal,
        NodeId::Inverter1,
        NodeId::Inverter2,
        NodeId::Inverter3,
        NodeId::Inverter4,
        NodeId::SubController,
        NodeId::Dashboard,
    ];

    /// Liveness slot index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverter node for inverter `index` (0..4)
    pub fn inverter(index: usize) -> Option<NodeId> {
        match index {
            0 => Some(NodeId::Inverter1),
            1 => Some(NodeId::Inverter2),
            2 => Some(NodeId::Inverter3),
            3 => Some(NodeId::Inverter4),
            _ => None,
        }
    }

    /// Inverter index (0..4) if this node is an inverter
    pub fn inverter_index(self) -> Option<usize> {
        match self {
            NodeId::Inverter1 => Some(0),
            NodeId::Inverter2 => Some(1),
            NodeId::Inverter3 => Some(2),
            NodeId::Inverter4 => Some(3),
            _ => None,
        }
    }

    /// Short display name
    pub fn name(self) -> &'static str {
        match self {
            NodeId::Pedal => "pedal",
            NodeId::Inverter1 => "inverter1",
            NodeId::Inverter2 => "inverter2",
            NodeId::Inverter3 => "inverter3",
            NodeId::Inverter4 => "inverter4",
            NodeId::SubController => "sub_controller",
            NodeId::Dashboard => "dashboard",
        }
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
