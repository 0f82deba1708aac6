//! Liveness configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vcu_protocol::NodeId;

/// Liveness configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LivenessError {
    #[error("exit timeout {exit_ms} ms must be shorter than entry timeout {entry_ms} ms")]
    ExitNotShorter { entry_ms: u32, exit_ms: u32 },

    #[error("recovery gap {gap_ms} ms must be shorter than exit timeout {exit_ms} ms")]
    GapNotShorter { exit_ms: u32, gap_ms: u32 },

    #[error("critical node {0} is not monitored")]
    CriticalNotMonitored(NodeId),
}

/// Liveness configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// Silence after which a node is declared missing (milliseconds)
    pub entry_timeout_ms: u32,
    /// Continuous presence after which a node is declared alive (milliseconds)
    pub exit_timeout_ms: u32,
    /// Largest silence tolerated inside a recovery run (milliseconds)
    pub recovery_gap_ms: u32,
    /// Nodes the sweep watches
    pub monitored: Vec<NodeId>,
    /// Nodes whose loss moves the vehicle to the error stage
    pub critical: Vec<NodeId>,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            entry_timeout_ms: 500,
            exit_timeout_ms: 200,
            recovery_gap_ms: 50,
            monitored: NodeId::ALL.to_vec(),
            critical: vec![
                NodeId::Pedal,
                NodeId::Inverter1,
                NodeId::Inverter2,
                NodeId::Inverter3,
                NodeId::Inverter4,
            ],
        }
    }
}

impl LivenessConfig {
    /// Check timing order `gap < exit < entry` and that critical nodes are monitored
    pub fn validate(&self) -> Result<(), LivenessError> {
        if self.exit_timeout_ms >= self.entry_timeout_ms {
            return Err(LivenessError::ExitNotShorter {
                entry_ms: self.entry_timeout_ms,
                exit_ms: self.exit_timeout_ms,
            });
        }
        if self.recovery_gap_ms >= self.exit_timeout_ms {
            return Err(LivenessError::GapNotShorter {
                exit_ms: self.exit_timeout_ms,
                gap_ms: self.recovery_gap_ms,
            });
        }
        if let Some(node) = self
            .critical
            .iter()
            .find(|node| !self.monitored.contains(node))
        {
            return Err(LivenessError::CriticalNotMonitored(*node));
        }
        Ok(())
    }
}
