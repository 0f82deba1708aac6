//! Liveness Sweep and Stage State Machine

use crate::config::{LivenessConfig, LivenessError};
use tracing::{debug, info, warn};
use vcu_protocol::{NodeId, NODE_COUNT};
use vehicle_state::{elapsed_ms, NodeStatus, Stage, StateStore};

/// Presence summary of the monitored nodes after a per-node pass
#[derive(Debug, Clone, Copy, Default)]
struct Presence {
    all_alive: bool,
    missing: usize,
    critical_missing: usize,
    /// Critical nodes that went from alive to missing in this sweep
    critical_lost: usize,
}

/// Debounces node presence and drives the safety stage.
///
/// The monitor owns the hysteresis bookkeeping; the store carries the
/// resulting `NodeStatus` per node and the current `Stage`. Time is a
/// wrapping millisecond tick supplied by the caller.
#[derive(Debug)]
pub struct LivenessMonitor {
    config: LivenessConfig,
    monitored: [bool; NODE_COUNT],
    critical: [bool; NODE_COUNT],
    /// Tick of the first sweep since creation or reset
    started_ms: Option<u32>,
    /// Start tick of an ongoing recovery run, per node
    recovery_start: [Option<u32>; NODE_COUNT],
}

impl LivenessMonitor {
    /// Create a monitor, rejecting an inconsistent configuration
    pub fn new(config: LivenessConfig) -> Result<Self, LivenessError> {
        config.validate()?;

        let mut monitored = [false; NODE_COUNT];
        let mut critical = [false; NODE_COUNT];
        for node in &config.monitored {
            monitored[node.index()] = true;
        }
        for node in &config.critical {
            critical[node.index()] = true;
        }

        info!(
            entry_ms = config.entry_timeout_ms,
            exit_ms = config.exit_timeout_ms,
            gap_ms = config.recovery_gap_ms,
            monitored = config.monitored.len(),
            "liveness monitor created"
        );

        Ok(Self {
            config,
            monitored,
            critical,
            started_ms: None,
            recovery_start: [None; NODE_COUNT],
        })
    }

    pub fn config(&self) -> &LivenessConfig {
        &self.config
    }

    /// Check if `node` is watched by the sweep
    pub fn is_monitored(&self, node: NodeId) -> bool {
        self.monitored[node.index()]
    }

    /// Check if losing `node` moves the vehicle to the error stage
    pub fn is_critical(&self, node: NodeId) -> bool {
        self.critical[node.index()]
    }

    /// Update every monitored node's status, then advance the stage.
    ///
    /// Returns the stage after the sweep.
    pub fn sweep(&mut self, store: &mut StateStore, now_ms: u32) -> Stage {
        let started = *self.started_ms.get_or_insert(now_ms);

        let mut presence = Presence {
            all_alive: true,
            ..Default::default()
        };
        for node in NodeId::ALL {
            if !self.is_monitored(node) {
                continue;
            }

            let before = store.liveness(node).status;
            let status = self.update_node(store, node, now_ms, started);
            if before == NodeStatus::Alive
                && status == NodeStatus::Missing
                && self.is_critical(node)
            {
                presence.critical_lost += 1;
            }
            if status != NodeStatus::Alive {
                presence.all_alive = false;
            }
            if status == NodeStatus::Missing {
                presence.missing += 1;
                if self.is_critical(node) {
                    presence.critical_missing += 1;
                }
            }
        }

        let current = store.stage();
        let next = next_stage(current, presence, store.has_fault());
        if next != current {
            log_transition(current, next, presence, store);
            store.set_stage(next);
        }
        next
    }

    fn update_node(
        &mut self,
        store: &mut StateStore,
        node: NodeId,
        now_ms: u32,
        started_ms: u32,
    ) -> NodeStatus {
        let slot = *store.liveness(node);
        let age = slot.age_ms(now_ms);
        let silence = age.unwrap_or_else(|| elapsed_ms(now_ms, started_ms));
        let run = &mut self.recovery_start[node.index()];

        let next = match slot.status {
            NodeStatus::Alive if silence > self.config.entry_timeout_ms => {
                warn!(node = %node, silence_ms = silence, "node missing");
                NodeStatus::Missing
            }
            NodeStatus::Alive => NodeStatus::Alive,
            NodeStatus::Pending | NodeStatus::Missing => match age {
                Some(age) if age <= self.config.recovery_gap_ms => {
                    let run_start = *run.get_or_insert(now_ms);
                    if elapsed_ms(now_ms, run_start) >= self.config.exit_timeout_ms {
                        *run = None;
                        info!(node = %node, "node alive");
                        NodeStatus::Alive
                    } else {
                        slot.status
                    }
                }
                _ => {
                    if run.take().is_some() {
                        debug!(node = %node, silence_ms = silence, "recovery run interrupted");
                    }
                    if slot.status == NodeStatus::Pending && silence > self.config.entry_timeout_ms {
                        warn!(node = %node, silence_ms = silence, "node never came up");
                        NodeStatus::Missing
                    } else {
                        slot.status
                    }
                }
            },
        };

        if next != slot.status {
            store.set_node_status(node, next);
        }
        next
    }

    /// Leave the error stage: return to startup and re-confirm every node
    pub fn reset(&mut self, store: &mut StateStore) {
        let previous = store.stage();
        for node in NodeId::ALL {
            store.set_node_status(node, NodeStatus::Pending);
        }
        store.set_stage(Stage::Startup);
        self.started_ms = None;
        self.recovery_start = [None; NODE_COUNT];
        info!(from = %previous, "liveness reset, back to startup");
    }
}

/// Stage transition table
fn next_stage(current: Stage, presence: Presence, fault: bool) -> Stage {
    match current {
        Stage::Error => Stage::Error,
        _ if fault => Stage::Error,
        Stage::Startup if presence.critical_lost > 0 => Stage::Error,
        Stage::Startup if presence.all_alive => Stage::Running,
        Stage::Startup => Stage::Startup,
        Stage::Running | Stage::Degraded => {
            if presence.critical_missing > 0 {
                Stage::Error
            } else if presence.missing > 0 {
                Stage::Degraded
            } else if presence.all_alive {
                Stage::Running
            } else {
                current
            }
        }
    }
}

fn log_transition(from: Stage, to: Stage, presence: Presence, store: &StateStore) {
    match to {
        Stage::Error => warn!(
            from = %from,
            critical_missing = presence.critical_missing,
            critical_lost = presence.critical_lost,
            fault = store.has_fault(),
            "stage -> error"
        ),
        Stage::Degraded => warn!(from = %from, missing = presence.missing, "stage -> degraded"),
        _ => info!(from = %from, to = %to, "stage transition"),
    }
}
