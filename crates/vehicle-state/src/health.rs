//! Liveness slots, error codes and safety stage

use crate::INVERTER_COUNT;
use serde::{Deserialize, Serialize};

/// Coarse safety/operational phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for every monitored node to come alive
    #[default]
    Startup,
    /// All monitored nodes alive, no faults
    Running,
    /// A non-critical node is missing
    Degraded,
    /// Fault or critical node lost; held until an external reset
    Error,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Startup => "startup",
            Stage::Running => "running",
            Stage::Degraded => "degraded",
            Stage::Error => "error",
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Debounced node presence, owned by the liveness sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Not yet confirmed alive since startup
    #[default]
    Pending,
    Alive,
    Missing,
}

/// Per-node liveness marker.
///
/// Decoders update `last_seen_ms` and `messages`; only the liveness sweep
/// writes `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LivenessSlot {
    /// Arrival tick of the latest decoded message
    pub last_seen_ms: Option<u32>,
    /// Decoded messages since reset
    pub messages: u32,
    pub status: NodeStatus,
}

/// Milliseconds from `since_ms` to `now_ms` on the wrapping tick.
///
/// A `since_ms` at or after `now_ms` (a record stamped after the sweep
/// sampled its clock) is zero, not a wrapped four-billion-ms age.
pub fn elapsed_ms(now_ms: u32, since_ms: u32) -> u32 {
    let delta = now_ms.wrapping_sub(since_ms);
    if (delta as i32) < 0 {
        0
    } else {
        delta
    }
}

impl LivenessSlot {
    /// Milliseconds since the latest sighting, `None` if never seen
    pub fn age_ms(&self, now_ms: u32) -> Option<u32> {
        self.last_seen_ms.map(|seen| elapsed_ms(now_ms, seen))
    }
}

/// Per-subsystem error codes, zero meaning healthy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ErrorGroup {
    pub system: u16,
    pub inverters: [u16; INVERTER_COUNT],
    pub bus: u16,
}

impl ErrorGroup {
    /// Check if any subsystem reports a non-zero code
    pub fn any(&self) -> bool {
        self.system != 0 || self.bus != 0 || self.inverters.iter().any(|&code| code != 0)
    }
}
