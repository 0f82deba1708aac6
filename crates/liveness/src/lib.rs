//! Liveness and Safety Stage
//!
//! Debounces per-node presence with entry/exit hysteresis and derives the
//! vehicle safety stage from node presence and reported fault codes. The
//! sweep runs on the main loop tick, never from interrupt context.

mod config;
mod monitor;

pub use config::{LivenessConfig, LivenessError};
pub use monitor::LivenessMonitor;
