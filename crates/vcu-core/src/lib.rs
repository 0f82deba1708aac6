//! Vehicle Control Unit State Aggregator
//!
//! Wires the transport queue, dispatch table, decoders, state store and
//! liveness monitor into one main-loop object. The peripheral layer pushes
//! [`Record`]s into a [`Queue`] from interrupt context; the main loop calls
//! [`Aggregator::process_pending`] to drain and decode them and
//! [`Aggregator::tick`] to advance the safety stage.

mod aggregator;
mod config;
mod error;
mod logging;

pub use aggregator::{Aggregator, AggregatorStats, DrainReport, UnroutedHandler};
pub use config::VcuConfig;
pub use error::VcuError;
pub use logging::init_logging;

pub use decoders::{Decoder, Route};
pub use liveness::LivenessConfig;
pub use transport_queue::{Queue, QueueError, QueueStats};
pub use vcu_protocol::{NodeId, Record};
pub use vehicle_state::{NodeStatus, Stage, StateStore};

/// Allocate the receive queue the peripheral layer pushes into
pub fn rx_queue(config: &VcuConfig) -> Result<Queue<Record>, VcuError> {
    Ok(Queue::new(config.rx_queue_capacity)?)
}
