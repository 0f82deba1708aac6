//! Aggregator Error Types

use thiserror::Error;

/// Startup errors. Runtime conditions (full queue, unrouted or malformed
/// records) are counted instead of returned.
#[derive(Debug, Error)]
pub enum VcuError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("liveness configuration: {0}")]
    Liveness(#[from] liveness::LivenessError),

    #[error("receive queue: {0}")]
    Queue(#[from] transport_queue::QueueError),

    #[error("route registration: {0}")]
    Dispatch(#[from] dispatch_table::DispatchError),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
