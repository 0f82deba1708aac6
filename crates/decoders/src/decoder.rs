//! Decoder capability

use std::sync::Arc;
use vcu_protocol::{NodeId, ProtocolError, Record};
use vehicle_state::StateStore;

/// Decode one message payload into the state store.
///
/// Implementations must be idempotent: decoding the same record twice
/// leaves the same stored state as decoding it once (liveness counters
/// aside). A payload too short for the layout returns an error and leaves
/// the store untouched.
pub trait Decoder: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Node whose liveness slot a successful decode marks, if any
    fn node(&self) -> Option<NodeId>;

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError>;
}

/// Dispatch table handler type
pub type Route = Arc<dyn Decoder>;
