//! Interrupt-Safe Transport Queue
//!
//! Fixed-capacity ring buffer of fixed-size records. The producer may run in
//! interrupt context while the consumer drains from the main loop; every
//! cursor mutation happens inside a `critical_section` region.

mod error;
mod queue;

pub use error::QueueError;
pub use queue::{Queue, QueueStats};

/// Smallest accepted item size in bytes
pub const ITEM_SIZE_MIN: usize = 1;
/// Largest accepted item size in bytes
pub const ITEM_SIZE_MAX: usize = 1024;
/// Largest accepted capacity (items)
pub const CAPACITY_MAX: usize = 256;
