//! Queue Error Types

use thiserror::Error;

/// Errors returned by [`Queue`](crate::Queue) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// Item size or capacity outside the accepted bounds
    #[error("invalid queue parameters: item size {item_size} bytes, capacity {capacity}")]
    InvalidParameter { item_size: usize, capacity: usize },

    /// Backing buffer could not be allocated
    #[error("cannot allocate queue buffer for {capacity} items")]
    NoMemory { capacity: usize },

    /// Queue is full, the item was dropped
    #[error("queue is full")]
    QueueFull,

    /// Queue is empty, nothing to read
    #[error("queue is empty")]
    QueueEmpty,
}
