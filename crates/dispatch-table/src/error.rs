//! Dispatch Error Types

use thiserror::Error;

/// Registration errors. All of them are configuration faults and should
/// abort startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Capacity zero or above `CAPACITY_MAX`
    #[error("invalid dispatch table capacity {0}")]
    InvalidCapacity(usize),

    /// Probing found no free slot
    #[error("dispatch table full, cannot route 0x{0:03X}")]
    Full(u32),

    /// Identifier already routed
    #[error("identifier 0x{0:03X} is already routed")]
    Duplicate(u32),
}
