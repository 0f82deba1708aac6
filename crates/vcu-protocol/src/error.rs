//! Protocol Error Types

use thiserror::Error;

/// Errors while interpreting a record payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Payload shorter than the message layout requires
    #[error("message 0x{id:03X} needs {expected} payload bytes, got {actual}")]
    ShortPayload {
        id: u16,
        expected: usize,
        actual: usize,
    },

    /// Payload longer than 8 bytes
    #[error("payload length {0} exceeds 8 bytes")]
    LengthOverflow(usize),
}
