//! Bus Record

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};

/// Maximum payload bytes per record
pub const MAX_PAYLOAD: usize = 8;

/// One received bus message: identifier, up to 8 payload bytes, arrival time.
///
/// Fixed-size and `Copy` so it can be moved through the transport queue
/// without per-item allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Message identifier (11-bit standard)
    pub id: u16,
    /// Valid payload bytes (0-8)
    pub len: u8,
    /// Payload storage, bytes past `len` are zero
    pub data: [u8; MAX_PAYLOAD],
    /// Arrival tick in milliseconds (wraps)
    pub timestamp_ms: u32,
}

impl Record {
    /// Build a record from a payload slice
    pub fn new(id: u16, payload: &[u8], timestamp_ms: u32) -> Result<Self, ProtocolError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(ProtocolError::LengthOverflow(payload.len()));
        }

        let mut data = [0u8; MAX_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id,
            len: payload.len() as u8,
            data,
            timestamp_ms,
        })
    }

    /// Valid payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.data[..usize::from(self.len).min(MAX_PAYLOAD)]
    }

    /// Borrow the payload, requiring at least `expected` bytes
    pub fn require(&self, expected: usize) -> Result<&[u8], ProtocolError> {
        let payload = self.payload();
        if payload.len() < expected {
            return Err(ProtocolError::ShortPayload {
                id: self.id,
                expected,
                actual: payload.len(),
            });
        }
        Ok(payload)
    }
}
