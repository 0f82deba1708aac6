//! Identifier Dispatch Table
//!
//! Maps a small integer message identifier to a handler using a
//! fixed-capacity, open-addressed array with linear probing. The table is
//! filled once at startup and is read-only on the hot path.

mod error;
mod table;

pub use error::DispatchError;
pub use table::{mix, DispatchTable};

/// Largest accepted table capacity
pub const CAPACITY_MAX: usize = 1024;
