//! Message Decoders
//!
//! One [`Decoder`] per physical bus message. A decoder interprets the
//! payload of a [`Record`](vcu_protocol::Record), writes the raw scaled
//! fields into the [`StateStore`](vehicle_state::StateStore) and marks the
//! originating node alive. Decoders never allocate, block, or touch the
//! dispatch table.

mod decoder;
mod inverter;
mod routes;
mod vehicle;

pub use decoder::{Decoder, Route};
pub use inverter::{
    InverterActual1Decoder, InverterActual2Decoder, InverterActual3Decoder,
    InverterSetpointDecoder,
};
pub use routes::{default_route_count, register_defaults};
pub use vehicle::{DashboardDecoder, PedalDecoder, SubControllerDecoder};
