//! Inverter decoders
//!
//! Each inverter broadcasts three actual-value messages; the controller's
//! own setpoint message is looped back and recorded for diagnostics. The
//! `index` of each decoder selects the inverter (0..4) and its liveness slot.

use crate::decoder::Decoder;
use tracing::warn;
use vcu_protocol::{
    InverterActual1, InverterActual2, InverterActual3, InverterSetpoints, NodeId, ProtocolError,
    Record,
};
use vehicle_state::StateStore;

macro_rules! inverter_decoder {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            index: usize,
            node: NodeId,
        }

        impl $name {
            /// Decoder for inverter `index`, `None` if out of range
            pub fn new(index: usize) -> Option<Self> {
                let node = NodeId::inverter(index)?;
                Some(Self { index, node })
            }

            pub fn index(&self) -> usize {
                self.index
            }

            /// Inverter this decoder writes to
            pub fn inverter(&self) -> NodeId {
                self.node
            }
        }
    };
}

inverter_decoder!(
    /// Actual values 1: status flags, speed, currents
    InverterActual1Decoder
);
inverter_decoder!(
    /// Actual values 2: temperatures and diagnostic error code
    InverterActual2Decoder
);
inverter_decoder!(
    /// Actual values 3: torque, DC bus voltage, power
    InverterActual3Decoder
);
inverter_decoder!(
    /// Setpoint loopback; does not mark liveness
    InverterSetpointDecoder
);

impl Decoder for InverterActual1Decoder {
    fn name(&self) -> &'static str {
        "inverter_actual_1"
    }

    fn node(&self) -> Option<NodeId> {
        Some(self.node)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = InverterActual1::parse(record)?;

        let inverter = &mut store.inverters[self.index];
        if frame.status.error && !inverter.status.error {
            warn!(inverter = self.index + 1, "inverter reports error");
        }
        inverter.status = frame.status;
        inverter.speed = frame.speed;
        inverter.torque_current = frame.torque_current;
        inverter.magnetizing_current = frame.magnetizing_current;

        store.mark_alive(self.node, record.timestamp_ms);
        Ok(())
    }
}

impl Decoder for InverterActual2Decoder {
    fn name(&self) -> &'static str {
        "inverter_actual_2"
    }

    fn node(&self) -> Option<NodeId> {
        Some(self.node)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = InverterActual2::parse(record)?;

        let inverter = &mut store.inverters[self.index];
        inverter.motor_temperature = frame.motor_temperature;
        inverter.plate_temperature = frame.plate_temperature;
        inverter.igbt_temperature = frame.igbt_temperature;
        store.vehicle.errors.inverters[self.index] = frame.error_code;

        store.mark_alive(self.node, record.timestamp_ms);
        Ok(())
    }
}

impl Decoder for InverterActual3Decoder {
    fn name(&self) -> &'static str {
        "inverter_actual_3"
    }

    fn node(&self) -> Option<NodeId> {
        Some(self.node)
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        let frame = InverterActual3::parse(record)?;

        let inverter = &mut store.inverters[self.index];
        inverter.torque = frame.torque;
        inverter.dc_bus_voltage = frame.dc_bus_voltage;
        inverter.actual_power = frame.actual_power;

        store.mark_alive(self.node, record.timestamp_ms);
        Ok(())
    }
}

impl Decoder for InverterSetpointDecoder {
    fn name(&self) -> &'static str {
        "inverter_setpoints"
    }

    fn node(&self) -> Option<NodeId> {
        None
    }

    fn decode(&self, record: &Record, store: &mut StateStore) -> Result<(), ProtocolError> {
        store.inverters[self.index].setpoints = InverterSetpoints::parse(record)?;
        Ok(())
    }
}
