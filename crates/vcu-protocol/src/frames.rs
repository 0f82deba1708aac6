//! Payload Layouts
//!
//! Each frame type parses one message's payload into raw scaled integers.
//! Scaling to physical units is left to presentation code; the comments
//! note the transported unit.

use crate::bits::{bit, i16_le, i32_le, u16_le};
use crate::error::ProtocolError;
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Pedal box broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PedalFrame {
    /// Throttle (0.1 %)
    pub throttle: u16,
    /// Brake (0.1 %)
    pub brake: u16,
    /// Steering wheel angle (0.1 deg)
    pub steering_angle: i16,
    /// Brake/throttle implausibility sensor raw reading
    pub implausibility_raw: u16,
}

impl PedalFrame {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            throttle: u16_le(data, 0),
            brake: u16_le(data, 2),
            steering_angle: i16_le(data, 4),
            implausibility_raw: u16_le(data, 6),
        })
    }
}

/// Sub-controller broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubControllerFrame {
    /// Shutdown circuit closed
    pub shutdown_closed: bool,
    /// Arming switch (ASMS) on
    pub arming_switch_on: bool,
    /// Rear oil pressure (0.01 bar)
    pub rear_oil_pressure: u16,
    /// Water temperature (deg C)
    pub water_temperature: u8,
    /// System error code, zero when healthy
    pub system_error: u16,
}

impl SubControllerFrame {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            shutdown_closed: bit(data[0], 0),
            arming_switch_on: bit(data[1], 0),
            rear_oil_pressure: u16_le(data, 2),
            water_temperature: data[4],
            system_error: u16_le(data, 6),
        })
    }
}

/// Dashboard broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardFrame {
    /// Driver requested ready-to-drive
    pub ready_to_drive: bool,
    /// Selected mission
    pub mission: u8,
}

impl DashboardFrame {
    pub const LEN: usize = 2;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            ready_to_drive: bit(data[0], 0),
            mission: data[1],
        })
    }
}

/// Inverter status flags.
///
/// Eight flags come from fixed bit positions of one status byte; `reserved`
/// is carried for completeness and never set by a decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterStatus {
    pub ready: bool,
    pub error: bool,
    pub warning: bool,
    pub dc_contactor_quit: bool,
    pub dc_on: bool,
    pub inverter_quit: bool,
    pub inverter_on: bool,
    pub derating: bool,
    pub reserved: bool,
}

impl InverterStatus {
    pub const READY_BIT: u8 = 0;
    pub const ERROR_BIT: u8 = 1;
    pub const WARNING_BIT: u8 = 2;
    pub const DC_CONTACTOR_QUIT_BIT: u8 = 3;
    pub const DC_ON_BIT: u8 = 4;
    pub const INVERTER_QUIT_BIT: u8 = 5;
    pub const INVERTER_ON_BIT: u8 = 6;
    pub const DERATING_BIT: u8 = 7;

    /// Unpack the status byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            ready: bit(byte, Self::READY_BIT),
            error: bit(byte, Self::ERROR_BIT),
            warning: bit(byte, Self::WARNING_BIT),
            dc_contactor_quit: bit(byte, Self::DC_CONTACTOR_QUIT_BIT),
            dc_on: bit(byte, Self::DC_ON_BIT),
            inverter_quit: bit(byte, Self::INVERTER_QUIT_BIT),
            inverter_on: bit(byte, Self::INVERTER_ON_BIT),
            derating: bit(byte, Self::DERATING_BIT),
            reserved: false,
        }
    }
}

/// Inverter actual values 1: status, speed, currents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterActual1 {
    pub status: InverterStatus,
    /// Actual speed (rpm)
    pub speed: i16,
    /// Torque-producing current (raw)
    pub torque_current: i16,
    /// Magnetizing current (raw)
    pub magnetizing_current: i16,
}

impl InverterActual1 {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            status: InverterStatus::from_byte(data[1]),
            speed: i16_le(data, 2),
            torque_current: i16_le(data, 4),
            magnetizing_current: i16_le(data, 6),
        })
    }
}

/// Inverter actual values 2: temperatures and error code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterActual2 {
    /// Motor temperature (0.1 deg C)
    pub motor_temperature: i16,
    /// Cold plate temperature (0.1 deg C)
    pub plate_temperature: i16,
    /// Diagnostic error code, zero when healthy
    pub error_code: u16,
    /// IGBT temperature (0.1 deg C)
    pub igbt_temperature: i16,
}

impl InverterActual2 {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            motor_temperature: i16_le(data, 0),
            plate_temperature: i16_le(data, 2),
            error_code: u16_le(data, 4),
            igbt_temperature: i16_le(data, 6),
        })
    }
}

/// Inverter actual values 3: torque, DC bus, power
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterActual3 {
    /// Actual torque (0.1 % of nominal)
    pub torque: i16,
    /// DC bus voltage (V)
    pub dc_bus_voltage: u16,
    /// Actual power (W)
    pub actual_power: i32,
}

impl InverterActual3 {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            torque: i16_le(data, 0),
            dc_bus_voltage: u16_le(data, 2),
            actual_power: i32_le(data, 4),
        })
    }
}

/// Inverter setpoints as transmitted by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverterSetpoints {
    pub control_word: u16,
    /// Target velocity (rpm)
    pub target_velocity: i16,
    /// Positive torque limit (0.1 % of nominal)
    pub torque_limit_positive: i16,
    /// Negative torque limit (0.1 % of nominal)
    pub torque_limit_negative: i16,
}

impl InverterSetpoints {
    pub const LEN: usize = 8;

    pub fn parse(record: &Record) -> Result<Self, ProtocolError> {
        let data = record.require(Self::LEN)?;
        Ok(Self {
            control_word: u16_le(data, 0),
            target_velocity: i16_le(data, 2),
            torque_limit_positive: i16_le(data, 4),
            torque_limit_negative: i16_le(data, 6),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u16, data: &[u8]) -> Record {
        Record::new(id, data, 0).unwrap()
    }

    #[test]
    fn test_inverter_actual_1() {
        let frame = InverterActual1::parse(&record(
            0x283,
            &[0xEE, 0b0000_0001, 0x0A, 0x00, 0x05, 0x00, 0x00, 0x00],
        ))
        .unwrap();

        assert_eq!(
            frame.status,
            InverterStatus {
                ready: true,
                ..Default::default()
            }
        );
        assert_eq!(frame.speed, 10);
        assert_eq!(frame.torque_current, 5);
        assert_eq!(frame.magnetizing_current, 0);
    }

    #[test]
    fn test_status_bits_are_independent() {
        for position in 0..8u8 {
            let status = InverterStatus::from_byte(1 << position);
            let flags = [
                status.ready,
                status.error,
                status.warning,
                status.dc_contactor_quit,
                status.dc_on,
                status.inverter_quit,
                status.inverter_on,
                status.derating,
            ];
            for (i, flag) in flags.iter().enumerate() {
                assert_eq!(*flag, i == position as usize);
            }
            assert!(!status.reserved);
        }
    }

    #[test]
    fn test_negative_speed() {
        let frame = InverterActual1::parse(&record(0x283, &[0, 0, 0x18, 0xFC, 0, 0, 0, 0])).unwrap();
        assert_eq!(frame.speed, -1000);
    }

    #[test]
    fn test_pedal() {
        let frame = PedalFrame::parse(&record(
            0x30,
            &[0xF4, 0x01, 0x20, 0x03, 0xD3, 0xFF, 0xAB, 0x00],
        ))
        .unwrap();
        assert_eq!(frame.throttle, 500);
        assert_eq!(frame.brake, 800);
        assert_eq!(frame.steering_angle, -45);
        assert_eq!(frame.implausibility_raw, 0xAB);
    }

    #[test]
    fn test_actual_2_and_3() {
        let av2 = InverterActual2::parse(&record(
            0x285,
            &[0x8A, 0x02, 0x2C, 0x01, 0x6E, 0x0C, 0x90, 0x01],
        ))
        .unwrap();
        assert_eq!(av2.motor_temperature, 650);
        assert_eq!(av2.plate_temperature, 300);
        assert_eq!(av2.error_code, 3182);
        assert_eq!(av2.igbt_temperature, 400);

        let av3 = InverterActual3::parse(&record(
            0x290,
            &[0xFA, 0x00, 0x58, 0x02, 0x10, 0x27, 0x00, 0x00],
        ))
        .unwrap();
        assert_eq!(av3.torque, 250);
        assert_eq!(av3.dc_bus_voltage, 600);
        assert_eq!(av3.actual_power, 10_000);
    }

    #[test]
    fn test_sub_controller_and_dashboard() {
        let sub = SubControllerFrame::parse(&record(
            0x20,
            &[0x01, 0x00, 0xC8, 0x00, 0x55, 0x00, 0x00, 0x00],
        ))
        .unwrap();
        assert!(sub.shutdown_closed);
        assert!(!sub.arming_switch_on);
        assert_eq!(sub.rear_oil_pressure, 200);
        assert_eq!(sub.water_temperature, 85);
        assert_eq!(sub.system_error, 0);

        let dash = DashboardFrame::parse(&record(0x40, &[0x01, 0x03])).unwrap();
        assert!(dash.ready_to_drive);
        assert_eq!(dash.mission, 3);
    }

    #[test]
    fn test_short_payload_rejected() {
        assert_eq!(
            InverterActual1::parse(&record(0x283, &[0, 1, 2])),
            Err(ProtocolError::ShortPayload {
                id: 0x283,
                expected: 8,
                actual: 3
            })
        );
        assert!(DashboardFrame::parse(&record(0x40, &[])).is_err());
    }
}
